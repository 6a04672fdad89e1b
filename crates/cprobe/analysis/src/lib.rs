// CProbe
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! CProbe Analysis Library
//!
//! Lightweight, text-pattern based analysis passes over C source text: a
//! token scanner, a peephole optimizer, a symbol table builder, a
//! three-address IR emitter, a syntax checker and a comment stripper, plus a
//! bridge that reshapes the tree of an external C parser into a generic
//! labeled tree.
//!
//! The passes are independent; each takes raw source text and returns one
//! result. Only the AST bridge can fail.

pub mod ast;
pub mod comments;
pub mod error;
pub mod ir;
pub mod lexer;
pub mod optimizer;
pub mod patterns;
pub mod pipeline;
pub mod scan;
pub mod symbols;
pub mod syntax;

pub use ast::{AstBridge, CParser, ExternalNode, LabeledTree};
#[cfg(feature = "c-grammar")]
pub use ast::TreeSitterParser;
pub use comments::CommentStripper;
pub use error::{AnalysisError, AnalysisResult, ParserFailure};
pub use ir::{IrEmitter, IrInstruction};
pub use lexer::{Scanner, Token, TokenType};
pub use optimizer::{OptimizationMetrics, OptimizedProgram, OptimizerConfig, PeepholeOptimizer};
pub use pipeline::{Analyzer, Pass, PassOutput};
pub use symbols::{Scope, SymbolRecord, SymbolTableBuilder};
pub use syntax::{SyntaxChecker, ValidationReport};

/// Extract the de-duplicated token set of `text`
pub fn scan(text: &str) -> Vec<Token> {
    Scanner::new().scan(text)
}

/// Apply every peephole rule to `text`
pub fn optimize(text: &str) -> String {
    PeepholeOptimizer::new().optimize(text)
}

/// Collect function and variable records from `text`
pub fn build_symbol_table(text: &str) -> Vec<SymbolRecord> {
    SymbolTableBuilder::new().build(text)
}

/// Lower every assignment line of `text` into two IR instruction lines
pub fn generate_ir(text: &str) -> Vec<String> {
    IrEmitter::new().generate(text)
}

pub fn validate(text: &str) -> ValidationReport {
    SyntaxChecker::new().validate(text)
}

pub fn strip_comments(text: &str) -> String {
    CommentStripper::new().strip(text)
}
