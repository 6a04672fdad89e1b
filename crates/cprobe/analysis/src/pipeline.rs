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

//! Single-pass dispatch
//!
//! Every pass takes raw source text and returns one result; passes never feed
//! each other. [`Analyzer`] holds the collaborators that need configuration
//! (the optimizer rule set and the external C parser) and routes a [`Pass`]
//! request to the matching component.

use crate::ast::{AstBridge, CParser, LabeledTree};
use crate::comments::CommentStripper;
use crate::error::AnalysisResult;
use crate::ir::IrEmitter;
use crate::lexer::{Scanner, Token};
use crate::optimizer::{OptimizerConfig, PeepholeOptimizer};
use crate::symbols::{SymbolRecord, SymbolTableBuilder};
use crate::syntax::{SyntaxChecker, ValidationReport};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

/// Analysis pass selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    StripComments,
    Tokenize,
    Optimize,
    Validate,
    GenerateIr,
    GenerateAst,
    SymbolTable,
}

impl Pass {
    pub const ALL: [Pass; 7] = [
        Pass::StripComments,
        Pass::Tokenize,
        Pass::Optimize,
        Pass::Validate,
        Pass::GenerateIr,
        Pass::GenerateAst,
        Pass::SymbolTable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pass::StripComments => "strip-comments",
            Pass::Tokenize => "tokenize",
            Pass::Optimize => "optimize",
            Pass::Validate => "validate",
            Pass::GenerateIr => "ir",
            Pass::GenerateAst => "ast",
            Pass::SymbolTable => "symbols",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one pass, serialized as the response envelope for that pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PassOutput {
    ProcessedCode {
        #[serde(rename = "processedCode")]
        processed_code: String,
    },
    Tokens {
        tokens: Vec<Token>,
    },
    OptimizedCode {
        #[serde(rename = "optimizedCode")]
        optimized_code: String,
    },
    Validation(ValidationReport),
    Ir {
        ir: Vec<String>,
    },
    Ast {
        ast: LabeledTree,
    },
    SymbolTable {
        #[serde(rename = "symbolTable")]
        symbol_table: Vec<SymbolRecord>,
    },
}

impl PassOutput {
    /// Number of top-level items the pass produced
    pub fn item_count(&self) -> usize {
        match self {
            PassOutput::ProcessedCode { processed_code } => processed_code.lines().count(),
            PassOutput::OptimizedCode { optimized_code } => optimized_code.lines().count(),
            PassOutput::Tokens { tokens } => tokens.len(),
            PassOutput::Validation(report) => report.errors.len(),
            PassOutput::Ir { ir } => ir.len(),
            PassOutput::Ast { ast } => ast.node_count(),
            PassOutput::SymbolTable { symbol_table } => symbol_table.len(),
        }
    }
}

/// Dispatches analysis passes over source text
pub struct Analyzer<P> {
    optimizer: PeepholeOptimizer,
    ast: AstBridge<P>,
}

impl<P: CParser> Analyzer<P> {
    /// Create an analyzer with every optimizer rule enabled
    pub fn new(parser: P) -> Self {
        Self::with_optimizer_config(parser, OptimizerConfig::default())
    }

    pub fn with_optimizer_config(parser: P, config: OptimizerConfig) -> Self {
        Self {
            optimizer: PeepholeOptimizer::with_config(config),
            ast: AstBridge::new(parser),
        }
    }

    pub fn optimizer(&self) -> &PeepholeOptimizer {
        &self.optimizer
    }

    /// Run a single pass over `text`
    ///
    /// Only [`Pass::GenerateAst`] can fail; every other pass is total over its
    /// input.
    #[instrument(skip_all, fields(pass = %pass, len = text.len()))]
    pub fn run(&self, pass: Pass, text: &str) -> AnalysisResult<PassOutput> {
        let output = match pass {
            Pass::StripComments => PassOutput::ProcessedCode {
                processed_code: CommentStripper::new().strip(text),
            },
            Pass::Tokenize => PassOutput::Tokens {
                tokens: Scanner::new().scan(text),
            },
            Pass::Optimize => PassOutput::OptimizedCode {
                optimized_code: self.optimizer.optimize(text),
            },
            Pass::Validate => PassOutput::Validation(SyntaxChecker::new().validate(text)),
            Pass::GenerateIr => PassOutput::Ir {
                ir: IrEmitter::new().generate(text),
            },
            Pass::GenerateAst => PassOutput::Ast {
                ast: self.ast.build_tree(text)?,
            },
            Pass::SymbolTable => PassOutput::SymbolTable {
                symbol_table: SymbolTableBuilder::new().build(text),
            },
        };

        debug!(items = output.item_count(), "Pass complete");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExternalNode, MockCParser};
    use crate::error::AnalysisError;

    fn idle_parser() -> MockCParser {
        let mut parser = MockCParser::new();
        parser.expect_parse().times(0);
        parser
    }

    #[test]
    fn test_tokenize_envelope() {
        let analyzer = Analyzer::new(idle_parser());
        let output = analyzer.run(Pass::Tokenize, "int x;").unwrap();
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "tokens": [
                    {"type": "Keyword", "value": "int"},
                    {"type": "Identifier", "value": "x"},
                    {"type": "Special Symbol", "value": ";"}
                ]
            })
        );
    }

    #[test]
    fn test_validation_envelope_is_flat() {
        let analyzer = Analyzer::new(idle_parser());
        let output = analyzer.run(Pass::Validate, "int main() { return 0; }").unwrap();
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json, serde_json::json!({"isValid": true, "errors": []}));
    }

    #[test]
    fn test_optimize_uses_configured_rules() {
        let analyzer = Analyzer::with_optimizer_config(idle_parser(), OptimizerConfig::none());
        let output = analyzer.run(Pass::Optimize, "x = x + 0;").unwrap();
        assert_eq!(
            output,
            PassOutput::OptimizedCode {
                optimized_code: "x = x + 0;".to_string()
            }
        );
    }

    #[test]
    fn test_ir_and_comment_envelopes() {
        let analyzer = Analyzer::new(idle_parser());

        let ir = serde_json::to_value(analyzer.run(Pass::GenerateIr, "y = a + b").unwrap()).unwrap();
        assert_eq!(ir, serde_json::json!({"ir": ["t1 = a + b", "y = t1"]}));

        let stripped = serde_json::to_value(analyzer.run(Pass::StripComments, "// note\nint x; /* tail */").unwrap()).unwrap();
        assert_eq!(stripped, serde_json::json!({"processedCode": "int x; "}));
    }

    #[test]
    fn test_symbol_table_envelope_key() {
        let analyzer = Analyzer::new(idle_parser());
        let json = serde_json::to_value(analyzer.run(Pass::SymbolTable, "int a = 1;").unwrap()).unwrap();

        let records = json["symbolTable"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "a");
        assert_eq!(records[0]["type"], "variable");
    }

    #[test]
    fn test_ast_pass_delegates_to_parser() {
        let mut parser = MockCParser::new();
        parser
            .expect_parse()
            .times(1)
            .returning(|_| Ok(ExternalNode::with_children("translation_unit", vec![ExternalNode::leaf("declaration")])));
        let analyzer = Analyzer::new(parser);

        let json = serde_json::to_value(analyzer.run(Pass::GenerateAst, "int x;").unwrap()).unwrap();
        assert_eq!(json["ast"]["name"], "translation_unit");
        assert_eq!(json["ast"]["children"][0]["name"], "declaration");
    }

    #[test]
    fn test_only_ast_pass_rejects_blank_input() {
        let analyzer = Analyzer::new(idle_parser());

        for pass in Pass::ALL {
            let result = analyzer.run(pass, "   ");
            if pass == Pass::GenerateAst {
                assert!(matches!(result, Err(AnalysisError::EmptyInput)));
            } else {
                assert!(result.is_ok(), "{pass} should accept blank input");
            }
        }
    }
}
