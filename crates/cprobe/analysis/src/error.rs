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

//! Error types for the analysis passes
//!
//! Only the AST bridge can fail. Every text-pattern pass is total over its
//! input and has no error path.

use thiserror::Error;

/// Result type for fallible analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors surfaced by the analysis passes
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The source text was empty or contained only whitespace
    #[error("No code provided")]
    EmptyInput,

    /// The external C parser failed; its message is passed through unmodified
    #[error(transparent)]
    UnderlyingParserFailure(#[from] ParserFailure),
}

impl AnalysisError {
    /// Stable machine-readable code for the error category
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::EmptyInput => "empty_input",
            AnalysisError::UnderlyingParserFailure(_) => "parser_failure",
        }
    }
}

/// Failure reported by an external grammar-aware parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParserFailure {
    /// Message produced by the parser
    pub message: String,
}

impl ParserFailure {
    /// Create a new parser failure
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
