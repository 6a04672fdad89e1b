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

//! Token types produced by the lexical scanner

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keywords recognized by the scanner
pub const KEYWORDS: [&str; 32] = [
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else", "enum", "extern", "float", "for", "goto", "if", "int", "long",
    "register", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef", "union", "unsigned", "void", "volatile", "while",
];

/// Operator lexemes. Only the single-character entries can be extracted.
pub const OPERATORS: [&str; 11] = ["+", "-", "*", "/", "=", "==", "!=", "<", ">", "<=", ">="];

/// Punctuation lexemes
pub const SPECIAL_SYMBOLS: [&str; 8] = [";", ",", "(", ")", "{", "}", "[", "]"];

/// Classification of a lexical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    Keyword,
    Identifier,
    Constant,
    Operator,
    #[serde(rename = "Special Symbol")]
    SpecialSymbol,
    String,
}

impl TokenType {
    /// Human-readable name of the token type
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Keyword => "Keyword",
            TokenType::Identifier => "Identifier",
            TokenType::Constant => "Constant",
            TokenType::Operator => "Operator",
            TokenType::SpecialSymbol => "Special Symbol",
            TokenType::String => "String",
        }
    }

    /// Classify an extracted lexeme, in priority order.
    ///
    /// Returns `None` when the lexeme fits no class.
    pub fn classify(lexeme: &str) -> Option<Self> {
        if KEYWORDS.contains(&lexeme) {
            Some(TokenType::Keyword)
        } else if is_identifier(lexeme) {
            Some(TokenType::Identifier)
        } else if !lexeme.is_empty() && lexeme.chars().all(|c| c.is_ascii_digit()) {
            Some(TokenType::Constant)
        } else if OPERATORS.contains(&lexeme) {
            Some(TokenType::Operator)
        } else if SPECIAL_SYMBOLS.contains(&lexeme) {
            Some(TokenType::SpecialSymbol)
        } else if is_quoted(lexeme, '"') || is_quoted(lexeme, '\'') {
            Some(TokenType::String)
        } else {
            None
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified lexical unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Token classification
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Literal text of the token
    pub value: String,
}

impl Token {
    /// Create a new token
    pub fn new(token_type: TokenType, value: impl Into<String>) -> Self {
        Self { token_type, value: value.into() }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.token_type, self.value)
    }
}

fn is_identifier(lexeme: &str) -> bool {
    let mut chars = lexeme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => chars.all(crate::scan::is_word_char),
        _ => false,
    }
}

/// Quoted on both ends with no line terminator in between
fn is_quoted(lexeme: &str, quote: char) -> bool {
    lexeme.len() >= 2 && lexeme.starts_with(quote) && lexeme.ends_with(quote) && !lexeme.chars().any(crate::scan::is_line_terminator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("while", Some(TokenType::Keyword); "keyword")]
    #[test_case("_count1", Some(TokenType::Identifier); "identifier")]
    #[test_case("0042", Some(TokenType::Constant); "constant")]
    #[test_case("<", Some(TokenType::Operator); "operator")]
    #[test_case("{", Some(TokenType::SpecialSymbol); "special symbol")]
    #[test_case("\"hi there\"", Some(TokenType::String); "double quoted")]
    #[test_case("'c'", Some(TokenType::String); "single quoted")]
    #[test_case("9lives", None; "digit led word")]
    #[test_case("\"a\nb\"", None; "string across lines")]
    fn test_classify(lexeme: &str, expected: Option<TokenType>) {
        assert_eq!(TokenType::classify(lexeme), expected);
    }

    #[test]
    fn test_keyword_table() {
        assert_eq!(KEYWORDS.len(), 32);
        assert!(KEYWORDS.contains(&"volatile"));
        assert!(!KEYWORDS.contains(&"inline"));
    }

    #[test]
    fn test_special_symbol_wire_name() {
        let token = Token::new(TokenType::SpecialSymbol, ";");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#"{"type":"Special Symbol","value":";"}"#);
    }
}
