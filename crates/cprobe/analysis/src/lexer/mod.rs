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

//! Lexical scanner
//!
//! Splits source text into a deduplicated, first-seen-ordered sequence of
//! classified tokens. The scanner is deliberately naive: it has no notion of
//! comments, escapes, or multi-character operators.
//!
//! # Extraction order
//!
//! At each position the scanner tries, in order:
//! 1. a run of word characters (`[A-Za-z0-9_]+`)
//! 2. a single character from `+ - * / = < > ( ) { } [ ] ; ,`
//! 3. a double-quoted string (may span lines)
//! 4. a single-quoted string
//!
//! Anything else is skipped one character at a time.

pub mod token;

pub use token::{KEYWORDS, OPERATORS, SPECIAL_SYMBOLS, Token, TokenType};

use crate::scan::{is_word_char, word_end};
use std::collections::HashSet;
use tracing::{debug, instrument};

const SYMBOL_CHARS: [char; 15] = ['+', '-', '*', '/', '=', '<', '>', '(', ')', '{', '}', '[', ']', ';', ','];

/// Lexical scanner for C-like source text
#[derive(Debug, Default, Clone, Copy)]
pub struct Scanner;

impl Scanner {
    /// Create a new scanner
    pub fn new() -> Self {
        Self
    }

    /// Tokenize the entire input
    #[instrument(skip_all, fields(len = text.len()))]
    pub fn scan(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut seen: HashSet<(TokenType, String)> = HashSet::new();
        let mut extracted = 0usize;

        for lexeme in Lexemes::new(text) {
            extracted += 1;
            let Some(token_type) = TokenType::classify(&lexeme) else {
                continue;
            };
            if seen.insert((token_type, lexeme.clone())) {
                tokens.push(Token::new(token_type, lexeme));
            }
        }

        debug!(extracted, unique = tokens.len(), "scan complete");
        tokens
    }
}

/// Iterator over the raw lexemes of a source text
pub struct Lexemes {
    chars: Vec<char>,
    pos: usize,
}

impl Lexemes {
    /// Create a lexeme iterator over `text`
    pub fn new(text: &str) -> Self {
        Self { chars: text.chars().collect(), pos: 0 }
    }

    /// Try to extract a lexeme at the current position, returning its end
    fn extract_at(&self, pos: usize) -> Option<usize> {
        let c = self.chars[pos];
        if is_word_char(c) {
            return Some(word_end(&self.chars, pos));
        }
        if SYMBOL_CHARS.contains(&c) {
            return Some(pos + 1);
        }
        if c == '"' || c == '\'' {
            return self.chars[pos + 1..].iter().position(|&q| q == c).map(|offset| pos + offset + 2);
        }
        None
    }
}

impl Iterator for Lexemes {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.chars.len() {
            let start = self.pos;
            match self.extract_at(start) {
                Some(end) => {
                    self.pos = end;
                    return Some(self.chars[start..end].iter().collect());
                }
                None => self.pos += 1,
            }
        }
        None
    }
}
