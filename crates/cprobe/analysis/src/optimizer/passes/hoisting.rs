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

//! Declaration hoisting
//!
//! Every line that is an `int`, `float` or `char` declaration is removed
//! from its position. Declarations of the same type are merged, in
//! first-seen order, into one line per type at the front of the program.
//! Each merged line is inserted at the front in turn, so the type seen
//! first ends up last among the hoisted lines.

use crate::optimizer::framework::pass::{OptimizationPass, OptimizationResult};
use crate::patterns::match_declaration;
use crate::scan::space_end;
use std::collections::VecDeque;

/// Hoists and merges simple declarations
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclarationHoister;

impl DeclarationHoister {
    /// Create a new declaration hoister
    pub fn new() -> Self {
        Self
    }

    /// Match a declaration at the start of a line
    fn leading_declaration(line: &str) -> Option<(&'static str, String)> {
        let chars: Vec<char> = line.chars().collect();
        let start = space_end(&chars, 0);
        match_declaration(&chars, start).map(|d| (d.type_name, d.declarators))
    }
}

impl OptimizationPass for DeclarationHoister {
    fn name(&self) -> &str {
        "declaration-hoisting"
    }

    fn description(&self) -> &str {
        "Merges int/float/char declarations per type and moves them to the front"
    }

    fn optimize(&self, lines: Vec<String>) -> OptimizationResult {
        let mut groups: Vec<(&'static str, Vec<String>)> = Vec::new();
        let mut output: VecDeque<String> = VecDeque::with_capacity(lines.len());
        let mut hoisted = 0;

        for line in lines {
            match Self::leading_declaration(&line) {
                Some((type_name, declarators)) => {
                    hoisted += 1;
                    match groups.iter_mut().find(|(t, _)| *t == type_name) {
                        Some((_, lists)) => lists.push(declarators),
                        None => groups.push((type_name, vec![declarators])),
                    }
                }
                None => output.push_back(line),
            }
        }

        for (type_name, lists) in groups {
            output.push_front(format!("{} {};", type_name, lists.join(", ")));
        }

        OptimizationResult {
            output: output.into(),
            rewrites: hoisted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merges_same_type() {
        let result = DeclarationHoister::new().optimize(lines(&["x = 1;", "int a;", "int b = 2, c;"]));
        assert_eq!(result.output, lines(&["int a, b = 2, c;", "x = 1;"]));
        assert_eq!(result.rewrites, 2);
    }

    #[test]
    fn test_last_seen_type_first() {
        let result = DeclarationHoister::new().optimize(lines(&["int a;", "char c;", "float f;", "int b;", "a = 1;"]));
        assert_eq!(result.output, lines(&["float f;", "char c;", "int a, b;", "a = 1;"]));
    }

    #[test]
    fn test_trailing_text_after_declaration_is_discarded() {
        let result = DeclarationHoister::new().optimize(lines(&["int x = 5; // five"]));
        assert_eq!(result.output, lines(&["int x = 5;"]));
    }

    #[test]
    fn test_non_declarations_stay_in_place() {
        let input = lines(&["int x = a + b;", "float *p;", "return 0;"]);
        let result = DeclarationHoister::new().optimize(input.clone());
        assert_eq!(result.output, input);
        assert!(!result.changed());
    }
}
