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

//! Identity elimination
//!
//! Collapses self-assignments whose arithmetic is a no-op:
//! `x = x + 0`, `x = x - 0`, `x = x * 1` and `x = x / 1` all become `x = x`.

use crate::optimizer::framework::pass::{OptimizationPass, OptimizationResult, rewrite_lines};
use crate::patterns::match_self_assignment;
use crate::scan::replace_all;

/// (operators, identity operand) pairs, applied in this order
const IDENTITY_RULES: [(&[char], &str); 3] = [(&['+', '-'], "0"), (&['*'], "1"), (&['/'], "1")];

/// Removes additive and multiplicative identities from self-assignments
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityEliminator;

impl IdentityEliminator {
    /// Create a new identity eliminator
    pub fn new() -> Self {
        Self
    }

    /// Rewrite a single line, returning it with the number of replacements
    pub fn rewrite_line(&self, line: &str) -> (String, usize) {
        let mut current = line.to_string();
        let mut total = 0;

        for (operators, operand) in IDENTITY_RULES {
            let (rewritten, count) = replace_all(&current, |chars, pos| {
                match_self_assignment(chars, pos, operators, operand).map(|m| (m.end, format!("{0} = {0}", m.name)))
            });
            current = rewritten;
            total += count;
        }

        (current, total)
    }
}

impl OptimizationPass for IdentityEliminator {
    fn name(&self) -> &str {
        "identity-elimination"
    }

    fn description(&self) -> &str {
        "Collapses x = x + 0, x - 0, x * 1 and x / 1 into x = x"
    }

    fn optimize(&self, lines: Vec<String>) -> OptimizationResult {
        rewrite_lines(lines, |line| self.rewrite_line(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("x = x + 0;", "x = x;"; "add zero")]
    #[test_case("x = x - 0;", "x = x;"; "subtract zero")]
    #[test_case("x = x * 1;", "x = x;"; "multiply one")]
    #[test_case("x = x / 1;", "x = x;"; "divide one")]
    #[test_case("count=count+0;", "count = count;"; "no spaces")]
    #[test_case("x = x * 0;", "x = x * 0;"; "multiply zero kept")]
    #[test_case("x = y + 0;", "x = y + 0;"; "different names kept")]
    #[test_case("x = x + 00;", "x = x + 00;"; "operand must end the word")]
    #[test_case("a = a + 0; b = b * 1;", "a = a; b = b;"; "several per line")]
    fn test_rewrite_line(input: &str, expected: &str) {
        let (out, _) = IdentityEliminator::new().rewrite_line(input);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_counts_rewrites() {
        let result = IdentityEliminator::new().optimize(vec!["a = a + 0;".to_string(), "b = 2;".to_string(), "c = c / 1;".to_string()]);
        assert_eq!(result.rewrites, 2);
        assert!(result.changed());
    }
}
