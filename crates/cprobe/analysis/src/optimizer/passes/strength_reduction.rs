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

//! Strength reduction
//!
//! Replaces doubling and halving self-assignments with shifts:
//! `x = x * 2` becomes `x = x << 1` and `x = x / 2` becomes `x = x >> 1`.

use crate::optimizer::framework::pass::{OptimizationPass, OptimizationResult, rewrite_lines};
use crate::patterns::match_self_assignment;
use crate::scan::replace_all;

/// (operator, operand, replacement shift) triples, applied in this order
const SHIFT_RULES: [(char, &str, &str); 2] = [('*', "2", "<<"), ('/', "2", ">>")];

/// Rewrites multiplication and division by two into shifts
#[derive(Debug, Default, Clone, Copy)]
pub struct StrengthReducer;

impl StrengthReducer {
    /// Create a new strength reducer
    pub fn new() -> Self {
        Self
    }

    /// Rewrite a single line, returning it with the number of replacements
    pub fn rewrite_line(&self, line: &str) -> (String, usize) {
        let mut current = line.to_string();
        let mut total = 0;

        for (operator, operand, shift) in SHIFT_RULES {
            let (rewritten, count) = replace_all(&current, |chars, pos| {
                match_self_assignment(chars, pos, &[operator], operand).map(|m| (m.end, format!("{0} = {0} {shift} 1", m.name)))
            });
            current = rewritten;
            total += count;
        }

        (current, total)
    }
}

impl OptimizationPass for StrengthReducer {
    fn name(&self) -> &str {
        "strength-reduction"
    }

    fn description(&self) -> &str {
        "Rewrites x = x * 2 and x = x / 2 as shifts"
    }

    fn optimize(&self, lines: Vec<String>) -> OptimizationResult {
        rewrite_lines(lines, |line| self.rewrite_line(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("x = x * 2;", "x = x << 1;"; "double")]
    #[test_case("x = x / 2;", "x = x >> 1;"; "halve")]
    #[test_case("n=n*2", "n = n << 1"; "no spaces")]
    #[test_case("x = x * 20;", "x = x * 20;"; "longer operand kept")]
    #[test_case("x = y * 2;", "x = y * 2;"; "different names kept")]
    #[test_case("x = x * 4;", "x = x * 4;"; "other powers kept")]
    fn test_rewrite_line(input: &str, expected: &str) {
        let (out, _) = StrengthReducer::new().rewrite_line(input);
        assert_eq!(out, expected);
    }
}
