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

//! Constant folding
//!
//! Evaluates every `integer <op> integer` substring of a line, for `+ - * /`.
//! Matching ignores word boundaries, so digits at the end of an identifier
//! take part (`x1 + 2` folds to `x3`). Arithmetic is exact; division
//! truncates, and division by zero yields `Infinity` or `NaN` as text.

use crate::optimizer::framework::pass::{OptimizationPass, OptimizationResult, rewrite_lines};
use crate::scan::{replace_all, run_end, space_end};
use num_bigint::{BigInt, Sign};
use tracing::trace;

/// Folds integer arithmetic into its result
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstantFolder;

impl ConstantFolder {
    /// Create a new constant folder
    pub fn new() -> Self {
        Self
    }

    /// Rewrite a single line, returning it with the number of folds
    pub fn rewrite_line(&self, line: &str) -> (String, usize) {
        replace_all(line, |chars, pos| {
            if !chars[pos].is_ascii_digit() {
                return None;
            }
            let lhs_end = run_end(chars, pos, |c| c.is_ascii_digit());
            let op_pos = space_end(chars, lhs_end);
            let operator = *chars.get(op_pos)?;
            if !matches!(operator, '+' | '-' | '*' | '/') {
                return None;
            }
            let rhs_start = space_end(chars, op_pos + 1);
            let rhs_end = run_end(chars, rhs_start, |c| c.is_ascii_digit());
            if rhs_end == rhs_start {
                return None;
            }

            let lhs: String = chars[pos..lhs_end].iter().collect();
            let rhs: String = chars[rhs_start..rhs_end].iter().collect();
            let folded = fold(&lhs, operator, &rhs)?;
            trace!(%lhs, %operator, %rhs, %folded, "folded constant expression");
            Some((rhs_end, folded))
        })
    }
}

/// Evaluate `lhs <operator> rhs` over decimal digit strings
pub fn fold(lhs: &str, operator: char, rhs: &str) -> Option<String> {
    let a = BigInt::parse_bytes(lhs.as_bytes(), 10)?;
    let b = BigInt::parse_bytes(rhs.as_bytes(), 10)?;

    let value = match operator {
        '+' => a + b,
        '-' => a - b,
        '*' => a * b,
        '/' if b.sign() == Sign::NoSign => {
            let text = if a.sign() == Sign::NoSign { "NaN" } else { "Infinity" };
            return Some(text.to_string());
        }
        '/' => a / b,
        _ => return None,
    };

    Some(value.to_string())
}

impl OptimizationPass for ConstantFolder {
    fn name(&self) -> &str {
        "constant-folding"
    }

    fn description(&self) -> &str {
        "Evaluates integer arithmetic between literal operands"
    }

    fn optimize(&self, lines: Vec<String>) -> OptimizationResult {
        rewrite_lines(lines, |line| self.rewrite_line(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1 + 2;", "3;"; "add")]
    #[test_case("a = 10 - 3;", "a = 7;"; "subtract")]
    #[test_case("a = 2 - 5;", "a = -3;"; "negative result")]
    #[test_case("a = 6*7;", "a = 42;"; "multiply")]
    #[test_case("a = 7 / 2;", "a = 3;"; "division truncates")]
    #[test_case("a = 5 / 0;", "a = Infinity;"; "division by zero")]
    #[test_case("a = 0 / 0;", "a = NaN;"; "zero by zero")]
    #[test_case("a = 1 + 2 + 3;", "a = 3 + 3;"; "single left to right pass")]
    #[test_case("y = x1 + 2;", "y = x3;"; "digits inside identifiers")]
    #[test_case("a = 007 + 1;", "a = 8;"; "leading zeros")]
    #[test_case("a = b + 2;", "a = b + 2;"; "non constant operand")]
    fn test_rewrite_line(input: &str, expected: &str) {
        let (out, _) = ConstantFolder::new().rewrite_line(input);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_fold_is_exact_for_large_operands() {
        assert_eq!(fold("99999999999999999999", '+', "1").as_deref(), Some("100000000000000000000"));
    }

    #[test]
    fn test_counts_folds() {
        let (_, count) = ConstantFolder::new().rewrite_line("a = 1 + 1, b = 2 * 2;");
        assert_eq!(count, 2);
    }
}
