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

//! Toy three-address IR emitter
//!
//! Every line holding `<name> = <rhs>` becomes two instructions,
//! `tN = <rhs>` followed by `<name> = tN`, where `N` is the 1-based source
//! line number. There is no expression decomposition and no nesting.

use crate::scan::{collect, is_line_terminator, is_word_start, run_end, source_lines, space_end, word_end};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug, instrument};

/// A single three-address instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrInstruction {
    /// `tN = <rhs>`
    Compute { temp: usize, rhs: String },
    /// `<target> = tN`
    Assign { target: String, temp: usize },
}

impl IrInstruction {
    /// Temporary index (the source line number) of the instruction
    pub fn temp(&self) -> usize {
        match self {
            IrInstruction::Compute { temp, .. } | IrInstruction::Assign { temp, .. } => *temp,
        }
    }
}

impl fmt::Display for IrInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrInstruction::Compute { temp, rhs } => write!(f, "t{temp} = {rhs}"),
            IrInstruction::Assign { target, temp } => write!(f, "{target} = t{temp}"),
        }
    }
}

impl Serialize for IrInstruction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Converts simple assignments into three-address form
#[derive(Debug, Default, Clone, Copy)]
pub struct IrEmitter;

impl IrEmitter {
    /// Create a new IR emitter
    pub fn new() -> Self {
        Self
    }

    /// Emit instructions for every assignment line
    #[instrument(skip_all, fields(len = text.len()))]
    pub fn emit(&self, text: &str) -> Vec<IrInstruction> {
        let mut instructions = Vec::new();

        for (index, line) in source_lines(text).enumerate() {
            if let Some((target, rhs)) = match_assignment(line) {
                let temp = index + 1;
                instructions.push(IrInstruction::Compute { temp, rhs });
                instructions.push(IrInstruction::Assign { target, temp });
            }
        }

        debug!(instructions = instructions.len(), "IR emitted");
        instructions
    }

    /// Emit instructions rendered as text lines
    pub fn generate(&self, text: &str) -> Vec<String> {
        self.emit(text).iter().map(ToString::to_string).collect()
    }
}

/// Search a line for `<word> = <rhs>`.
///
/// The right-hand side is everything after the `=` and any whitespace, up
/// to the first line terminator. When nothing but whitespace follows the
/// `=`, the trailing whitespace itself becomes the right-hand side.
fn match_assignment(line: &str) -> Option<(String, String)> {
    let chars: Vec<char> = line.chars().collect();

    (0..chars.len()).filter(|&pos| is_word_start(&chars, pos)).find_map(|pos| {
        let name_end = word_end(&chars, pos);
        let eq = space_end(&chars, name_end);
        if chars.get(eq) != Some(&'=') {
            return None;
        }
        let rhs_start = space_end(&chars, eq + 1);
        (eq + 1..=rhs_start).rev().find_map(|start| {
            let end = run_end(&chars, start, |c| !is_line_terminator(c));
            (end > start).then(|| (collect(&chars[pos..name_end]), collect(&chars[start..end])))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(text: &str) -> Vec<String> {
        IrEmitter::new().generate(text)
    }

    #[test]
    fn test_single_assignment() {
        assert_eq!(generate("y = a + b"), vec!["t1 = a + b", "y = t1"]);
    }

    #[test]
    fn test_temps_follow_line_numbers() {
        let ir = generate("int x = 5;\n\nfoo();\nz=x*2;");
        assert_eq!(ir, vec!["t1 = 5;", "x = t1", "t4 = x*2;", "z = t4"]);
    }

    #[test]
    fn test_equality_is_matched_textually() {
        assert_eq!(generate("if (a == b) {"), vec!["t1 = = b) {", "a = t1"]);
    }

    #[test]
    fn test_rhs_stops_at_carriage_return() {
        assert_eq!(generate("x = 1\r\ny = 2"), vec!["t1 = 1", "x = t1", "t2 = 2", "y = t2"]);
    }

    #[test]
    fn test_whitespace_only_rhs() {
        assert_eq!(generate("x = "), vec!["t1 =  ", "x = t1"]);
        assert!(generate("x =").is_empty());
    }

    #[test]
    fn test_non_assignments_contribute_nothing() {
        assert!(generate("").is_empty());
        assert!(generate("return x;\nx <= 3;").is_empty());
    }

    #[test]
    fn test_instruction_display_and_temp() {
        let instruction = IrInstruction::Assign {
            target: "y".to_string(),
            temp: 7,
        };
        assert_eq!(instruction.to_string(), "y = t7");
        assert_eq!(instruction.temp(), 7);
    }
}
