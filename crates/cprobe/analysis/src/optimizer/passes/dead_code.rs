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

//! Dead code elimination
//!
//! A textual heuristic rather than reachability analysis: once a line
//! starting with `return` or `break` has been seen, every later line that
//! also starts with one of them is dropped. Blocks and branches are not
//! modeled.

use crate::optimizer::framework::pass::{OptimizationPass, OptimizationResult};
use crate::scan::trim_start;
use tracing::trace;

/// Line prefixes that end straight-line control flow
const TERMINATORS: [&str; 2] = ["return", "break"];

/// Drops repeated `return`/`break` lines after the first
#[derive(Debug, Default, Clone, Copy)]
pub struct DeadCodeEliminator;

impl DeadCodeEliminator {
    /// Create a new dead code eliminator
    pub fn new() -> Self {
        Self
    }

    /// Whether a line starts with a control-flow terminator
    pub fn is_terminator(line: &str) -> bool {
        let line = trim_start(line);
        TERMINATORS.iter().any(|t| line.starts_with(t))
    }
}

impl OptimizationPass for DeadCodeEliminator {
    fn name(&self) -> &str {
        "dead-code-elimination"
    }

    fn description(&self) -> &str {
        "Drops return/break lines that follow an earlier return/break"
    }

    fn optimize(&self, lines: Vec<String>) -> OptimizationResult {
        let mut output = Vec::with_capacity(lines.len());
        let mut terminated = false;
        let mut removed = 0;

        for line in lines {
            let is_terminator = Self::is_terminator(&line);
            if terminated && is_terminator {
                trace!(%line, "dropped unreachable line");
                removed += 1;
                continue;
            }
            terminated |= is_terminator;
            output.push(line);
        }

        OptimizationResult { output, rewrites: removed }
    }
}
