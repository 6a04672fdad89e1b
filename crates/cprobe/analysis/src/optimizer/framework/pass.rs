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

//! Optimization pass interface

/// Trait representing a single rewrite pass over a program's lines
pub trait OptimizationPass: Send + Sync {
    /// Unique name of the pass
    fn name(&self) -> &str;
    /// Short description of the pass
    fn description(&self) -> &str;
    /// Run the pass, returning the transformed lines and what changed
    fn optimize(&self, lines: Vec<String>) -> OptimizationResult;
}

/// Result of running an optimization pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationResult {
    /// Transformed lines
    pub output: Vec<String>,
    /// Number of rewrites (replacements, removals, merges) applied
    pub rewrites: usize,
}

impl OptimizationResult {
    /// Whether the pass changed its input
    pub fn changed(&self) -> bool {
        self.rewrites > 0
    }
}

/// Apply a line-local rewrite to every line.
///
/// `rewrite` returns the new line and the number of replacements it made.
pub fn rewrite_lines<F>(lines: Vec<String>, rewrite: F) -> OptimizationResult
where
    F: Fn(&str) -> (String, usize),
{
    let mut rewrites = 0;
    let output = lines
        .into_iter()
        .map(|line| {
            let (rewritten, count) = rewrite(&line);
            rewrites += count;
            rewritten
        })
        .collect();

    OptimizationResult { output, rewrites }
}
