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

//! Configuration for the peephole optimizer

use serde::{Deserialize, Serialize};

/// Per-rule switches for the peephole optimizer.
///
/// Disabled rules are skipped; the remaining rules keep their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Collapse `x = x + 0` and friends into `x = x`
    pub identity_elimination: bool,

    /// Evaluate `integer op integer` substrings
    pub constant_folding: bool,

    /// Rewrite `x = x * 2` and `x = x / 2` as shifts
    pub strength_reduction: bool,

    /// Drop `return`/`break` lines after the first one
    pub dead_code_elimination: bool,

    /// Merge and hoist `int`/`float`/`char` declarations
    pub declaration_hoisting: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::all()
    }
}

impl OptimizerConfig {
    /// Every rule enabled
    pub fn all() -> Self {
        Self {
            identity_elimination: true,
            constant_folding: true,
            strength_reduction: true,
            dead_code_elimination: true,
            declaration_hoisting: true,
        }
    }

    /// Every rule disabled; the optimizer then only trims and drops blank lines
    pub fn none() -> Self {
        Self {
            identity_elimination: false,
            constant_folding: false,
            strength_reduction: false,
            dead_code_elimination: false,
            declaration_hoisting: false,
        }
    }

    /// Only the line-local rewrites
    pub fn line_local() -> Self {
        Self {
            dead_code_elimination: false,
            declaration_hoisting: false,
            ..Self::all()
        }
    }

    /// Number of enabled rules
    pub fn enabled_count(&self) -> usize {
        [
            self.identity_elimination,
            self.constant_folding,
            self.strength_reduction,
            self.dead_code_elimination,
            self.declaration_hoisting,
        ]
        .into_iter()
        .filter(|enabled| *enabled)
        .count()
    }
}
