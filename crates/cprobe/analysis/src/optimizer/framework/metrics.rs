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

//! Optimization metrics

use serde::Serialize;

/// Metrics for a single pass invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassMetrics {
    /// Name of the pass
    pub pass_name: String,
    /// Rewrites applied by the pass
    pub rewrites: usize,
    /// Whether the pass reported a change
    pub changed: bool,
}

/// Optimization metrics recorded by the pipeline for one run
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationMetrics {
    /// Per-pass metrics summary
    pub pass_metrics: Vec<PassMetrics>,
    /// Total number of passes executed
    pub total_passes: usize,
    /// Non-empty lines entering the pipeline
    pub lines_in: usize,
    /// Lines leaving the pipeline
    pub lines_out: usize,
}

impl OptimizationMetrics {
    /// Record metrics for a completed pass
    pub fn record_pass(&mut self, metrics: PassMetrics) {
        self.pass_metrics.push(metrics);
        self.total_passes += 1;
    }

    /// Total rewrites across all passes
    pub fn total_rewrites(&self) -> usize {
        self.pass_metrics.iter().map(|m| m.rewrites).sum()
    }

    /// Rewrites applied by the named pass, if it ran
    pub fn rewrites_for(&self, pass_name: &str) -> Option<usize> {
        self.pass_metrics.iter().find(|m| m.pass_name == pass_name).map(|m| m.rewrites)
    }

    /// Fraction of input lines eliminated
    pub fn reduction_ratio(&self) -> f64 {
        if self.lines_in == 0 {
            0.0
        } else {
            self.lines_in.saturating_sub(self.lines_out) as f64 / self.lines_in as f64
        }
    }
}
