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

//! Optimization pipeline that runs a fixed sequence of passes

use crate::optimizer::framework::metrics::{OptimizationMetrics, PassMetrics};
use crate::optimizer::framework::pass::OptimizationPass;
use tracing::debug;

/// Core optimization pipeline that runs a series of passes in registration order
#[derive(Default)]
pub struct OptimizationPipeline {
    passes: Vec<Box<dyn OptimizationPass>>,
}

impl OptimizationPipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Add an optimization pass to the end of the pipeline
    pub fn add_pass<P>(&mut self, pass: P)
    where
        P: OptimizationPass + 'static,
    {
        self.passes.push(Box::new(pass));
    }

    /// Names of the registered passes, in execution order
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Execute all passes on the given lines
    pub fn run(&self, lines: Vec<String>) -> (Vec<String>, OptimizationMetrics) {
        let mut metrics = OptimizationMetrics {
            lines_in: lines.len(),
            ..Default::default()
        };

        let mut current = lines;
        for pass in &self.passes {
            let result = pass.optimize(current);
            debug!(pass = pass.name(), rewrites = result.rewrites, "pass complete");
            metrics.record_pass(PassMetrics {
                pass_name: pass.name().to_string(),
                rewrites: result.rewrites,
                changed: result.changed(),
            });
            current = result.output;
        }

        metrics.lines_out = current.len();
        (current, metrics)
    }
}
