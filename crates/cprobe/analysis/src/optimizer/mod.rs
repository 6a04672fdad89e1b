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

//! Peephole optimizer for C-like source text
//!
//! The optimizer trims every line, drops blank lines, then runs a fixed
//! sequence of rewrite passes:
//!
//! 1. identity elimination (line-local)
//! 2. constant folding (line-local)
//! 3. strength reduction (line-local)
//! 4. dead code elimination (whole program)
//! 5. declaration hoisting (whole program)
//!
//! Malformed input simply fails to match and passes through unchanged.

pub mod config;
pub mod framework;
pub mod passes;

pub use config::OptimizerConfig;
pub use framework::metrics::{OptimizationMetrics, PassMetrics};

use crate::optimizer::framework::pipeline::OptimizationPipeline;
use crate::optimizer::passes::{ConstantFolder, DeadCodeEliminator, DeclarationHoister, IdentityEliminator, StrengthReducer};
use crate::scan::{source_lines, trim};
use serde::Serialize;
use tracing::{debug, instrument};

/// Result of one optimizer run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizedProgram {
    /// Transformed source text
    pub code: String,
    /// Metrics recorded by the pipeline
    pub metrics: OptimizationMetrics,
}

/// Main optimizer that coordinates all rewrite passes
pub struct PeepholeOptimizer {
    config: OptimizerConfig,
    pipeline: OptimizationPipeline,
}

impl Default for PeepholeOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PeepholeOptimizer {
    /// Create an optimizer with every rule enabled
    pub fn new() -> Self {
        Self::with_config(OptimizerConfig::default())
    }

    /// Create an optimizer with the given rule selection
    pub fn with_config(config: OptimizerConfig) -> Self {
        let mut pipeline = OptimizationPipeline::new();
        // Register passes in pipeline order
        if config.identity_elimination {
            pipeline.add_pass(IdentityEliminator::new());
        }
        if config.constant_folding {
            pipeline.add_pass(ConstantFolder::new());
        }
        if config.strength_reduction {
            pipeline.add_pass(StrengthReducer::new());
        }
        if config.dead_code_elimination {
            pipeline.add_pass(DeadCodeEliminator::new());
        }
        if config.declaration_hoisting {
            pipeline.add_pass(DeclarationHoister::new());
        }
        Self { config, pipeline }
    }

    /// Active configuration
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Names of the passes this optimizer runs, in order
    pub fn pass_names(&self) -> Vec<&str> {
        self.pipeline.pass_names()
    }

    /// Optimize source text
    pub fn optimize(&self, text: &str) -> String {
        self.run(text).code
    }

    /// Optimize source text, keeping the pipeline metrics
    #[instrument(skip_all, fields(len = text.len()))]
    pub fn run(&self, text: &str) -> OptimizedProgram {
        let lines: Vec<String> = source_lines(text).map(trim).filter(|line| !line.is_empty()).map(str::to_string).collect();

        let (lines, metrics) = self.pipeline.run(lines);
        debug!(
            lines_in = metrics.lines_in,
            lines_out = metrics.lines_out,
            rewrites = metrics.total_rewrites(),
            "optimization complete"
        );

        OptimizedProgram { code: lines.join("\n"), metrics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_and_folding() {
        let optimizer = PeepholeOptimizer::new();
        assert_eq!(optimizer.optimize("x = x + 0;\n1 + 2;"), "x = x;\n3;");
    }

    #[test]
    fn test_strength_reduction() {
        assert_eq!(PeepholeOptimizer::new().optimize("x = x * 2;"), "x = x << 1;");
    }

    #[test]
    fn test_trims_and_drops_blank_lines() {
        assert_eq!(PeepholeOptimizer::new().optimize("  a = b;  \n\n   \n\tc = d;"), "a = b;\nc = d;");
        assert_eq!(PeepholeOptimizer::new().optimize(""), "");
    }

    #[test]
    fn test_byte_order_mark_is_trimmed() {
        assert_eq!(PeepholeOptimizer::new().optimize("\u{feff}x = x + 0;"), "x = x;");
        assert_eq!(PeepholeOptimizer::new().optimize("\u{feff}\n\u{a0}\nreturn 1;\n\u{feff}return 2;"), "return 1;");
    }

    #[test]
    fn test_full_program() {
        let source = "int main() {\nint a = 2 * 3;\nint b;\nb = b * 1;\nreturn a;\nreturn b;\n}";
        let program = PeepholeOptimizer::new().run(source);
        assert_eq!(program.code, "int a = 6, b;\nint main() {\nb = b;\nreturn a;\n}");
        assert_eq!(program.metrics.lines_in, 7);
        assert_eq!(program.metrics.lines_out, 5);
        assert_eq!(program.metrics.rewrites_for("dead-code-elimination"), Some(1));
    }

    #[test]
    fn test_pass_order_follows_config() {
        let optimizer = PeepholeOptimizer::new();
        assert_eq!(
            optimizer.pass_names(),
            vec!["identity-elimination", "constant-folding", "strength-reduction", "dead-code-elimination", "declaration-hoisting"]
        );

        let optimizer = PeepholeOptimizer::with_config(OptimizerConfig {
            constant_folding: false,
            ..OptimizerConfig::all()
        });
        assert_eq!(optimizer.optimize("a = 1 + 2;"), "a = 1 + 2;");
        assert_eq!(optimizer.pass_names().len(), 4);
    }

    #[test]
    fn test_disabled_optimizer_only_normalizes_lines() {
        let optimizer = PeepholeOptimizer::with_config(OptimizerConfig::none());
        assert_eq!(optimizer.optimize(" int a; \n\nx = x * 2;"), "int a;\nx = x * 2;");
    }
}
