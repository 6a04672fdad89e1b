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

//! CProbe Tools Library
//!
//! Command-line tooling that runs the CProbe analysis passes over C source
//! files and prints their results.

pub mod cli;

pub use cli::analyze::{AnalyzeArgs, Input, InputResult, OptimizeArgs, OptimizerRule, analyze_inputs, print_results, render, run_pass};
pub use cli::config::{OutputFormat, ToolConfig, resolve_log_level};
