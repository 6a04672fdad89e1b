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

//! CProbe CLI Tool
//!
//! Main entry point for the cprobe command-line interface.

use anyhow::Result;
use clap::{Parser, Subcommand};
use cprobe_analysis::{Analyzer, Pass, TreeSitterParser};
use cprobe_tools::cli::init_tracing;
use cprobe_tools::{AnalyzeArgs, OptimizeArgs, OutputFormat, ToolConfig, resolve_log_level, run_pass};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "cprobe")]
#[command(about = "CProbe - text-pattern analysis passes for C source")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML); overrides $CPROBE_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format; overrides the configuration file
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for configuration inspection
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Remove line comments and truncate at block comment openers
    StripComments(AnalyzeArgs),
    /// List the distinct tokens of the source
    Tokenize(AnalyzeArgs),
    /// Apply the peephole optimization rules
    Optimize(OptimizeArgs),
    /// Check for a main() function and semicolons
    Validate(AnalyzeArgs),
    /// Lower assignments into three-address IR
    Ir(AnalyzeArgs),
    /// Print the parse tree of a C parser
    Ast(AnalyzeArgs),
    /// Build the function and variable symbol table
    Symbols(AnalyzeArgs),
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ToolConfig::resolve_config(cli.config)?;
    init_tracing(resolve_log_level(cli.verbose, &config)?);
    debug!(?config, "configuration resolved");

    let format = cli.format.unwrap_or(config.output.format);
    let mut optimizer_config = config.optimizer;

    let (pass, args) = match cli.command {
        Commands::StripComments(args) => (Pass::StripComments, args),
        Commands::Tokenize(args) => (Pass::Tokenize, args),
        Commands::Optimize(args) => {
            for rule in &args.disabled {
                rule.disable(&mut optimizer_config);
            }
            (Pass::Optimize, args.analyze)
        }
        Commands::Validate(args) => (Pass::Validate, args),
        Commands::Ir(args) => (Pass::GenerateIr, args),
        Commands::Ast(args) => (Pass::GenerateAst, args),
        Commands::Symbols(args) => (Pass::SymbolTable, args),
        Commands::Config { command: ConfigCommands::Show } => {
            print!("{}", config.to_toml()?);
            return Ok(());
        }
    };

    let analyzer = Analyzer::with_optimizer_config(TreeSitterParser::new(), optimizer_config);
    run_pass(&analyzer, pass, &args, format)
}
