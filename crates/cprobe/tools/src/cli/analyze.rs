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

//! Pass subcommands
//!
//! Each input is read whole and analyzed independently. Inputs are processed
//! in parallel; results are printed in the order the inputs were given.

use crate::cli::config::OutputFormat;
use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use cprobe_analysis::{Analyzer, CParser, LabeledTree, OptimizerConfig, Pass, PassOutput, SymbolRecord};
use rayon::prelude::*;
use std::fmt::{self, Write as _};
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Arguments shared by every pass subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Source files to analyze; reads stdin when none are given or for `-`
    pub inputs: Vec<PathBuf>,
}

/// Arguments for the optimize subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub analyze: AnalyzeArgs,

    /// Disable an optimization rule (repeatable)
    #[arg(long = "disable", value_enum)]
    pub disabled: Vec<OptimizerRule>,
}

/// Optimization rule names as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptimizerRule {
    Identity,
    Folding,
    Strength,
    DeadCode,
    Hoisting,
}

impl OptimizerRule {
    /// Turn this rule off in `config`
    pub fn disable(self, config: &mut OptimizerConfig) {
        match self {
            OptimizerRule::Identity => config.identity_elimination = false,
            OptimizerRule::Folding => config.constant_folding = false,
            OptimizerRule::Strength => config.strength_reduction = false,
            OptimizerRule::DeadCode => config.dead_code_elimination = false,
            OptimizerRule::Hoisting => config.declaration_hoisting = false,
        }
    }
}

/// A source of program text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Map command-line paths to inputs, treating `-` and an empty list as stdin
    pub fn from_args(paths: &[PathBuf]) -> Vec<Input> {
        if paths.is_empty() {
            return vec![Input::Stdin];
        }
        paths
            .iter()
            .map(|path| if path.as_os_str() == "-" { Input::Stdin } else { Input::File(path.clone()) })
            .collect()
    }

    pub fn name(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Input::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text).context("Failed to read stdin")?;
                Ok(text)
            }
            Input::File(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

/// Name and rendered result (or failure) of one analyzed input
pub type InputResult = (String, Result<String>);

/// Run `pass` over every input and print the results
pub fn run_pass<P>(analyzer: &Analyzer<P>, pass: Pass, args: &AnalyzeArgs, format: OutputFormat) -> Result<()>
where
    P: CParser + Sync,
{
    let results = analyze_inputs(analyzer, pass, &Input::from_args(&args.inputs), format)?;
    print_results(results, format)
}

/// Run `pass` over every input in parallel, returning results in input order
pub fn analyze_inputs<P>(analyzer: &Analyzer<P>, pass: Pass, inputs: &[Input], format: OutputFormat) -> Result<Vec<InputResult>>
where
    P: CParser + Sync,
{
    if inputs.iter().filter(|input| **input == Input::Stdin).count() > 1 {
        bail!("stdin can only be read once");
    }

    // Read stdin up front so the parallel section only touches files.
    let sources: Vec<(String, Result<String>)> = inputs.iter().map(|input| (input.name(), input.read())).collect();
    info!(pass = %pass, inputs = sources.len(), "running pass");

    Ok(sources
        .into_par_iter()
        .map(|(name, text)| {
            let result = text.and_then(|text| {
                let output = analyzer.run(pass, &text).with_context(|| format!("{name}: {pass} failed"))?;
                debug!(input = %name, "pass finished");
                render(&output, format)
            });
            (name, result)
        })
        .collect())
}

/// Print successful results to stdout and failures to stderr.
///
/// Fails when any input failed.
pub fn print_results(results: Vec<InputResult>, format: OutputFormat) -> Result<()> {
    let total = results.len();
    let mut failures = 0;

    for (name, result) in results {
        match result {
            Ok(rendered) => {
                if total > 1 && format == OutputFormat::Text {
                    println!("==> {name} <==");
                }
                println!("{rendered}");
            }
            Err(err) => {
                failures += 1;
                error!("{err:#}");
                eprintln!("error: {err:#}");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {total} inputs failed");
    }
    Ok(())
}

/// Render one pass result in the requested format
pub fn render(output: &PassOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(output).context("Failed to encode result"),
        OutputFormat::Pretty => serde_json::to_string_pretty(output).context("Failed to encode result"),
        OutputFormat::Text => render_text(output),
    }
}

fn render_text(output: &PassOutput) -> Result<String> {
    let text = match output {
        PassOutput::ProcessedCode { processed_code } => processed_code.clone(),
        PassOutput::OptimizedCode { optimized_code } => optimized_code.clone(),
        PassOutput::Tokens { tokens } => tokens.iter().map(|t| format!("{}\t{}", t.token_type, t.value)).collect::<Vec<_>>().join("\n"),
        PassOutput::Validation(report) if report.is_valid => "valid".to_string(),
        PassOutput::Validation(report) => report.errors.join("\n"),
        PassOutput::Ir { ir } => ir.join("\n"),
        PassOutput::Ast { ast } => {
            let mut out = String::new();
            write_tree(&mut out, ast, 0).context("Failed to render tree")?;
            out.trim_end().to_string()
        }
        PassOutput::SymbolTable { symbol_table } => symbol_table.iter().map(symbol_line).collect::<Vec<_>>().join("\n"),
    };
    Ok(text)
}

fn write_tree(out: &mut String, node: &LabeledTree, depth: usize) -> fmt::Result {
    writeln!(out, "{:indent$}{}", "", node.name, indent = depth * 2)?;
    for child in &node.children {
        write_tree(out, child, depth + 1)?;
    }
    Ok(())
}

fn symbol_line(record: &SymbolRecord) -> String {
    match record {
        SymbolRecord::Function(f) => {
            let params = f.parameters.iter().map(|p| format!("{} {}", p.param_type, p.name)).collect::<Vec<_>>().join(", ");
            format!("function\t{} {}({})\t{}\t{}", f.return_type, f.name, params, f.scope, f.address)
        }
        SymbolRecord::Variable(v) => format!("variable\t{} {} = {}\t{}\t{}", v.data_type, v.name, v.value, v.scope, v.address),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cprobe_analysis::{ExternalNode, Token, TokenType, ValidationReport};
    use test_case::test_case;

    #[test]
    fn test_inputs_default_to_stdin() {
        assert_eq!(Input::from_args(&[]), vec![Input::Stdin]);
        assert_eq!(
            Input::from_args(&[PathBuf::from("a.c"), PathBuf::from("-")]),
            vec![Input::File(PathBuf::from("a.c")), Input::Stdin]
        );
    }

    #[test]
    fn test_disable_rules() {
        let mut config = OptimizerConfig::all();
        OptimizerRule::Folding.disable(&mut config);
        OptimizerRule::Hoisting.disable(&mut config);
        assert_eq!(config.enabled_count(), 3);
        assert!(!config.constant_folding);
        assert!(!config.declaration_hoisting);
    }

    #[test_case(OutputFormat::Json, r#"{"ir":["t1 = a","y = t1"]}"#; "json")]
    #[test_case(OutputFormat::Text, "t1 = a\ny = t1"; "text")]
    fn test_render_ir(format: OutputFormat, expected: &str) {
        let output = PassOutput::Ir {
            ir: vec!["t1 = a".to_string(), "y = t1".to_string()],
        };
        assert_eq!(render(&output, format).unwrap(), expected);
    }

    #[test]
    fn test_render_text_tokens_and_validation() {
        let tokens = PassOutput::Tokens {
            tokens: vec![Token::new(TokenType::Keyword, "int"), Token::new(TokenType::SpecialSymbol, ";")],
        };
        assert_eq!(render_text(&tokens).unwrap(), "Keyword\tint\nSpecial Symbol\t;");

        let report = PassOutput::Validation(ValidationReport {
            is_valid: false,
            errors: vec!["Missing semicolons in the code.".to_string()],
        });
        assert_eq!(render_text(&report).unwrap(), "Missing semicolons in the code.");
    }

    #[test]
    fn test_render_text_ast_indents_children() {
        let ast = PassOutput::Ast {
            ast: LabeledTree::from(ExternalNode::with_children("root", vec![ExternalNode::with_children("child", vec![ExternalNode::leaf("leaf")])])),
        };
        assert_eq!(render_text(&ast).unwrap(), "root\n  child\n    leaf");
    }
}
