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

//! Symbol table builder
//!
//! Scans source line by line, emitting records for function headers and
//! `int`/`float`/`char` variable declarations. A single scope cursor is
//! threaded through the scan: it becomes the function's name on a function
//! header line and returns to `global` on a line holding only `}`. Nested
//! scopes are not modeled.

pub mod record;

pub use record::{FunctionSymbol, Parameter, SymbolRecord, SyntheticAddress, VariableSymbol};

use crate::patterns::find_declarations;
use crate::scan::{collect, is_space, is_word_char, is_word_start, run_end, source_lines, space_end, trim, word_end};
use std::fmt;
use tracing::{debug, instrument};

/// Name of the outermost scope
pub const GLOBAL_SCOPE: &str = "global";

/// Active naming context while scanning
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Global,
    Function(String),
}

impl Scope {
    pub fn as_str(&self) -> &str {
        match self {
            Scope::Global => GLOBAL_SCOPE,
            Scope::Function(name) => name.as_str(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A matched `<type> <name>(<params>) {` line
#[derive(Debug, Clone, PartialEq, Eq)]
struct FunctionHeader {
    return_type: String,
    name: String,
    params: String,
}

/// Builds symbol tables from source text
#[derive(Debug, Default, Clone, Copy)]
pub struct SymbolTableBuilder;

impl SymbolTableBuilder {
    /// Create a new symbol table builder
    pub fn new() -> Self {
        Self
    }

    /// Build the symbol table for `text`
    #[instrument(skip_all, fields(len = text.len()))]
    pub fn build(&self, text: &str) -> Vec<SymbolRecord> {
        let (records, _) = source_lines(text).fold((Vec::new(), Scope::Global), |(mut records, scope), line| {
            let scope = self.process_line(trim(line), scope, &mut records);
            (records, scope)
        });

        debug!(records = records.len(), "symbol table built");
        records
    }

    /// Process one trimmed line, returning the scope for the next line
    fn process_line(&self, line: &str, scope: Scope, records: &mut Vec<SymbolRecord>) -> Scope {
        if let Some(header) = match_function_header(line) {
            records.push(SymbolRecord::Function(FunctionSymbol {
                parameters: parse_parameters(&header.params),
                name: header.name.clone(),
                return_type: header.return_type,
                scope: GLOBAL_SCOPE.to_string(),
                address: SyntheticAddress::random(),
            }));
            return Scope::Function(header.name);
        }

        for declaration in find_declarations(line) {
            for declarator in declaration.declarators.split(',') {
                let mut parts = declarator.split('=').map(trim);
                let name = parts.next().unwrap_or_default().to_string();
                let value = parts.next().filter(|v| !v.is_empty()).unwrap_or("undefined").to_string();
                records.push(SymbolRecord::Variable(VariableSymbol {
                    name,
                    data_type: declaration.type_name.to_string(),
                    scope: scope.as_str().to_string(),
                    address: SyntheticAddress::random(),
                    value,
                }));
            }
        }

        if line == "}" { Scope::Global } else { scope }
    }
}

/// Search a line for `<word> <word>(<params>) {`
fn match_function_header(line: &str) -> Option<FunctionHeader> {
    let chars: Vec<char> = line.chars().collect();

    (0..chars.len()).filter(|&pos| is_word_start(&chars, pos)).find_map(|pos| {
        let type_end = word_end(&chars, pos);
        let name_start = space_end(&chars, type_end);
        if name_start == type_end {
            return None;
        }
        let name_end = word_end(&chars, name_start);
        if name_end == name_start || chars.get(name_end) != Some(&'(') {
            return None;
        }
        let params_end = run_end(&chars, name_end + 1, |c| is_word_char(c) || is_space(c) || c == ',');
        if chars.get(params_end) != Some(&')') {
            return None;
        }
        let brace = space_end(&chars, params_end + 1);
        if chars.get(brace) != Some(&'{') {
            return None;
        }

        Some(FunctionHeader {
            return_type: collect(&chars[pos..type_end]),
            name: collect(&chars[name_start..name_end]),
            params: collect(&chars[name_end + 1..params_end]),
        })
    })
}

/// Parse a comma-separated parameter list, silently dropping malformed entries
fn parse_parameters(params: &str) -> Vec<Parameter> {
    params.split(',').filter_map(|param| parse_parameter(trim(param))).collect()
}

/// Find the first `<type> <name>` word pair in a parameter
fn parse_parameter(param: &str) -> Option<Parameter> {
    let chars: Vec<char> = param.chars().collect();

    (0..chars.len()).filter(|&pos| is_word_start(&chars, pos)).find_map(|pos| {
        let type_end = word_end(&chars, pos);
        let name_start = space_end(&chars, type_end);
        let name_end = word_end(&chars, name_start);
        (name_start > type_end && name_end > name_start).then(|| Parameter {
            name: collect(&chars[name_start..name_end]),
            param_type: collect(&chars[pos..type_end]),
        })
    })
}
