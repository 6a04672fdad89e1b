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

//! Symbol records

use rand::Rng;
use serde::{Serialize, Serializer};
use std::fmt;

/// Upper bound (exclusive) of generated display addresses
const ADDRESS_SPACE: u32 = 100_000_000;

/// Decorative display address attached to every symbol record.
///
/// Drawn at random per record. It bears no relation to any memory layout
/// and is not reproducible between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyntheticAddress(u32);

impl SyntheticAddress {
    /// Draw a fresh random address
    pub fn random() -> Self {
        Self(rand::thread_rng().gen_range(0..ADDRESS_SPACE))
    }

    /// Numeric value of the address
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SyntheticAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl Serialize for SyntheticAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A declared function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

/// A declared function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSymbol {
    pub name: String,
    pub return_type: String,
    /// Always `global`; functions are never nested
    pub scope: String,
    #[serde(rename = "memoryAddress")]
    pub address: SyntheticAddress,
    pub parameters: Vec<Parameter>,
}

/// A declared variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableSymbol {
    pub name: String,
    /// Declared type keyword
    pub data_type: String,
    pub scope: String,
    #[serde(rename = "memoryAddress")]
    pub address: SyntheticAddress,
    /// Textual initializer, or `undefined` when absent
    pub value: String,
}

/// A structured fact about a declared function or variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SymbolRecord {
    Function(FunctionSymbol),
    Variable(VariableSymbol),
}

impl SymbolRecord {
    /// Declared name
    pub fn name(&self) -> &str {
        match self {
            SymbolRecord::Function(f) => &f.name,
            SymbolRecord::Variable(v) => &v.name,
        }
    }

    /// Scope the symbol was declared in
    pub fn scope(&self) -> &str {
        match self {
            SymbolRecord::Function(f) => &f.scope,
            SymbolRecord::Variable(v) => &v.scope,
        }
    }

    /// Display address of the record
    pub fn address(&self) -> SyntheticAddress {
        match self {
            SymbolRecord::Function(f) => f.address,
            SymbolRecord::Variable(v) => v.address,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionSymbol> {
        match self {
            SymbolRecord::Function(f) => Some(f),
            SymbolRecord::Variable(_) => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableSymbol> {
        match self {
            SymbolRecord::Variable(v) => Some(v),
            SymbolRecord::Function(_) => None,
        }
    }
}
