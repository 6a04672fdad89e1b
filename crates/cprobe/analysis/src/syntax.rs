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

//! Placeholder syntax check
//!
//! Two advisory presence checks with no knowledge of grammar, braces, or
//! statement structure: the text must mention `main()` and contain at
//! least one semicolon.

use serde::{Deserialize, Serialize};

/// Reported when `main()` does not appear in the text
pub const MISSING_MAIN: &str = "Missing 'main()' function.";

/// Reported when the text has no semicolon
pub const MISSING_SEMICOLON: &str = "Missing semicolons in the code.";

/// Outcome of a syntax check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// True when no check failed
    pub is_valid: bool,
    /// One message per failed check
    pub errors: Vec<String>,
}

/// Runs the presence checks
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntaxChecker;

impl SyntaxChecker {
    pub fn new() -> Self {
        Self
    }

    /// Check `text`, collecting a message for each failed check
    pub fn validate(&self, text: &str) -> ValidationReport {
        let mut errors = Vec::new();
        if !text.contains("main()") {
            errors.push(MISSING_MAIN.to_string());
        }
        if !text.contains(';') {
            errors.push(MISSING_SEMICOLON.to_string());
        }
        ValidationReport { is_valid: errors.is_empty(), errors }
    }
}
