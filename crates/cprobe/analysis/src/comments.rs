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

//! Comment stripper
//!
//! Drops lines whose trimmed text starts with `//` and truncates the
//! remaining lines at their first `/*`. Block comments spanning lines and
//! trailing `//` comments are left alone.

use crate::scan::{source_lines, trim};

/// Removes simple comments from source text
#[derive(Debug, Default, Clone, Copy)]
pub struct CommentStripper;

impl CommentStripper {
    pub fn new() -> Self {
        Self
    }

    /// Strip comments from `text`
    pub fn strip(&self, text: &str) -> String {
        source_lines(text)
            .filter(|line| !trim(line).starts_with("//"))
            .map(|line| match line.find("/*") {
                Some(start) => &line[..start],
                None => line,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_line_and_block_starts() {
        let source = "// header\nint a; /* note */\n   // indented\nint b;";
        assert_eq!(CommentStripper::new().strip(source), "int a; \nint b;");
    }

    #[test]
    fn test_trailing_line_comment_is_kept() {
        assert_eq!(CommentStripper::new().strip("int a; // keep"), "int a; // keep");
    }

    #[test]
    fn test_byte_order_mark_before_line_comment() {
        assert_eq!(CommentStripper::new().strip("\u{feff}// header\nint a;"), "int a;");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(CommentStripper::new().strip(""), "");
    }
}
