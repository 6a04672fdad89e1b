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

//! C-shaped line patterns shared by the optimizer and the symbol table builder

use crate::scan::{collect, is_space, is_word_boundary_after, is_word_char, is_word_start, run_end, space_end, starts_with_at, starts_with_str, word_end};

/// Type keywords recognized in declarations
pub const DECLARATION_TYPES: [&str; 3] = ["int", "float", "char"];

/// A matched `<type> <declarator-list>;` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declared type keyword
    pub type_name: &'static str,
    /// Raw declarator list between the type and the `;`
    pub declarators: String,
    /// Index just past the terminating `;`
    pub end: usize,
}

/// Match a declaration starting exactly at `pos`.
///
/// The declarator list is a run of word characters, commas, `=` and
/// whitespace. It normally starts after all whitespace following the type,
/// but when the list is only whitespace the last space char becomes the list.
pub fn match_declaration(chars: &[char], pos: usize) -> Option<Declaration> {
    let type_name = DECLARATION_TYPES.into_iter().find(|t| starts_with_str(chars, pos, t))?;
    let ws_start = pos + type_name.len();
    let ws_end = space_end(chars, ws_start);
    let spaces = ws_end - ws_start;
    if spaces == 0 {
        return None;
    }

    let list_end = run_end(chars, ws_end, |c| is_word_char(c) || is_space(c) || c == ',' || c == '=');
    if chars.get(list_end) != Some(&';') {
        return None;
    }

    let list_start = if list_end > ws_end {
        ws_end
    } else if spaces >= 2 {
        list_end - 1
    } else {
        return None;
    };

    Some(Declaration {
        type_name,
        declarators: collect(&chars[list_start..list_end]),
        end: list_end + 1,
    })
}

/// Find every word-bounded declaration in a line, left to right
pub fn find_declarations(line: &str) -> Vec<Declaration> {
    let chars: Vec<char> = line.chars().collect();
    let mut found = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if is_word_start(&chars, pos)
            && let Some(declaration) = match_declaration(&chars, pos)
        {
            pos = declaration.end;
            found.push(declaration);
            continue;
        }
        pos += 1;
    }

    found
}

/// A matched `name = name <op> <operand>` self-assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfAssignment {
    /// Assigned name
    pub name: String,
    /// Operator found between the name and the operand
    pub operator: char,
    /// Index just past the operand
    pub end: usize,
}

/// Match `name = name <op> <operand>` at `pos`.
///
/// The name must start a word, and the operand must not be followed by a
/// word character.
pub fn match_self_assignment(chars: &[char], pos: usize, operators: &[char], operand: &str) -> Option<SelfAssignment> {
    if !is_word_start(chars, pos) {
        return None;
    }
    let name_end = word_end(chars, pos);
    let eq = space_end(chars, name_end);
    if chars.get(eq) != Some(&'=') {
        return None;
    }

    let name = &chars[pos..name_end];
    let rhs = space_end(chars, eq + 1);
    if !starts_with_at(chars, rhs, name) {
        return None;
    }

    let op_pos = space_end(chars, rhs + name.len());
    let operator = *chars.get(op_pos)?;
    if !operators.contains(&operator) {
        return None;
    }

    let operand_pos = space_end(chars, op_pos + 1);
    if !starts_with_str(chars, operand_pos, operand) {
        return None;
    }
    let end = operand_pos + operand.chars().count();
    if !is_word_boundary_after(chars, end) {
        return None;
    }

    Some(SelfAssignment {
        name: collect(name),
        operator,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_declaration_list() {
        let decl = match_declaration(&chars("int a = 1, b;"), 0).unwrap();
        assert_eq!(decl.type_name, "int");
        assert_eq!(decl.declarators, "a = 1, b");
        assert_eq!(decl.end, 13);
    }

    #[test]
    fn test_declaration_requires_space_and_semicolon() {
        assert!(match_declaration(&chars("intx;"), 0).is_none());
        assert!(match_declaration(&chars("int x = a + b;"), 0).is_none());
        assert!(match_declaration(&chars("int ;"), 0).is_none());
    }

    #[test]
    fn test_whitespace_only_declarator_list() {
        let decl = match_declaration(&chars("char  ;"), 0).unwrap();
        assert_eq!(decl.declarators, " ");
    }

    #[test]
    fn test_find_declarations_is_word_bounded() {
        let found = find_declarations("print x; int a; char c = 1;");
        let lists: Vec<_> = found.iter().map(|d| (d.type_name, d.declarators.as_str())).collect();
        assert_eq!(lists, vec![("int", "a"), ("char", "c = 1")]);
    }

    #[test]
    fn test_self_assignment() {
        let line = chars("x = x + 0;");
        let m = match_self_assignment(&line, 0, &['+', '-'], "0").unwrap();
        assert_eq!(m.name, "x");
        assert_eq!(m.operator, '+');
        assert_eq!(m.end, 9);
    }

    #[test]
    fn test_self_assignment_rejects_other_names_and_operands() {
        assert!(match_self_assignment(&chars("x = y + 0"), 0, &['+'], "0").is_none());
        assert!(match_self_assignment(&chars("x = xy + 0"), 0, &['+'], "0").is_none());
        assert!(match_self_assignment(&chars("x = x + 05"), 0, &['+'], "0").is_none());
        assert!(match_self_assignment(&chars("ax = x + 0"), 1, &['+'], "0").is_none());
    }
}
