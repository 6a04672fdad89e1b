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

//! Tree-sitter backed C parser

use super::{CParser, ExternalNode};
use crate::error::ParserFailure;
use tree_sitter::{Node, Parser};

/// Grammar-aware C parser built on tree-sitter's C grammar
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSitterParser;

impl TreeSitterParser {
    pub fn new() -> Self {
        Self
    }
}

impl CParser for TreeSitterParser {
    fn parse(&self, source: &str) -> Result<ExternalNode, ParserFailure> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_c::LANGUAGE.into())
            .map_err(|e| ParserFailure::new(format!("Failed to load C grammar: {e}")))?;

        let tree = parser.parse(source, None).ok_or_else(|| ParserFailure::new("C parser produced no tree"))?;
        Ok(convert(tree.root_node()))
    }
}

/// Map a tree-sitter node, including anonymous tokens, into an external node
fn convert(node: Node<'_>) -> ExternalNode {
    let mut cursor = node.walk();
    let children = node.children(&mut cursor).map(convert).collect();
    ExternalNode::with_children(node.kind(), children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_declaration() {
        let root = TreeSitterParser::new().parse("int x = 5;").unwrap();
        assert_eq!(root.kind, "translation_unit");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].kind, "declaration");

        let kinds: Vec<_> = root.children[0].children.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(kinds, vec!["primitive_type", "init_declarator", ";"]);
    }

    #[test]
    fn test_function_definition() {
        let root = TreeSitterParser::new().parse("int main() { return 0; }").unwrap();
        assert_eq!(root.children[0].kind, "function_definition");
    }
}
