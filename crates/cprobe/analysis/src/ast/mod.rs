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

//! AST bridge
//!
//! Parsing is delegated to an external grammar-aware C parser behind the
//! [`CParser`] trait. The bridge owns no grammar knowledge: it rejects blank
//! input and reshapes the parser's tree into a generic [`LabeledTree`],
//! preserving child order and depth exactly.

#[cfg(feature = "c-grammar")]
pub mod tree_sitter;

#[cfg(feature = "c-grammar")]
pub use self::tree_sitter::TreeSitterParser;

use crate::error::{AnalysisError, AnalysisResult, ParserFailure};
use crate::scan::trim;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A parse node as produced by an external parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalNode {
    /// Grammar rule or token name
    pub kind: String,
    /// Child nodes in source order
    pub children: Vec<ExternalNode>,
}

impl ExternalNode {
    /// Create a node with no children
    pub fn leaf(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with the given children
    pub fn with_children(kind: impl Into<String>, children: Vec<ExternalNode>) -> Self {
        Self { kind: kind.into(), children }
    }
}

/// Interface to an external grammar-aware C parser
#[cfg_attr(test, mockall::automock)]
pub trait CParser {
    /// Parse source text into a tree of nodes
    fn parse(&self, source: &str) -> Result<ExternalNode, ParserFailure>;
}

/// Generic labeled tree handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledTree {
    /// Grammar rule or token name
    pub name: String,
    /// Mapped children in source order
    pub children: Vec<LabeledTree>,
}

impl LabeledTree {
    /// Total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(LabeledTree::node_count).sum::<usize>()
    }

    /// Length of the longest root-to-leaf path, counting nodes
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(LabeledTree::depth).max().unwrap_or(0)
    }
}

impl From<ExternalNode> for LabeledTree {
    fn from(node: ExternalNode) -> Self {
        Self {
            name: node.kind,
            children: node.children.into_iter().map(LabeledTree::from).collect(),
        }
    }
}

/// Bridges an external parser to the labeled-tree shape
pub struct AstBridge<P> {
    parser: P,
}

impl<P: CParser> AstBridge<P> {
    /// Create a bridge over the given parser
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Access the underlying parser
    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Parse `text` and reshape the result into a labeled tree
    #[instrument(skip_all, fields(len = text.len()))]
    pub fn build_tree(&self, text: &str) -> AnalysisResult<LabeledTree> {
        if trim(text).is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let root = self.parser.parse(text)?;
        let tree = LabeledTree::from(root);
        debug!(nodes = tree.node_count(), depth = tree.depth(), root = %tree.name, "AST built");
        Ok(tree)
    }
}
