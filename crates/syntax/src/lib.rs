//! Syntax tree access for context resolution.
//!
//! [`SyntaxTree`] and [`SyntaxNode`] describe the read-only traversal the
//! resolver needs from a host parser. [`Tree`] implements them over
//! tree-sitter parses of markup and stylesheet documents.

/// Tree-sitter parses presented as syntax trees.
pub mod grammar;
/// Node type names.
pub mod kind;
/// Traversal traits and resolution bias.
pub mod tree;

pub use grammar::{Node, SyntaxError, Tree};
pub use tree::{Ancestors, Children, Layer, Side, SyntaxNode, SyntaxTree};
