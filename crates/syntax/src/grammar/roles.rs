//! Presentation of grammar nodes under the names in [`crate::kind`].

use tree_sitter::Node as RawNode;

use crate::kind::{markup, stylesheet};
use crate::tree::Layer;

/// How a grammar node appears in the presented tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Role {
	Named(&'static str),
	/// Replaced by its own children.
	Spliced,
	/// Skipped together with its subtree.
	Hidden,
}

/// What a stylesheet error node stands for, judged by where it sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorRole {
	/// Top-level text that never reached a block: selectors.
	Rule,
	/// Text inside a block that did not parse as a declaration.
	Declaration,
}

fn error_role(error: RawNode<'_>) -> Option<ErrorRole> {
	match error.parent().map(|parent| parent.kind()) {
		None | Some("stylesheet") => Some(ErrorRole::Rule),
		Some("block") => Some(ErrorRole::Declaration),
		_ => None,
	}
}

/// Presentation rules for the nodes of one parsed region.
#[derive(Debug, Clone, Copy)]
pub(super) struct View {
	pub layer: Layer,
	/// Nodes starting at or past this byte came from appended closing text.
	pub len: usize,
}

impl View {
	pub fn role(self, node: RawNode<'_>) -> Role {
		let Some(parent) = node.parent() else {
			return Role::Named(match self.layer {
				Layer::Stylesheet => stylesheet::STYLESHEET,
				_ => markup::DOCUMENT,
			});
		};
		if node.is_missing() || node.start_byte() >= self.len {
			return Role::Hidden;
		}
		match self.layer {
			Layer::Stylesheet => stylesheet_role(node, parent),
			_ => markup_role(node, parent),
		}
	}

	fn enter<'t>(self, node: RawNode<'t>, from_end: bool) -> Option<RawNode<'t>> {
		match self.role(node) {
			Role::Named(_) => Some(node),
			Role::Spliced if from_end => self.last_child(node),
			Role::Spliced => self.first_child(node),
			Role::Hidden => None,
		}
	}

	pub fn first_child<'t>(self, node: RawNode<'t>) -> Option<RawNode<'t>> {
		let mut cursor = node.walk();
		let found = node.children(&mut cursor).find_map(|child| self.enter(child, false));
		found
	}

	pub fn last_child<'t>(self, node: RawNode<'t>) -> Option<RawNode<'t>> {
		(0..node.child_count())
			.rev()
			.filter_map(|idx| node.child(idx))
			.find_map(|child| self.enter(child, true))
	}

	pub fn next_sibling<'t>(self, node: RawNode<'t>) -> Option<RawNode<'t>> {
		let mut node = node;
		loop {
			let mut sibling = node.next_sibling();
			while let Some(next) = sibling {
				if let Some(found) = self.enter(next, false) {
					return Some(found);
				}
				sibling = next.next_sibling();
			}
			node = node.parent().filter(|parent| self.role(*parent) == Role::Spliced)?;
		}
	}

	pub fn parent<'t>(self, node: RawNode<'t>) -> Option<RawNode<'t>> {
		let mut parent = node.parent()?;
		while self.role(parent) == Role::Spliced {
			parent = parent.parent()?;
		}
		Some(parent)
	}
}

fn markup_role(node: RawNode<'_>, parent: RawNode<'_>) -> Role {
	let name = match node.kind() {
		"ERROR" if node.child_count() == 0 => markup::TEXT,
		"ERROR" => return Role::Spliced,
		"element" | "script_element" | "style_element" => markup::ELEMENT,
		"start_tag" => markup::OPEN_TAG,
		"end_tag" | "erroneous_end_tag" => markup::CLOSE_TAG,
		"self_closing_tag" => markup::SELF_CLOSING_TAG,
		"tag_name" | "erroneous_end_tag_name" => markup::TAG_NAME,
		"attribute" => markup::ATTRIBUTE,
		"attribute_name" => markup::ATTRIBUTE_NAME,
		"quoted_attribute_value" => markup::ATTRIBUTE_VALUE,
		"attribute_value" if parent.kind() == "attribute" => markup::ATTRIBUTE_VALUE,
		"text" | "entity" => markup::TEXT,
		"comment" => markup::COMMENT,
		"raw_text" => markup::SCRIPT_TEXT,
		_ => return Role::Hidden,
	};
	Role::Named(name)
}

fn stylesheet_role(node: RawNode<'_>, parent: RawNode<'_>) -> Role {
	let kind = node.kind();
	let in_declaration = parent.kind() == "ERROR" && error_role(parent) == Some(ErrorRole::Declaration);
	if kind == "ERROR" && in_declaration {
		return Role::Named(stylesheet::VALUE);
	}
	if kind == "ERROR" {
		return match error_role(node) {
			Some(ErrorRole::Rule) => Role::Named(stylesheet::RULE_SET),
			Some(ErrorRole::Declaration) => Role::Named(stylesheet::DECLARATION),
			None => Role::Spliced,
		};
	}

	if parent.kind() == "ERROR" {
		match error_role(parent) {
			Some(ErrorRole::Rule) if kind == "block" => return Role::Named(stylesheet::BLOCK),
			Some(ErrorRole::Rule) if node.is_named() && kind != "comment" => {
				return Role::Named(stylesheet::SELECTOR);
			}
			Some(ErrorRole::Declaration) if kind == ":" => return Role::Named(stylesheet::COLON),
			Some(ErrorRole::Declaration) if !matches!(kind, ";" | "comment") => {
				let first = parent.named_child(0) == Some(node);
				return Role::Named(if first { stylesheet::PROPERTY_NAME } else { stylesheet::VALUE });
			}
			Some(_) => return Role::Hidden,
			None => {}
		}
	}

	let name = match kind {
		"rule_set" | "keyframe_block" => stylesheet::RULE_SET,
		"selectors" => stylesheet::SELECTOR,
		"from" | "to" | "integer_value" if parent.kind() == "keyframe_block" => stylesheet::SELECTOR,
		"block" | "keyframe_block_list" => stylesheet::BLOCK,
		"declaration" => stylesheet::DECLARATION,
		"property_name" => stylesheet::PROPERTY_NAME,
		":" if parent.kind() == "declaration" => stylesheet::COLON,
		"{" if matches!(parent.kind(), "block" | "keyframe_block_list") => stylesheet::OPEN_BRACE,
		"}" if matches!(parent.kind(), "block" | "keyframe_block_list") => stylesheet::CLOSE_BRACE,
		"important" => stylesheet::IMPORTANT,
		"plain_value" | "color_value" | "integer_value" | "float_value" | "string_value" | "grid_value"
		| "binary_expression" | "parenthesized_value" | "call_expression" => stylesheet::VALUE,
		"at_rule" | "media_statement" | "import_statement" | "charset_statement" | "namespace_statement"
		| "keyframes_statement" | "supports_statement" | "postcss_statement" | "scope_statement" => {
			stylesheet::AT_RULE
		}
		"at_keyword" => stylesheet::AT_KEYWORD,
		"comment" | "js_comment" => stylesheet::COMMENT,
		_ if !node.is_named() && kind.starts_with('@') => stylesheet::AT_KEYWORD,
		_ => return Role::Hidden,
	};
	Role::Named(name)
}
