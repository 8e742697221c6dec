//! Markup abbreviations: `ul>li.item$*3`, `a[href=#]{link}`, `(dt+dd)*2`.
//!
//! Parsing produces a fully unrolled tree: groups are flattened into their
//! parent, `*N` repetitions are copied and `$` counters are substituted.
//! Text being wrapped is placed while unrolling.

mod parse;
mod render;


pub(crate) use parse::{parse, wrap};
pub(crate) use render::render;

/// A parsed markup abbreviation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupAbbreviation {
	pub children: Vec<AbbrNode>,
}

/// One element or text node of a markup abbreviation.
///
/// A node with neither name nor attributes is a text node; a node with
/// attributes but no name takes an implicit tag name from its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbrNode {
	pub name: Option<String>,
	/// Attributes in abbreviation order. `#id` and `.class` land here as
	/// `id` and `class`.
	pub attributes: Vec<AbbrAttribute>,
	/// Text content from `{...}`.
	pub value: Option<String>,
	/// Position inside the repetition that produced this node.
	pub repeat: Option<Repeat>,
	/// Written with a trailing `/`.
	pub self_closing: bool,
	/// Wrapped document text, written as is.
	pub wrapped: Option<String>,
	pub children: Vec<AbbrNode>,
}

impl AbbrNode {
	pub fn attribute(&self, name: &str) -> Option<&AbbrAttribute> {
		self.attributes.iter().find(|attr| attr.name == name)
	}

	/// Text nodes have neither a name nor attributes.
	pub fn is_text(&self) -> bool {
		self.name.is_none() && self.attributes.is_empty()
	}

	/// Follows last children down to a leaf.
	pub(crate) fn deepest_last(&mut self) -> &mut AbbrNode {
		if self.children.is_empty() {
			return self;
		}
		let last = self.children.len() - 1;
		self.children[last].deepest_last()
	}
}

/// `name` or `name=value`. A missing value renders as an empty tab stop or,
/// for boolean attributes, as the bare name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbrAttribute {
	pub name: String,
	pub value: Option<String>,
}

/// 1-based `index` of `count` copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeat {
	pub index: usize,
	pub count: usize,
}
