//! Syntax trees parsed with tree-sitter.
//!
//! Markup documents are parsed with the HTML grammar and every `<style>`
//! element gets its own stylesheet parse, mounted below the element's raw
//! text. Grammar node kinds are presented under the names in
//! [`crate::kind`]: kinds without a counterpart are hidden, markup error
//! nodes are spliced into their parent and stylesheet error nodes become
//! the rule or declaration they were meant to be.

mod recover;
mod roles;


use thiserror::Error;
use tracing::trace;
use tree_sitter::{Language, LanguageError, Node as RawNode, Parser};
use zen_primitives::{Range, Rope};

use self::roles::{Role, View};
use crate::kind;
use crate::tree::{Layer, SyntaxNode, SyntaxTree};

#[derive(Error, Debug)]
pub enum SyntaxError {
	#[error("incompatible grammar: {0}")]
	Language(#[from] LanguageError),
	#[error("parser produced no tree")]
	NoTree,
}

/// A parsed span of the document.
#[derive(Debug, Clone)]
struct Region {
	syntax: tree_sitter::Tree,
	layer: Layer,
	/// Byte offset of the region in the document.
	offset: usize,
	/// Byte length of the region. The parser may have seen closing text
	/// past it.
	len: usize,
}

impl Region {
	fn view(&self) -> View {
		View {
			layer: self.layer,
			len: self.len,
		}
	}

	fn recovered(&self) -> bool {
		self.syntax.root_node().end_byte() > self.len
	}
}

fn parser(language: &Language) -> Result<Parser, SyntaxError> {
	let mut parser = Parser::new();
	parser.set_language(language)?;
	Ok(parser)
}

fn parse(parser: &mut Parser, source: &str) -> Result<tree_sitter::Tree, SyntaxError> {
	parser.parse(source, None).ok_or(SyntaxError::NoTree)
}

fn parse_stylesheet(parser: &mut Parser, source: &str, offset: usize) -> Result<Region, SyntaxError> {
	let closing = recover::closing_braces(source);
	let syntax = if closing.is_empty() {
		parse(parser, source)?
	} else {
		parse(parser, format!("{source}{closing}").as_str())?
	};
	Ok(Region {
		syntax,
		layer: Layer::Stylesheet,
		offset,
		len: source.len(),
	})
}

fn parse_markup(parser: &mut Parser, source: &str) -> Result<Region, SyntaxError> {
	let mut syntax = parse(parser, source)?;
	if syntax.root_node().has_error() {
		let closing = recover::closing_tags(syntax.root_node(), source);
		if !closing.is_empty() {
			syntax = parse(parser, format!("{source}{closing}").as_str())?;
		}
	}
	Ok(Region {
		syntax,
		layer: Layer::Markup,
		offset: 0,
		len: source.len(),
	})
}

/// Byte spans of `<style>` element contents.
fn style_contents(region: &Region) -> Vec<(usize, usize)> {
	let mut found = Vec::new();
	let mut cursor = region.syntax.walk();
	loop {
		let node = cursor.node();
		let is_style = node.kind() == "raw_text"
			&& node.parent().is_some_and(|parent| parent.kind() == "style_element");
		if is_style && node.start_byte() < region.len {
			found.push((node.start_byte(), node.end_byte().min(region.len)));
		}
		if cursor.goto_first_child() {
			continue;
		}
		while !cursor.goto_next_sibling() {
			if !cursor.goto_parent() {
				return found;
			}
		}
	}
}

/// An immutable syntax tree for one document revision.
///
/// Positions are character indices into the text the tree was parsed from.
#[derive(Debug, Clone)]
pub struct Tree {
	text: Rope,
	/// The document parse first, then one stylesheet parse per `<style>`
	/// element. Empty for plain documents.
	regions: Vec<Region>,
}

impl Tree {
	/// Parses `text` as markup, mounting a stylesheet tree below the content
	/// of every `<style>` element.
	pub fn markup(text: &str) -> Result<Self, SyntaxError> {
		let host = parse_markup(&mut parser(&tree_sitter_html::LANGUAGE.into())?, text)?;
		let mut regions = Vec::new();
		let styles = style_contents(&host);
		if !styles.is_empty() {
			let mut css = parser(&tree_sitter_css::LANGUAGE.into())?;
			for (from, to) in styles {
				if let Some(source) = text.get(from..to) {
					regions.push(parse_stylesheet(&mut css, source, from)?);
				}
			}
		}
		regions.insert(0, host);

		let tree = Self {
			text: Rope::from(text),
			regions,
		};
		trace!(
			len = text.len(),
			styles = tree.regions.len() - 1,
			recovered = tree.regions[0].recovered(),
			"syntax.markup.parsed"
		);
		Ok(tree)
	}

	/// Parses `text` as a stylesheet.
	pub fn stylesheet(text: &str) -> Result<Self, SyntaxError> {
		let region = parse_stylesheet(&mut parser(&tree_sitter_css::LANGUAGE.into())?, text, 0)?;
		trace!(len = text.len(), recovered = region.recovered(), "syntax.stylesheet.parsed");
		Ok(Self {
			text: Rope::from(text),
			regions: vec![region],
		})
	}

	/// Returns a structureless tree: a single root in no known grammar.
	pub fn plain(text: &str) -> Self {
		Self {
			text: Rope::from(text),
			regions: Vec::new(),
		}
	}

	/// Returns true if either grammar had to recover from invalid input.
	pub fn has_error(&self) -> bool {
		self.regions.iter().any(|region| region.syntax.root_node().has_error())
	}

	fn char_range(&self, from: usize, to: usize) -> Range {
		Range::new(self.text.byte_to_char(from), self.text.byte_to_char(to))
	}

	/// Returns the stylesheet region mounted below `raw`, a node of the
	/// document region.
	fn mounted_at(&self, raw: RawNode<'_>) -> Option<usize> {
		if raw.kind() != "raw_text" {
			return None;
		}
		self.regions
			.iter()
			.skip(1)
			.position(|region| region.offset == raw.start_byte())
			.map(|idx| idx + 1)
	}

	/// Returns the document node a stylesheet region is mounted below.
	fn mount(&self, region: usize) -> Option<RawNode<'_>> {
		let mounted = self.regions.get(region)?;
		self.regions
			.first()?
			.syntax
			.root_node()
			.descendant_for_byte_range(mounted.offset, mounted.offset + mounted.len)
	}
}

impl SyntaxTree for Tree {
	type Node<'a> = Node<'a>;

	fn root(&self) -> Node<'_> {
		Node {
			tree: self,
			raw: self.regions.first().map(|region| (0, region.syntax.root_node())),
		}
	}
}

/// A borrowed handle to a presented node of a [`Tree`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
	tree: &'a Tree,
	/// Region index and grammar node, or `None` for the root of a plain tree.
	raw: Option<(usize, RawNode<'a>)>,
}

impl<'a> Node<'a> {
	fn region(&self, idx: usize) -> &'a Region {
		&self.tree.regions[idx]
	}

	fn at(&self, region: usize, raw: RawNode<'a>) -> Self {
		Self {
			tree: self.tree,
			raw: Some((region, raw)),
		}
	}
}

impl PartialEq for Node<'_> {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.tree, other.tree) && self.raw == other.raw
	}
}

impl Eq for Node<'_> {}

impl std::fmt::Debug for Node<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let range = self.range();
		write!(f, "{}@{}..{}", self.name(), range.from, range.to)
	}
}

impl SyntaxNode for Node<'_> {
	fn name(&self) -> &'static str {
		let Some((idx, raw)) = self.raw else {
			return kind::PLAIN;
		};
		match self.region(idx).view().role(raw) {
			Role::Named(name) => name,
			Role::Spliced | Role::Hidden => raw.kind(),
		}
	}

	fn range(&self) -> Range {
		let Some((idx, raw)) = self.raw else {
			return Range::new(0, self.tree.text.len_chars());
		};
		let region = self.region(idx);
		if raw.parent().is_none() {
			return self.tree.char_range(region.offset, region.offset + region.len);
		}
		let from = raw.start_byte().min(region.len);
		let to = raw.end_byte().min(region.len);
		self.tree.char_range(region.offset + from, region.offset + to)
	}

	fn layer(&self) -> Layer {
		self.raw.map_or(Layer::Other, |(idx, _)| self.region(idx).layer)
	}

	fn parent(&self) -> Option<Self> {
		let (idx, raw) = self.raw?;
		if let Some(parent) = self.region(idx).view().parent(raw) {
			return Some(self.at(idx, parent));
		}
		if idx == 0 {
			return None;
		}
		self.tree.mount(idx).map(|mount| self.at(0, mount))
	}

	fn first_child(&self) -> Option<Self> {
		let (idx, raw) = self.raw?;
		if idx == 0 {
			if let Some(mounted) = self.tree.mounted_at(raw) {
				return Some(self.at(mounted, self.region(mounted).syntax.root_node()));
			}
		}
		self.region(idx).view().first_child(raw).map(|child| self.at(idx, child))
	}

	fn last_child(&self) -> Option<Self> {
		let (idx, raw) = self.raw?;
		if idx == 0 {
			if let Some(mounted) = self.tree.mounted_at(raw) {
				return Some(self.at(mounted, self.region(mounted).syntax.root_node()));
			}
		}
		self.region(idx).view().last_child(raw).map(|child| self.at(idx, child))
	}

	fn next_sibling(&self) -> Option<Self> {
		let (idx, raw) = self.raw?;
		self.region(idx).view().next_sibling(raw).map(|sibling| self.at(idx, sibling))
	}
}
