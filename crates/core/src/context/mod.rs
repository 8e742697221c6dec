//! Context resolution: what structure surrounds a position.
//!
//! A [`Context`] lists the named matches enclosing a position, outermost
//! first, plus the match the position sits directly inside. Contexts are
//! built fresh for every query from the tree of the current revision.

mod css;
mod html;
mod inline;

#[cfg(test)]
mod tests;

pub use css::css_context;
pub use html::{html_context, tag_attributes, unquoted_value_range};
pub use inline::{InlineProp, inline_css_context, parse_inline_props};
use serde::Serialize;
use zen_primitives::{CharIdx, Range};
use zen_syntax::{Layer, SyntaxTree};

use crate::snapshot::Snapshot;

/// Which part of a tag a markup match covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HtmlKind {
	Open,
	Close,
	SelfClose,
}

/// A tag enclosing or under a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlMatch {
	/// Tag name as written.
	pub name: String,
	#[serde(rename = "type")]
	pub kind: HtmlKind,
	/// Span of the whole tag, `<` to `>`.
	pub range: Range,
}

/// Which part of a rule or declaration a stylesheet match covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CssKind {
	Selector,
	PropertyName,
	PropertyValue,
}

/// A selector, property name or property value enclosing or under a
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CssMatch {
	/// Literal selector, property or value text.
	pub name: String,
	#[serde(rename = "type")]
	pub kind: CssKind,
	pub range: Range,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CssContext {
	/// Enclosing matches, outermost first.
	pub ancestors: Vec<CssMatch>,
	/// The match directly under the position.
	pub current: Option<CssMatch>,
	/// Stylesheet code from a markup `style` attribute.
	pub inline: bool,
	/// Span of the embedded stylesheet code in the host document.
	pub embedded: Option<Range>,
}

impl CssContext {
	/// Returns the innermost ancestor.
	pub fn parent(&self) -> Option<&CssMatch> {
		self.ancestors.last()
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HtmlContext {
	/// Enclosing elements by their open tags, outermost first.
	pub ancestors: Vec<HtmlMatch>,
	/// The tag the position sits inside.
	pub current: Option<HtmlMatch>,
	/// Context inside an inline `style` attribute.
	pub css: Option<CssContext>,
}

impl HtmlContext {
	/// Returns the innermost enclosing element.
	pub fn parent(&self) -> Option<&HtmlMatch> {
		self.ancestors.last()
	}
}

/// A resolved context, tagged by grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Context {
	Html(HtmlContext),
	Css(CssContext),
}

/// Resolves the context at `pos`.
///
/// Markup documents report a stylesheet context inside embedded stylesheet
/// code. Returns `None` when the document is in neither grammar.
pub fn resolve_context<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, pos: CharIdx) -> Option<Context> {
	match snapshot.tree.top_layer() {
		Layer::Markup if snapshot.tree.is_active_at(Layer::Stylesheet, pos) => {
			Some(Context::Css(css_context(snapshot, pos)))
		}
		Layer::Markup => Some(Context::Html(html_context(snapshot, pos))),
		Layer::Stylesheet => Some(Context::Css(css_context(snapshot, pos))),
		Layer::Other => None,
	}
}
