use indexmap::IndexMap;
use zen_primitives::{CharIdx, Range};
use zen_syntax::kind::markup::{
	ATTRIBUTE, ATTRIBUTE_NAME, ATTRIBUTE_VALUE, CLOSE_TAG, ELEMENT, OPEN_TAG, SELF_CLOSING_TAG, TAG_NAME,
};
use zen_syntax::{Side, SyntaxNode, SyntaxTree};

use super::inline::inline_css_context;
use super::{HtmlContext, HtmlKind, HtmlMatch};
use crate::snapshot::Snapshot;

fn html_kind(name: &str) -> Option<HtmlKind> {
	match name {
		OPEN_TAG => Some(HtmlKind::Open),
		CLOSE_TAG => Some(HtmlKind::Close),
		SELF_CLOSING_TAG => Some(HtmlKind::SelfClose),
		_ => None,
	}
}

/// Builds the markup context at `pos`.
///
/// A tag node the position sits inside becomes `current` and its element is
/// not repeated as an ancestor. Every other enclosing element is an
/// ancestor through its open tag.
pub fn html_context<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, pos: CharIdx) -> HtmlContext {
	let mut ctx = HtmlContext::default();

	let mut node = Some(snapshot.tree.resolve(pos, Side::Around));
	while let Some(current) = node {
		let mut next = current.parent();
		if let Some(kind) = html_kind(current.name()) {
			if let Some(name) = tag_name(snapshot, current) {
				ctx.current = Some(HtmlMatch {
					name,
					kind,
					range: current.range(),
				});
				next = next.and_then(|element| element.parent());
			}
		} else if current.is(ELEMENT) {
			if let Some(open) = current.child(OPEN_TAG) {
				if let Some(name) = tag_name(snapshot, open) {
					ctx.ancestors.push(HtmlMatch {
						name,
						kind: HtmlKind::Open,
						range: open.range(),
					});
				}
			}
		}
		node = next;
	}

	ctx.ancestors.reverse();
	ctx.css = detect_inline_css(snapshot, pos, &ctx);
	ctx
}

fn tag_name<'t, T: SyntaxTree>(snapshot: &Snapshot<'t, T>, tag: T::Node<'t>) -> Option<String> {
	tag.child(TAG_NAME).map(|name| snapshot.slice(name.range()))
}

/// Finds a `style` attribute of the current open tag whose value holds
/// `pos` and resolves the inline stylesheet context inside it.
fn detect_inline_css<T: SyntaxTree>(
	snapshot: &Snapshot<'_, T>,
	pos: CharIdx,
	ctx: &HtmlContext,
) -> Option<super::CssContext> {
	let current = ctx.current.as_ref().filter(|m| m.kind == HtmlKind::Open)?;
	let open = snapshot
		.tree
		.resolve(current.range.from, Side::After)
		.ancestors()
		.find(|node| node.is(OPEN_TAG))?;

	for attr in open.children().filter(|node| node.is(ATTRIBUTE)) {
		if attr.from() > pos {
			break;
		}
		if !attr.range().contains_pos(pos) {
			continue;
		}
		let is_style = attr
			.child(ATTRIBUTE_NAME)
			.is_some_and(|name| snapshot.slice(name.range()).eq_ignore_ascii_case("style"));
		if !is_style {
			continue;
		}
		let Some(value) = attr.child(ATTRIBUTE_VALUE) else {
			continue;
		};
		let clean = unquoted_value_range(snapshot, value.range());
		if clean.contains_pos(pos) {
			return Some(inline_css_context(&snapshot.slice(clean), pos - clean.from, clean.from));
		}
	}
	None
}

/// Strips one quote from each end of an attribute value span, or the braces
/// of an expression value.
///
/// An unterminated quoted value only loses its opening quote.
pub fn unquoted_value_range<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, range: Range) -> Range {
	let first = snapshot.char_at(range.from);
	let last = range.to.checked_sub(1).and_then(|end| snapshot.char_at(end));
	let mut clean = range;

	match first {
		Some(quote @ ('"' | '\'')) => {
			clean.from += 1;
			if range.len() > 1 && last == Some(quote) {
				clean.to -= 1;
			}
		}
		Some('{') if range.len() > 1 && last == Some('}') => {
			clean.from += 1;
			clean.to -= 1;
		}
		_ => {}
	}
	clean
}

/// Returns the attributes of a tag node, mapping bare attributes to `None`.
pub fn tag_attributes<'t, T: SyntaxTree>(
	snapshot: &Snapshot<'t, T>,
	tag: T::Node<'t>,
) -> IndexMap<String, Option<String>> {
	tag.children()
		.filter(|node| node.is(ATTRIBUTE))
		.filter_map(|attr| {
			let name = attr.child(ATTRIBUTE_NAME)?;
			let value = attr
				.child(ATTRIBUTE_VALUE)
				.map(|value| snapshot.slice(unquoted_value_range(snapshot, value.range())));
			Some((snapshot.slice(name.range()), value))
		})
		.collect()
}
