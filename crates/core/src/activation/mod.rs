//! Activation-context classifier: may an abbreviation start here, and with
//! which expansion settings?

mod output;

#[cfg(test)]
mod tests;

pub use output::output_options;
use tracing::trace;
use zen_abbrev::{
	AbbreviationConfig, AbbreviationContext, AbbreviationType, SCOPE_GLOBAL, SCOPE_PROPERTY, SCOPE_SECTION, Syntax,
};
use zen_primitives::CharIdx;
use zen_syntax::kind::markup::OPEN_TAG;
use zen_syntax::{Layer, Side, SyntaxNode, SyntaxTree};

use crate::context::{CssContext, CssKind, HtmlContext, css_context, html_context, tag_attributes};
use crate::snapshot::Snapshot;

/// Returns the expansion settings for an abbreviation starting at `pos`, or
/// `None` when the position is not a legal start.
///
/// Stylesheet positions allow abbreviations outside any match, in property
/// names and values, and as the first character of a fresh selector.
/// HTML positions allow them between tags only. Other markup syntaxes
/// always allow them.
pub fn activation_context<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, pos: CharIdx) -> Option<AbbreviationConfig> {
	if snapshot.tree.is_active_at(Layer::Stylesheet, pos) {
		return css_activation(snapshot, pos, &css_context(snapshot, pos));
	}

	let syntax = snapshot.config.syntax;
	if !syntax.is_html() {
		return Some(AbbreviationConfig {
			syntax,
			kind: syntax.abbreviation_type(),
			context: None,
			options: output_options(snapshot, pos, false),
			text: None,
		});
	}

	let ctx = html_context(snapshot, pos);
	if let Some(css) = &ctx.css {
		return css_activation(snapshot, pos, css);
	}
	if let Some(current) = &ctx.current {
		trace!(tag = %current.name, pos, "activation.inside_tag");
		return None;
	}

	Some(AbbreviationConfig {
		syntax,
		kind: AbbreviationType::Markup,
		context: markup_context(snapshot, &ctx),
		options: output_options(snapshot, pos, false),
		text: None,
	})
}

fn css_activation<T: SyntaxTree>(
	snapshot: &Snapshot<'_, T>,
	pos: CharIdx,
	ctx: &CssContext,
) -> Option<AbbreviationConfig> {
	let allowed = match &ctx.current {
		None => true,
		Some(current) => {
			matches!(current.kind, CssKind::PropertyName | CssKind::PropertyValue)
				|| typing_before_selector(snapshot, pos, ctx)
		}
	};
	if !allowed {
		trace!(pos, "activation.inside_selector");
		return None;
	}

	let doc_syntax = snapshot.config.syntax;
	let syntax = if doc_syntax.is_stylesheet() { doc_syntax } else { Syntax::Css };
	Some(AbbreviationConfig {
		syntax,
		kind: AbbreviationType::Stylesheet,
		context: Some(stylesheet_context(ctx)),
		options: output_options(snapshot, pos, ctx.inline),
		text: None,
	})
}

/// A selector that starts one character before `pos` on a line holding
/// nothing but that character: the user is typing a fresh word that the
/// parser took for a selector.
fn typing_before_selector<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, pos: CharIdx, ctx: &CssContext) -> bool {
	let Some(current) = ctx.current.as_ref().filter(|m| m.kind == CssKind::Selector) else {
		return false;
	};
	if pos == 0 || current.range.from != pos - 1 {
		return false;
	}
	snapshot.line_at(current.range.from).text.trim().chars().count() == 1
}

/// Host element of a markup abbreviation: the nearest ancestor with the
/// attributes of its open tag.
pub fn markup_context<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, ctx: &HtmlContext) -> Option<AbbreviationContext> {
	let parent = ctx.parent()?;
	let attributes = snapshot
		.tree
		.resolve(parent.range.from, Side::After)
		.ancestors()
		.find(|node| node.is(OPEN_TAG))
		.map(|open| tag_attributes(snapshot, open))
		.unwrap_or_default();
	Some(AbbreviationContext {
		name: parent.name.clone(),
		attributes,
	})
}

/// Scope token of a stylesheet abbreviation.
///
/// Inline code takes `@@property`. A property value takes the property
/// name. Top-level positions take `@@section`, everything else
/// `@@global`.
pub fn stylesheet_context(ctx: &CssContext) -> AbbreviationContext {
	if ctx.inline {
		return AbbreviationContext::named(SCOPE_PROPERTY);
	}

	let parent = ctx.parent();
	let scope = match (&ctx.current, parent) {
		(Some(current), Some(parent)) if current.kind == CssKind::PropertyValue => parent.name.as_str(),
		(Some(current), None) if matches!(current.kind, CssKind::Selector | CssKind::PropertyName) => SCOPE_SECTION,
		(None, None) => SCOPE_SECTION,
		_ => SCOPE_GLOBAL,
	};
	AbbreviationContext::named(scope)
}
