use pretty_assertions::assert_eq;
use rstest::rstest;
use zen_primitives::Range;

use super::*;
use crate::testing::{Doc, Grammar};

fn css(name: &str, kind: CssKind, from: usize, to: usize) -> CssMatch {
	CssMatch {
		name: name.to_string(),
		kind,
		range: Range::new(from, to),
	}
}

fn tag(name: &str, kind: HtmlKind, from: usize, to: usize) -> HtmlMatch {
	HtmlMatch {
		name: name.to_string(),
		kind,
		range: Range::new(from, to),
	}
}

fn css_at(doc: &Doc) -> CssContext {
	css_context(&doc.snapshot(), doc.caret)
}

fn html_at(doc: &Doc) -> HtmlContext {
	html_context(&doc.snapshot(), doc.caret)
}

#[test]
fn test_css_empty_value_after_colon() {
	let ctx = css_at(&Doc::stylesheet("a{color:|}"));
	assert_eq!(ctx.current, Some(css("", CssKind::PropertyValue, 8, 8)));
	assert_eq!(
		ctx.ancestors,
		vec![
			css("a", CssKind::Selector, 0, 9),
			css("color", CssKind::PropertyName, 2, 7),
		]
	);
	assert!(!ctx.inline);
}

#[test]
fn test_css_nested_value() {
	let ctx = css_at(&Doc::stylesheet("a{b{c:d|}}"));
	assert_eq!(ctx.current, Some(css("d", CssKind::PropertyValue, 6, 7)));
	assert_eq!(
		ctx.ancestors,
		vec![
			css("a", CssKind::Selector, 0, 9),
			css("b", CssKind::Selector, 2, 8),
			css("c", CssKind::PropertyName, 4, 5),
		]
	);
}

#[test]
fn test_css_property_name_is_current() {
	let ctx = css_at(&Doc::stylesheet("a{col|}"));
	assert_eq!(ctx.current, Some(css("col", CssKind::PropertyName, 2, 5)));
	assert_eq!(ctx.ancestors, vec![css("a", CssKind::Selector, 0, 6)]);
}

#[test]
fn test_css_selector_narrowed_to_its_text() {
	let ctx = css_at(&Doc::stylesheet("p|"));
	assert_eq!(ctx.current, Some(css("p", CssKind::Selector, 0, 1)));
	assert!(ctx.ancestors.is_empty());

	let ctx = css_at(&Doc::stylesheet("a{|}"));
	assert_eq!(ctx.current, None);
	assert_eq!(ctx.ancestors, vec![css("a", CssKind::Selector, 0, 3)]);
}

#[test]
fn test_css_selector_list_name() {
	let ctx = css_at(&Doc::stylesheet("a, b{|}"));
	assert_eq!(ctx.ancestors, vec![css("a, b", CssKind::Selector, 0, 6)]);
}

#[test]
fn test_css_top_level() {
	let ctx = css_at(&Doc::stylesheet("a{}\n|"));
	assert_eq!(ctx, CssContext::default());
}

#[test]
fn test_html_between_tags() {
	let ctx = html_at(&Doc::markup("<ul><li>|</li></ul>"));
	assert_eq!(ctx.current, None);
	assert_eq!(
		ctx.ancestors,
		vec![tag("ul", HtmlKind::Open, 0, 4), tag("li", HtmlKind::Open, 4, 8)]
	);
	assert_eq!(ctx.parent().map(|m| m.name.as_str()), Some("li"));
}

#[rstest]
#[case("<div clas|s=\"a\">", tag("div", HtmlKind::Open, 0, 15))]
#[case("<di|v>", tag("div", HtmlKind::Open, 0, 5))]
#[case("<p></|p>", tag("p", HtmlKind::Close, 3, 7))]
#[case("<br/|>", tag("br", HtmlKind::SelfClose, 0, 5))]
fn test_html_inside_tag(#[case] fixture: &str, #[case] expected: HtmlMatch) {
	let ctx = html_at(&Doc::markup(fixture));
	assert_eq!(ctx.current, Some(expected));
	assert!(ctx.ancestors.is_empty());
	assert_eq!(ctx.css, None);
}

#[test]
fn test_html_current_skips_own_element() {
	let ctx = html_at(&Doc::markup("<section><b cl|></b></section>"));
	assert_eq!(ctx.current, Some(tag("b", HtmlKind::Open, 9, 15)));
	assert_eq!(ctx.ancestors, vec![tag("section", HtmlKind::Open, 0, 9)]);
}

#[test]
fn test_inline_style_value() {
	let ctx = html_at(&Doc::markup("<div style=\"color: re|d\">"));
	let css_ctx = ctx.css.unwrap();
	assert!(css_ctx.inline);
	assert_eq!(css_ctx.embedded, Some(Range::new(21, 31)));
	assert_eq!(css_ctx.current, Some(css("red", CssKind::PropertyValue, 19, 22)));
	assert_eq!(css_ctx.ancestors, vec![css("color", CssKind::PropertyName, 12, 22)]);
}

#[test]
fn test_inline_style_name() {
	let ctx = html_at(&Doc::markup("<p style='margin: 0; pa|'>"));
	let css_ctx = ctx.css.unwrap();
	assert_eq!(css_ctx.current, Some(css("pa", CssKind::PropertyName, 21, 23)));
	assert!(css_ctx.ancestors.is_empty());
}

#[test]
fn test_other_attributes_are_not_inline_css() {
	let ctx = html_at(&Doc::markup("<div title=\"color: r|ed\">"));
	assert!(ctx.current.is_some());
	assert_eq!(ctx.css, None);
}

#[test]
fn test_parse_inline_props() {
	let props = parse_inline_props("color: red; margin: 0", 100);
	assert_eq!(
		props,
		vec![
			InlineProp {
				name: Range::new(0, 5),
				value: Some(Range::new(7, 10)),
			},
			InlineProp {
				name: Range::new(12, 18),
				value: Some(Range::new(20, 21)),
			},
		]
	);

	assert_eq!(parse_inline_props("a:b;c:d", 1).len(), 1);
	assert_eq!(parse_inline_props("  width", 7)[0].name, Range::new(2, 7));
	assert_eq!(parse_inline_props("top: ", 5)[0].value, None);
}

#[test]
fn test_resolve_context_by_grammar() {
	let doc = Doc::markup("<style>a{|}</style>");
	assert!(matches!(resolve_context(&doc.snapshot(), doc.caret), Some(Context::Css(_))));

	let doc = Doc::markup("<p>|</p>");
	assert!(matches!(resolve_context(&doc.snapshot(), doc.caret), Some(Context::Html(_))));

	let doc = Doc::new(Grammar::Plain, "hello|", Default::default());
	assert_eq!(resolve_context(&doc.snapshot(), doc.caret), None);
}

#[test]
fn test_resolution_is_idempotent() {
	let doc = Doc::markup("<div><p class=\"x\" style=\"top: 1px\">te|xt</p></div>");
	let snapshot = doc.snapshot();
	assert_eq!(resolve_context(&snapshot, doc.caret), resolve_context(&snapshot, doc.caret));
}
