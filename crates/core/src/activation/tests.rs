use pretty_assertions::assert_eq;
use rstest::rstest;
use zen_abbrev::{AbbreviationType, AttributeQuotes, FieldStyle, MarkupStyle, Syntax};

use super::*;
use crate::config::Config;
use crate::context::CssMatch;
use crate::testing::{Doc, Grammar};

fn activation(doc: &Doc) -> Option<AbbreviationConfig> {
	activation_context(&doc.snapshot(), doc.caret)
}

fn scope(doc: &Doc) -> Option<String> {
	activation(doc).and_then(|config| config.context).map(|ctx| ctx.name)
}

#[rstest]
#[case("<di|v>")]
#[case("<div cl|ass=\"a\"></div>")]
#[case("<p></|p>")]
#[case("<img sr|c=\"\">")]
fn test_markup_rejects_inside_tags(#[case] fixture: &str) {
	assert_eq!(activation(&Doc::markup(fixture)), None);
}

#[test]
fn test_markup_between_tags() {
	let doc = Doc::markup("<ul class=\"nav\" hidden>|</ul>");
	let config = activation(&doc).unwrap();
	assert_eq!(config.syntax, Syntax::Html);
	assert_eq!(config.kind, AbbreviationType::Markup);

	let ctx = config.context.unwrap();
	assert_eq!(ctx.name, "ul");
	assert_eq!(ctx.attributes.get("class"), Some(&Some("nav".to_string())));
	assert_eq!(ctx.attributes.get("hidden"), Some(&None));
}

#[test]
fn test_markup_top_level_has_no_context() {
	let config = activation(&Doc::markup("hello |")).unwrap();
	assert_eq!(config.context, None);
}

#[rstest]
#[case("a{color:|}", Some("color"))]
#[case("a{col|}", Some("@@global"))]
#[case("|", Some("@@section"))]
#[case("a{}\n|", Some("@@section"))]
#[case("a{|}", Some("@@global"))]
#[case("a{b:c}\nd|", Some("@@section"))]
#[case("a|b{}", None)]
#[case("  a|b", None)]
fn test_stylesheet_scopes(#[case] fixture: &str, #[case] expected: Option<&str>) {
	assert_eq!(scope(&Doc::stylesheet(fixture)).as_deref(), expected);
}

#[test]
fn test_typing_before_selector_needs_a_lone_character() {
	let doc = Doc::stylesheet("a{}\np|");
	assert_eq!(scope(&doc).as_deref(), Some("@@section"));

	// Indentation does not count, other text on the line does.
	let doc = Doc::stylesheet("a{}\n    p|");
	assert_eq!(scope(&doc).as_deref(), Some("@@section"));
	let doc = Doc::stylesheet("a{}\np|q");
	assert_eq!(scope(&doc), None);
}

#[test]
fn test_embedded_stylesheet() {
	let doc = Doc::markup("<style>a{color:|}</style>");
	let config = activation(&doc).unwrap();
	assert_eq!(config.syntax, Syntax::Css);
	assert_eq!(config.kind, AbbreviationType::Stylesheet);
	assert_eq!(config.context.unwrap().name, "color");
	assert!(config.options.format);
}

#[test]
fn test_inline_style_attribute() {
	let doc = Doc::markup("<div style=\"|\"></div>");
	let config = activation(&doc).unwrap();
	assert_eq!(config.kind, AbbreviationType::Stylesheet);
	assert_eq!(config.context.unwrap().name, "@@property");
	assert!(!config.options.format);
}

#[test]
fn test_other_grammars_always_allow() {
	let config = Config {
		syntax: Syntax::Jsx,
		..Config::default()
	};
	let doc = Doc::new(Grammar::Plain, "const a = |", config);
	let config = activation(&doc).unwrap();
	assert_eq!(config.syntax, Syntax::Jsx);
	assert_eq!(config.kind, AbbreviationType::Markup);
	assert_eq!(config.context, None);

	let config = Config {
		syntax: Syntax::Pug,
		..Config::default()
	};
	let doc = Doc::new(Grammar::Markup, "<a hr|ef>", config);
	assert_eq!(activation(&doc).unwrap().syntax, Syntax::Pug);
}

#[test]
fn test_stylesheet_dialect_is_kept() {
	let config = Config {
		syntax: Syntax::Scss,
		..Config::default()
	};
	let doc = Doc::new(Grammar::Stylesheet, "a{|}", config);
	assert_eq!(activation(&doc).unwrap().syntax, Syntax::Scss);
}

#[test]
fn test_stylesheet_context_scopes() {
	let value = CssMatch {
		name: "1px".to_string(),
		kind: CssKind::PropertyValue,
		range: Default::default(),
	};
	let name = CssMatch {
		name: "border".to_string(),
		kind: CssKind::PropertyName,
		range: Default::default(),
	};

	let ctx = CssContext {
		ancestors: vec![name.clone()],
		current: Some(value.clone()),
		inline: true,
		embedded: None,
	};
	assert_eq!(stylesheet_context(&ctx).name, "@@property");

	let ctx = CssContext {
		inline: false,
		..ctx
	};
	assert_eq!(stylesheet_context(&ctx).name, "border");

	let ctx = CssContext {
		ancestors: Vec::new(),
		current: Some(value),
		inline: false,
		embedded: None,
	};
	assert_eq!(stylesheet_context(&ctx).name, "@@global");
}

#[test]
fn test_output_options() {
	let config = Config {
		attribute_quotes: AttributeQuotes::Single,
		markup_style: MarkupStyle::Xhtml,
		comments: true,
		bem: true,
		short_hex: false,
		tab_size: 2,
		..Config::default()
	};
	let doc = Doc::new(Grammar::Markup, "<div>\n\t  <p>|</p>\n</div>", config);
	let options = output_options(&doc.snapshot(), doc.caret, false);

	assert_eq!(options.base_indent, "\t  ");
	assert_eq!(options.indent, "  ");
	assert_eq!(options.field, FieldStyle::Snippet);
	assert!(options.format);
	assert_eq!(options.attribute_quotes, AttributeQuotes::Single);
	assert_eq!(options.self_closing_style, MarkupStyle::Xhtml);
	assert!(!options.compact_boolean);
	assert_eq!(options.comment.as_deref(), Some("<!-- /[#ID][.CLASS] -->"));
	assert!(options.bem);
	assert!(!options.short_hex);

	assert!(!output_options(&doc.snapshot(), doc.caret, true).format);
}

#[test]
fn test_output_options_per_syntax() {
	let doc = Doc::markup("|");
	assert!(output_options(&doc.snapshot(), 0, false).compact_boolean);

	let config = Config {
		syntax: Syntax::Vue,
		markup_style: MarkupStyle::Xml,
		comments: true,
		..Config::default()
	};
	let doc = Doc::new(Grammar::Markup, "|", config);
	let options = output_options(&doc.snapshot(), 0, false);
	assert_eq!(options.self_closing_style, MarkupStyle::Html);
	assert!(options.comment.is_some());

	let config = Config {
		syntax: Syntax::Css,
		comments: true,
		bem: true,
		..Config::default()
	};
	let doc = Doc::new(Grammar::Stylesheet, "|", config);
	let options = output_options(&doc.snapshot(), 0, false);
	assert_eq!(options.comment, None);
	assert!(!options.bem);
}
