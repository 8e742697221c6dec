use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::FIELD_START;
use crate::config::{AbbreviationConfig, AbbreviationContext, SCOPE_PROPERTY, SCOPE_SECTION, SnippetTables};
use crate::snippets::Registry;
use crate::syntax::Syntax;

fn expand_in(abbreviation: &str, config: &AbbreviationConfig) -> String {
	let registry = Registry::build(&SnippetTables::default());
	render(&parse(abbreviation).unwrap(), config, &registry)
}

fn preview(abbreviation: &str) -> String {
	expand_in(abbreviation, &AbbreviationConfig::new(Syntax::Css).for_preview())
}

fn scoped(abbreviation: &str, scope: &str) -> String {
	let mut config = AbbreviationConfig::new(Syntax::Css).for_preview();
	config.context = Some(AbbreviationContext::named(scope));
	expand_in(abbreviation, &config)
}

#[test]
fn test_parse_values() {
	let parsed = parse("m10-a--.5e!").unwrap();
	assert_eq!(
		parsed.properties,
		[CssProperty {
			name: "m".to_string(),
			values: vec![
				CssValue::Number {
					value: "10".to_string(),
					unit: String::new(),
				},
				CssValue::Keyword("a".to_string()),
				CssValue::Number {
					value: "-.5".to_string(),
					unit: "e".to_string(),
				},
			],
			important: true,
		}]
	);
}

#[test]
fn test_parse_bare_color() {
	let parsed = parse("#fc0").unwrap();
	assert_eq!(parsed.properties[0].name, "");
	assert_eq!(parsed.properties[0].values, [CssValue::Color("fc0".to_string())]);
}

#[rstest]
#[case("", "Unexpected end of input at 0")]
#[case("p10+", "Unexpected end of input at 4")]
#[case("p10$", "Unexpected character at 3")]
#[case("p10 m", "Unexpected character at 3")]
fn test_parse_errors(#[case] abbreviation: &str, #[case] message: &str) {
	assert_eq!(parse(abbreviation).unwrap_err().message, message);
}

#[rstest]
#[case("p10", "padding: 10px;")]
#[case("m10-20", "margin: 10px 20px;")]
#[case("m-10", "margin: -10px;")]
#[case("m10--20", "margin: 10px -20px;")]
#[case("w100p", "width: 100%;")]
#[case("fz1.5", "font-size: 1.5em;")]
#[case("fz2r", "font-size: 2rem;")]
#[case("lh1.5", "line-height: 1.5;")]
#[case("z10", "z-index: 10;")]
#[case("m0", "margin: 0;")]
#[case("m.5", "margin: 0.5em;")]
#[case("m:a", "margin: auto;")]
#[case("p", "padding: ;")]
#[case("p10!", "padding: 10px !important;")]
#[case("foo10", "foo: 10px;")]
#[case("foo", "foo: ;")]
fn test_properties(#[case] abbreviation: &str, #[case] expected: &str) {
	assert_eq!(preview(abbreviation), expected);
}

#[rstest]
#[case("c", "color: #000;")]
#[case("c#f", "color: #fff;")]
#[case("c#e0", "color: #e0e0e0;")]
#[case("c#fc0", "color: #fc0;")]
#[case("c#ABCDEF", "color: #abcdef;")]
#[case("bgc#aabbcc", "background-color: #abc;")]
#[case("bd", "border: 1px solid #000;")]
fn test_colors(#[case] abbreviation: &str, #[case] expected: &str) {
	assert_eq!(preview(abbreviation), expected);
}

#[test]
fn test_long_hex() {
	let mut config = AbbreviationConfig::new(Syntax::Css).for_preview();
	config.options.short_hex = false;
	assert_eq!(expand_in("c#fc0", &config), "color: #ffcc00;");
}

#[rstest]
#[case("d", "display: block;")]
#[case("d:f", "display: flex;")]
#[case("dib", "display: inline-block;")]
#[case("dn", "display: none;")]
#[case("tac", "text-align: center;")]
#[case("posa", "position: absolute;")]
#[case("fll", "float: left;")]
fn test_keywords(#[case] abbreviation: &str, #[case] expected: &str) {
	assert_eq!(preview(abbreviation), expected);
}

#[test]
fn test_multiple_properties() {
	assert_eq!(preview("p10+m5"), "padding: 10px;\nmargin: 5px;");
	let mut config = AbbreviationConfig::new(Syntax::Css).for_preview();
	config.options.format = false;
	assert_eq!(expand_in("p10+m5", &config), "padding: 10px; margin: 5px;");
}

#[test]
fn test_raw_snippets() {
	assert_eq!(preview("@m"), "@media screen {\n  \n}");
	assert_eq!(preview("@i"), "@import url();");
	assert_eq!(preview("!"), "!important");
}

#[test]
fn test_scopes() {
	assert_eq!(scoped("p10", SCOPE_SECTION), "");
	assert_eq!(scoped("@i", SCOPE_SECTION), "@import url();");
	assert_eq!(scoped("@i", SCOPE_PROPERTY), "");
	assert_eq!(scoped("p10", SCOPE_PROPERTY), "padding: 10px;");
	assert_eq!(scoped("#fff", SCOPE_SECTION), "");
	assert_eq!(scoped("p10+@i", SCOPE_SECTION), "@import url();");
}

#[test]
fn test_value_scope() {
	assert_eq!(scoped("#f", "color"), "#fff");
	assert_eq!(scoped("#", "color"), "#000");
	assert_eq!(scoped("ib", "display"), "inline-block");
	assert_eq!(scoped("10", "line-height"), "10");
	assert_eq!(scoped("zz", "display"), "");
	assert_eq!(scoped("p10", "color"), "");
}

#[test]
fn test_syntax_punctuation() {
	assert_eq!(
		expand_in("p10", &AbbreviationConfig::new(Syntax::Sass).for_preview()),
		"padding: 10px"
	);
	assert_eq!(
		expand_in("p10", &AbbreviationConfig::new(Syntax::Stylus).for_preview()),
		"padding 10px"
	);
}

#[test]
fn test_snippet_fields() {
	let config = AbbreviationConfig::new(Syntax::Css);
	assert_eq!(expand_in("p", &config), format!("padding: {FIELD_START};"));
	assert_eq!(
		expand_in("d", &config),
		format!("display: {FIELD_START}block{};", crate::FIELD_END)
	);
}
