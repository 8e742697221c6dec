use super::{CssProperty, CssValue, StylesheetAbbreviation};
use crate::config::{AbbreviationConfig, SCOPE_PROPERTY, SCOPE_SECTION};
use crate::output::{Output, has_fields};
use crate::snippets::{CssSnippet, Registry};

/// Properties that take bare numbers.
const UNITLESS: &[&str] = &[
	"z-index",
	"line-height",
	"opacity",
	"font-weight",
	"zoom",
	"flex",
	"flex-grow",
	"flex-shrink",
	"order",
];

const KEYWORD_ALIASES: &[(&str, &str)] = &[
	("a", "auto"),
	("i", "inherit"),
	("s", "solid"),
	("da", "dashed"),
	("do", "dotted"),
	("t", "transparent"),
];

pub(crate) fn render(abbreviation: &StylesheetAbbreviation, config: &AbbreviationConfig, registry: &Registry) -> String {
	let mut out = Output::new(&config.options);
	let scope = config.scope();
	for property in &abbreviation.properties {
		let mark = out.len();
		if mark > 0 {
			if config.options.format {
				out.newline(0);
			} else {
				out.push(' ');
			}
		}
		let body = out.len();
		if scope.starts_with("@@") {
			declaration(&mut out, property, scope, config, registry);
		} else {
			value_only(&mut out, property, scope, registry);
		}
		if out.len() == body {
			out.truncate(mark);
		}
	}
	out.finish()
}

enum Resolved<'r> {
	Raw(&'r str),
	Property {
		name: &'r str,
		snippet: Option<&'r CssSnippet>,
		keyword: Option<&'r str>,
	},
}

/// Finds the snippet for `property`: an exact key, or for a value-less
/// name, the longest key followed by an abbreviated keyword (`dib`).
/// Anything else is written as a literal property name.
fn resolve<'r>(property: &'r CssProperty, registry: &'r Registry) -> Option<Resolved<'r>> {
	if property.name.is_empty() {
		return None;
	}
	if let Some(snippet) = registry.stylesheet.get(&property.name) {
		return Some(match snippet {
			CssSnippet::Raw(text) => Resolved::Raw(text),
			CssSnippet::Property { name, .. } => Resolved::Property {
				name,
				snippet: Some(snippet),
				keyword: None,
			},
		});
	}

	if property.values.is_empty() {
		let combined = registry
			.stylesheet
			.iter()
			.filter(|(key, _)| key.len() < property.name.len() && property.name.starts_with(key.as_str()))
			.filter_map(|(key, snippet)| {
				let name = snippet.property_name()?;
				let keyword = match_keyword(&property.name[key.len()..], snippet.keywords())?;
				Some((key.len(), name, snippet, keyword))
			})
			.max_by_key(|(len, ..)| *len);
		if let Some((_, name, snippet, keyword)) = combined {
			return Some(Resolved::Property {
				name,
				snippet: Some(snippet),
				keyword: Some(keyword),
			});
		}
	}

	Some(Resolved::Property {
		name: &property.name,
		snippet: None,
		keyword: None,
	})
}

fn declaration(out: &mut Output<'_>, property: &CssProperty, scope: &str, config: &AbbreviationConfig, registry: &Registry) {
	let (between, after) = config.syntax.declaration_punctuation();
	match resolve(property, registry) {
		Some(Resolved::Raw(text)) if scope != SCOPE_PROPERTY => out.template(text, 0),
		Some(Resolved::Property { name, snippet, keyword }) if scope != SCOPE_SECTION => {
			out.push_str(name);
			out.push_str(between);
			let keywords = snippet.map(CssSnippet::keywords).unwrap_or_default();
			if !property.values.is_empty() {
				write_values(out, &property.values, name, keywords);
			} else if let Some(keyword) = keyword {
				out.push_str(keyword);
			} else {
				let value = match snippet {
					Some(CssSnippet::Property { value, .. }) => value.as_deref(),
					_ => None,
				};
				match value {
					Some(text) if has_fields(text) => out.template(text, 0),
					Some(_) if keywords.len() > 1 => out.field(1, &keywords[0]),
					Some(text) if !text.is_empty() => out.push_str(text),
					_ => out.auto_field(),
				}
			}
			if property.important {
				out.push_str(" !important");
			}
			out.push_str(after);
		}
		_ => {}
	}
}

/// Inside a property value only the value itself is written.
fn value_only(out: &mut Output<'_>, property: &CssProperty, scope: &str, registry: &Registry) {
	let keywords = registry.css_property(scope).map(CssSnippet::keywords).unwrap_or_default();
	if property.name.is_empty() {
		write_values(out, &property.values, scope, keywords);
	} else if property.values.is_empty() {
		match match_keyword(&property.name, keywords) {
			Some(keyword) => out.push_str(keyword),
			None => return,
		}
	} else {
		return;
	}
	if property.important {
		out.push_str(" !important");
	}
}

fn write_values(out: &mut Output<'_>, values: &[CssValue], property: &str, keywords: &[String]) {
	let short_hex = out.options().short_hex;
	for (idx, value) in values.iter().enumerate() {
		if idx > 0 {
			out.push(' ');
		}
		match value {
			CssValue::Number { value, unit } => out.push_str(&number(value, unit, property)),
			CssValue::Color(hex) => out.push_str(&color(hex, short_hex)),
			CssValue::Keyword(keyword) => {
				let resolved = match_keyword(keyword, keywords)
					.or_else(|| {
						KEYWORD_ALIASES
							.iter()
							.find(|(alias, _)| *alias == keyword.as_str())
							.map(|(_, full)| *full)
					})
					.unwrap_or(keyword.as_str());
				out.push_str(resolved);
			}
		}
	}
}

fn number(value: &str, unit: &str, property: &str) -> String {
	let text = match (value.strip_prefix("-."), value.strip_prefix('.')) {
		(Some(rest), _) => format!("-0.{rest}"),
		(None, Some(rest)) => format!("0.{rest}"),
		(None, None) => value.to_string(),
	};
	let is_zero = value.chars().all(|ch| matches!(ch, '0' | '.' | '-'));
	let unit = match unit {
		"p" => "%",
		"e" => "em",
		"r" => "rem",
		"x" => "ex",
		"" if is_zero || UNITLESS.contains(&property) => "",
		"" if value.contains('.') => "em",
		"" => "px",
		other => other,
	};
	format!("{text}{unit}")
}

/// Expands 1, 2 and 3 digit shorthands to six digits, then optionally
/// shortens `aabbcc` back to `abc`.
fn color(hex: &str, short_hex: bool) -> String {
	let hex = hex.to_ascii_lowercase();
	let full = match hex.len() {
		0 => "000000".to_string(),
		1 => hex.repeat(6),
		2 => hex.repeat(3),
		3 => hex.chars().flat_map(|ch| [ch, ch]).collect(),
		_ => hex,
	};
	let bytes = full.as_bytes();
	if short_hex && bytes.len() == 6 && bytes[0] == bytes[1] && bytes[2] == bytes[3] && bytes[4] == bytes[5] {
		let short: String = [bytes[0], bytes[2], bytes[4]].iter().map(|&b| b as char).collect();
		return format!("#{short}");
	}
	format!("#{full}")
}

/// Exact keyword, or the first keyword that starts with the same character
/// and contains the rest of `abbr` in order (`ib` -> `inline-block`).
pub(crate) fn match_keyword<'k>(abbr: &str, keywords: &'k [String]) -> Option<&'k str> {
	if abbr.is_empty() {
		return None;
	}
	keywords
		.iter()
		.find(|keyword| *keyword == abbr)
		.or_else(|| keywords.iter().find(|keyword| abbreviates(abbr, keyword)))
		.map(String::as_str)
}

fn abbreviates(abbr: &str, keyword: &str) -> bool {
	let mut abbr = abbr.chars();
	let mut keyword = keyword.chars();
	match (abbr.next(), keyword.next()) {
		(Some(a), Some(k)) if a == k => abbr.all(|a| keyword.any(|k| k == a)),
		_ => false,
	}
}
