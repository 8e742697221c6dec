//! Built-in snippet tables and the resolved registry.

use indexmap::IndexMap;

use crate::config::SnippetTables;

const MARKUP: &[(&str, &str)] = &[
	("!", "{<!DOCTYPE html>}+html[lang=${lang}]>(head>meta[charset=${charset}]+meta:vp+title{${1:Document}})+body"),
	("!!!", "{<!DOCTYPE html>}"),
	("doc", "html[lang=${lang}]>(head>meta[charset=${charset}]+meta:vp+title{${1:Document}})+body"),
	("a", "a[href]"),
	("a:link", "a[href=http://${0}]"),
	("a:mail", "a[href=mailto:${0}]"),
	("abbr", "abbr[title]"),
	("base", "base[href]/"),
	("link", "link[rel=stylesheet href]/"),
	("link:css", "link[rel=stylesheet href=${1:style}.css]"),
	("meta:utf", "meta[http-equiv=Content-Type content=\"text/html;charset=UTF-8\"]"),
	("meta:vp", "meta[name=viewport content=\"width=device-width, initial-scale=1.0\"]"),
	("script:src", "script[src]"),
	("img", "img[src alt]"),
	("iframe", "iframe[src frameborder=0]"),
	("form", "form[action]"),
	("form:get", "form[method=get action]"),
	("form:post", "form[method=post action]"),
	("label", "label[for]"),
	("input", "input[type=${1:text}]"),
	("input:hidden", "input[type=hidden name]"),
	("input:checkbox", "input[type=checkbox]"),
	("select", "select[name=${1} id=${1}]"),
	("option", "option[value]"),
	("textarea", "textarea[name=${1} id=${1} cols=${2:30} rows=${3:10}]"),
	("btn", "button"),
	("btn:s", "button[type=submit]"),
	("bq", "blockquote"),
	("fig", "figure"),
	("c", "{<!-- ${0} -->}"),
];

const STYLESHEET: &[(&str, &str)] = &[
	("p", "padding"),
	("pt", "padding-top"),
	("pr", "padding-right"),
	("pb", "padding-bottom"),
	("pl", "padding-left"),
	("m", "margin"),
	("mt", "margin-top"),
	("mr", "margin-right"),
	("mb", "margin-bottom"),
	("ml", "margin-left"),
	("w", "width"),
	("h", "height"),
	("maw", "max-width"),
	("mah", "max-height"),
	("miw", "min-width"),
	("mih", "min-height"),
	("c", "color:#${1:000}"),
	("bg", "background:#${1:000}"),
	("bgc", "background-color:#${1:fff}"),
	("bgi", "background-image:url(${0})"),
	("fz", "font-size"),
	("fw", "font-weight:normal|bold|bolder|lighter"),
	("ff", "font-family:serif|sans-serif|monospace"),
	("lh", "line-height"),
	("ta", "text-align:left|center|right|justify"),
	("td", "text-decoration:none|underline|overline|line-through"),
	("tt", "text-transform:uppercase|lowercase|capitalize|none"),
	("d", "display:block|none|flex|inline-flex|inline|inline-block|grid|inline-grid|table|list-item"),
	("pos", "position:relative|absolute|fixed|static|sticky"),
	("t", "top"),
	("r", "right"),
	("b", "bottom"),
	("l", "left"),
	("z", "z-index"),
	("fl", "float:left|right|none"),
	("cl", "clear:both|left|right|none"),
	("ov", "overflow:hidden|visible|scroll|auto"),
	("op", "opacity"),
	("bd", "border:${1:1px} ${2:solid} ${3:#000}"),
	("bdrs", "border-radius"),
	("bxz", "box-sizing:border-box|content-box"),
	("cur", "cursor:pointer|default|text|move|wait"),
	("v", "visibility:hidden|visible|collapse"),
	("va", "vertical-align:top|middle|bottom|baseline|super|sub"),
	("ws", "white-space:nowrap|pre|pre-wrap|pre-line|normal"),
	("jc", "justify-content:center|flex-start|flex-end|space-between|space-around|space-evenly"),
	("ai", "align-items:center|flex-start|flex-end|stretch|baseline"),
	("fxd", "flex-direction:row|column|row-reverse|column-reverse"),
	("fx", "flex"),
	("gap", "gap"),
	("trs", "transition:${1:prop} ${2:time}"),
	("trf", "transform:${1}"),
	("bxsh", "box-shadow:${1:inset }${2:hoff} ${3:voff} ${4:blur} ${5:color}"),
	("@f", "@font-face {\n\tfont-family: ${1};\n\tsrc: url(${2});\n}"),
	("@i", "@import url(${0});"),
	("@m", "@media ${1:screen} {\n\t${0}\n}"),
	("@kf", "@keyframes ${1:identifier} {\n\t${0}\n}"),
	("!", "!important"),
];

/// A stylesheet snippet, classified once when the registry is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CssSnippet {
	/// `name` or `name:value`, where a value of `a|b|c` lists keywords.
	Property {
		name: String,
		value: Option<String>,
		keywords: Vec<String>,
	},
	/// Anything else (at-rules, `!important`) is inserted verbatim.
	Raw(String),
}

impl CssSnippet {
	fn parse(text: &str) -> Self {
		let is_ident = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase() || c == '-');
		if text.contains('\n') {
			return CssSnippet::Raw(text.to_string());
		}
		match text.split_once(':') {
			Some((name, value)) if is_ident(name) => {
				let value = value.trim().trim_end_matches(';');
				CssSnippet::Property {
					name: name.to_string(),
					value: Some(value.to_string()),
					keywords: value.split('|').map(|kw| kw.trim().to_string()).collect(),
				}
			}
			None if is_ident(text) => CssSnippet::Property {
				name: text.to_string(),
				value: None,
				keywords: Vec::new(),
			},
			_ => CssSnippet::Raw(text.to_string()),
		}
	}

	pub(crate) fn property_name(&self) -> Option<&str> {
		match self {
			CssSnippet::Property { name, .. } => Some(name),
			CssSnippet::Raw(_) => None,
		}
	}

	pub(crate) fn keywords(&self) -> &[String] {
		match self {
			CssSnippet::Property { keywords, .. } => keywords,
			CssSnippet::Raw(_) => &[],
		}
	}
}

/// Built-in snippets with user tables merged over them.
#[derive(Debug, Clone)]
pub(crate) struct Registry {
	pub(crate) markup: IndexMap<String, String>,
	pub(crate) stylesheet: IndexMap<String, CssSnippet>,
}

impl Registry {
	pub(crate) fn build(user: &SnippetTables) -> Self {
		let mut markup: IndexMap<String, String> =
			MARKUP.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect();
		markup.extend(user.markup.iter().map(|(key, value)| (key.clone(), value.clone())));

		let stylesheet = STYLESHEET
			.iter()
			.map(|(key, value)| (*key, *value))
			.chain(user.stylesheet.iter().map(|(key, value)| (key.as_str(), value.as_str())))
			.map(|(key, value)| (key.to_string(), CssSnippet::parse(value)))
			.collect();

		Self { markup, stylesheet }
	}

	/// First property snippet that writes `property`.
	pub(crate) fn css_property(&self, property: &str) -> Option<&CssSnippet> {
		self.stylesheet
			.values()
			.find(|snippet| snippet.property_name() == Some(property))
	}
}
