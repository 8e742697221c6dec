use tracing::warn;

use super::{AbbrAttribute, AbbrNode, MarkupAbbreviation, parse};
use crate::config::{AbbreviationConfig, MarkupStyle, OutputOptions};
use crate::output::Output;
use crate::snippets::Registry;
use crate::syntax::Syntax;

const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr",
];

const INLINE_ELEMENTS: &[&str] = &[
	"a", "abbr", "acronym", "b", "bdo", "big", "br", "button", "cite", "code", "del", "dfn", "em", "i", "img", "input",
	"ins", "kbd", "label", "map", "object", "q", "s", "samp", "select", "small", "span", "strike", "strong", "sub",
	"sup", "textarea", "tt", "u", "var",
];

const BOOLEAN_ATTRIBUTES: &[&str] = &[
	"async",
	"autofocus",
	"autoplay",
	"checked",
	"controls",
	"default",
	"defer",
	"disabled",
	"formnovalidate",
	"hidden",
	"ismap",
	"loop",
	"multiple",
	"muted",
	"novalidate",
	"readonly",
	"required",
	"reversed",
	"selected",
];

/// Elements whose children stay at the element's own depth.
const UNINDENTED: &[&str] = &["html"];

pub(crate) fn render(abbreviation: &MarkupAbbreviation, config: &AbbreviationConfig, registry: &Registry) -> String {
	let jsx = config.syntax.is_jsx();
	let nodes = resolve_snippets(&abbreviation.children, registry, jsx, &mut Vec::new());
	let mut renderer = Renderer {
		out: Output::new(&config.options),
		options: &config.options,
		jsx,
		void: !matches!(config.syntax, Syntax::Xml | Syntax::Xsl),
		style: if config.syntax.is_xml() {
			MarkupStyle::Xml
		} else {
			config.options.self_closing_style
		},
	};
	let parent = config.context.as_ref().map(|ctx| ctx.name.as_str());
	renderer.children(&nodes, parent, None, 0, false);
	renderer.out.finish()
}

/// Replaces nodes named after a snippet with the snippet's own nodes.
/// `active` holds the snippets being expanded so `a` -> `a[href]` stops.
fn resolve_snippets(nodes: &[AbbrNode], registry: &Registry, jsx: bool, active: &mut Vec<String>) -> Vec<AbbrNode> {
	let mut resolved = Vec::with_capacity(nodes.len());
	for node in nodes {
		let children = resolve_snippets(&node.children, registry, jsx, active);
		let snippet = node
			.name
			.as_deref()
			.filter(|name| !active.iter().any(|open| open == name))
			.and_then(|name| registry.markup.get(name).map(|text| (name, text)));

		let expansion = match snippet {
			Some((name, text)) => match parse(text, jsx) {
				Ok(parsed) => Some((name, parsed.children)),
				Err(err) => {
					warn!(snippet = name, error = %err, "invalid markup snippet");
					None
				}
			},
			None => None,
		};

		let Some((name, expansion)) = expansion else {
			resolved.push(AbbrNode {
				name: node.name.clone(),
				attributes: node.attributes.clone(),
				value: node.value.clone(),
				repeat: node.repeat,
				self_closing: node.self_closing,
				wrapped: node.wrapped.clone(),
				children,
			});
			continue;
		};

		active.push(name.to_string());
		let mut expansion = resolve_snippets(&expansion, registry, jsx, active);
		active.pop();
		merge(&mut expansion, node, children);
		resolved.extend(expansion);
	}
	resolved
}

fn merge(expansion: &mut [AbbrNode], node: &AbbrNode, children: Vec<AbbrNode>) {
	if let Some(first) = expansion.first_mut() {
		for attr in &node.attributes {
			let existing = first.attributes.iter_mut().find(|own| own.name == attr.name);
			match existing {
				Some(own) if attr.name == "class" => {
					own.value = match (own.value.take(), attr.value.clone()) {
						(Some(prev), Some(next)) => Some(format!("{prev} {next}")),
						(prev, next) => prev.or(next),
					};
				}
				Some(own) => own.value = attr.value.clone(),
				None => first.attributes.push(attr.clone()),
			}
		}
		if node.value.is_some() {
			first.value = node.value.clone();
		}
		first.self_closing |= node.self_closing;
		if node.wrapped.is_some() {
			first.wrapped = node.wrapped.clone();
		}
		first.repeat = node.repeat.or(first.repeat);
	}
	if let Some(last) = expansion.last_mut() {
		last.deepest_last().children.extend(children);
	}
}

fn implicit_name(parent: Option<&str>) -> &'static str {
	match parent.map(str::to_ascii_lowercase).as_deref() {
		Some("ul" | "ol") => "li",
		Some("table" | "tbody" | "thead" | "tfoot") => "tr",
		Some("tr") => "td",
		Some("select" | "optgroup") => "option",
		Some(name) if INLINE_ELEMENTS.contains(&name) => "span",
		_ => "div",
	}
}

struct Renderer<'a> {
	out: Output<'a>,
	options: &'a OutputOptions,
	jsx: bool,
	/// Whether void elements exist in the target syntax.
	void: bool,
	style: MarkupStyle,
}

impl Renderer<'_> {
	fn is_block(&self, node: &AbbrNode, parent: Option<&str>) -> bool {
		if node.is_text() {
			return false;
		}
		let name = node.name.as_deref().unwrap_or_else(|| implicit_name(parent));
		!INLINE_ELEMENTS.contains(&name.to_ascii_lowercase().as_str())
	}

	fn is_void(&self, name: &str) -> bool {
		self.void && VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str())
	}

	/// Writes sibling nodes, one per line when any of them is a block.
	/// Returns whether the siblings were broken onto separate lines.
	fn children(
		&mut self,
		nodes: &[AbbrNode],
		parent: Option<&str>,
		bem_block: Option<&str>,
		depth: usize,
		leading_break: bool,
	) -> bool {
		let multiline = self.options.format && nodes.iter().any(|node| self.is_block(node, parent));
		for (idx, node) in nodes.iter().enumerate() {
			if multiline && (idx > 0 || leading_break) {
				self.out.newline(depth);
			}
			self.node(node, parent, bem_block, depth);
		}
		multiline
	}

	fn node(&mut self, node: &AbbrNode, parent: Option<&str>, bem_block: Option<&str>, depth: usize) {
		if node.is_text() {
			if let Some(value) = &node.value {
				self.out.template(value, depth);
			}
			if let Some(text) = &node.wrapped {
				self.wrapped(text, depth, false);
			}
			let leading_break = node.value.is_some() || node.wrapped.is_some();
			self.children(&node.children, parent, bem_block, depth, leading_break);
			return;
		}

		let name = node
			.name
			.clone()
			.unwrap_or_else(|| implicit_name(parent).to_string());
		let (attributes, child_block) = self.bem(node, bem_block);

		self.out.push('<');
		self.out.push_str(&name);
		for attr in &attributes {
			self.attribute(attr);
		}

		if node.self_closing || self.is_void(&name) {
			self.out.push_str(match self.style {
				MarkupStyle::Html => ">",
				MarkupStyle::Xhtml => " />",
				MarkupStyle::Xml => "/>",
			});
			self.comment(&attributes);
			return;
		}
		self.out.push('>');

		let inner = if UNINDENTED.contains(&name.as_str()) { depth } else { depth + 1 };
		if let Some(value) = &node.value {
			self.out.template(value, inner);
		}
		let mut multiline = false;
		if let Some(text) = &node.wrapped {
			multiline = self.wrapped(text, inner, true);
		}
		if !node.children.is_empty() {
			multiline |= self.children(&node.children, Some(&name), child_block.as_deref(), inner, true);
		} else if node.value.is_none() && node.wrapped.is_none() {
			self.out.auto_field();
		}
		if multiline {
			self.out.newline(depth);
		}

		self.out.push_str("</");
		self.out.push_str(&name);
		self.out.push('>');
		self.comment(&attributes);
	}

	/// Writes wrapped text. Text of several lines starts on a line of its
	/// own inside an element; returns whether it did.
	fn wrapped(&mut self, text: &str, depth: usize, in_element: bool) -> bool {
		if !(self.options.format && text.contains('\n')) {
			self.out.push_str(text);
			return false;
		}
		for (idx, line) in text.lines().enumerate() {
			if idx > 0 || in_element {
				if line.is_empty() {
					self.out.push('\n');
				} else {
					self.out.newline(depth);
				}
			}
			self.out.push_str(line);
		}
		in_element
	}

	fn attribute(&mut self, attr: &AbbrAttribute) {
		let name = match (self.jsx, attr.name.as_str()) {
			(true, "class") => "className",
			(true, "for") => "htmlFor",
			(_, name) => name,
		};
		self.out.push(' ');
		self.out.push_str(name);

		match attr.value.as_deref() {
			None if BOOLEAN_ATTRIBUTES.contains(&attr.name.as_str()) => {
				if !(self.options.compact_boolean && self.style == MarkupStyle::Html) {
					self.out.push_str("=");
					self.quoted(|out| out.push_str(name));
				}
			}
			Some(value) if self.jsx && value.starts_with('{') && value.ends_with('}') => {
				self.out.push('=');
				self.out.push_str(value);
			}
			value => {
				self.out.push('=');
				self.quoted(|out| match value {
					Some(value) if !value.is_empty() => out.template(value, 0),
					_ => out.auto_field(),
				});
			}
		}
	}

	fn quoted(&mut self, f: impl FnOnce(&mut Output<'_>)) {
		let quote = self.options.attribute_quotes.char();
		self.out.push(quote);
		f(&mut self.out);
		self.out.push(quote);
	}

	/// Applies BEM class naming; returns the rewritten attributes and the
	/// block name inherited by children.
	fn bem(&self, node: &AbbrNode, inherited: Option<&str>) -> (Vec<AbbrAttribute>, Option<String>) {
		if !self.options.bem {
			return (node.attributes.clone(), None);
		}
		let mut block = None;
		let attributes = node
			.attributes
			.iter()
			.map(|attr| match (attr.name.as_str(), attr.value.as_deref()) {
				("class", Some(classes)) => AbbrAttribute {
					name: attr.name.clone(),
					value: Some(bem_classes(classes, inherited, &mut block)),
				},
				_ => attr.clone(),
			})
			.collect();
		(attributes, block.or_else(|| inherited.map(str::to_string)))
	}

	fn comment(&mut self, attributes: &[AbbrAttribute]) {
		let Some(template) = self.options.comment.as_deref() else {
			return;
		};
		if attributes.iter().any(|attr| attr.name == "id" || attr.name == "class") {
			self.out.push_str(&comment_text(template, attributes));
		}
	}
}

/// `-elem`/`__elem` become `block__elem` and `_mod` becomes `base_mod`.
fn bem_classes(classes: &str, inherited: Option<&str>, block: &mut Option<String>) -> String {
	let mut base: Option<String> = None;
	let mut out = Vec::new();
	for class in classes.split_whitespace() {
		if let Some(element) = class.strip_prefix("__").or_else(|| class.strip_prefix('-')) {
			let element = element.trim_start_matches('-');
			match inherited {
				Some(parent) => {
					let resolved = format!("{parent}__{element}");
					base.get_or_insert_with(|| resolved.clone());
					out.push(resolved);
				}
				None => out.push(class.to_string()),
			}
		} else if let Some(modifier) = class.strip_prefix('_') {
			match base.as_deref().or(inherited) {
				Some(base) => out.push(format!("{base}_{modifier}")),
				None => out.push(class.to_string()),
			}
		} else {
			if block.is_none() && !class.contains("__") {
				*block = Some(class.to_string());
			}
			base.get_or_insert_with(|| class.to_string());
			out.push(class.to_string());
		}
	}
	out.join(" ")
}

/// Expands `[...]` sections of a comment template. Uppercase words inside a
/// section name attributes; a section naming a missing attribute is dropped.
fn comment_text(template: &str, attributes: &[AbbrAttribute]) -> String {
	let mut out = String::new();
	let mut rest = template;
	while let Some(open) = rest.find('[') {
		out.push_str(&rest[..open]);
		let section = &rest[open + 1..];
		let Some(close) = section.find(']') else {
			rest = &rest[open..];
			break;
		};
		if let Some(text) = fill_section(&section[..close], attributes) {
			out.push_str(&text);
		}
		rest = &section[close + 1..];
	}
	out.push_str(rest);
	out
}

fn fill_section(section: &str, attributes: &[AbbrAttribute]) -> Option<String> {
	let mut out = String::new();
	let mut word = String::new();
	for ch in section.chars().chain(std::iter::once('\0')) {
		if ch.is_ascii_uppercase() {
			word.push(ch);
			continue;
		}
		if !word.is_empty() {
			let name = word.to_ascii_lowercase();
			let value = attributes
				.iter()
				.find(|attr| attr.name == name)
				.and_then(|attr| attr.value.as_deref())
				.filter(|value| !value.is_empty())?;
			out.push_str(value);
			word.clear();
		}
		if ch != '\0' {
			out.push(ch);
		}
	}
	Some(out)
}
