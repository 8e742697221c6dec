use super::{AbbrAttribute, AbbrNode, MarkupAbbreviation, Repeat};
use crate::error::AbbreviationError;

type Result<T> = std::result::Result<T, AbbreviationError>;

/// Upper bound for a single `*N`, keeps a stray keystroke from allocating
/// millions of nodes.
const MAX_REPEAT: usize = 1000;

/// Upper bound for the nodes of a whole abbreviation after unrolling, since
/// nested repeats multiply.
const MAX_NODES: usize = 10_000;

/// Parses a markup abbreviation. With `jsx`, capitalized names may contain
/// dots (`Foo.Bar`).
pub(crate) fn parse(abbreviation: &str, jsx: bool) -> Result<MarkupAbbreviation> {
	parse_with(abbreviation, jsx, None)
}

/// Parses a markup abbreviation that wraps `lines`.
///
/// The first element repeated with a bare `*` is copied once per non-blank
/// line and each copy holds its line. Without such an element all lines go
/// into the deepest last node.
pub(crate) fn wrap(abbreviation: &str, jsx: bool, lines: &[String]) -> Result<MarkupAbbreviation> {
	parse_with(abbreviation, jsx, Some(lines))
}

fn parse_with(abbreviation: &str, jsx: bool, lines: Option<&[String]>) -> Result<MarkupAbbreviation> {
	let mut parser = Parser {
		chars: abbreviation.chars().collect(),
		pos: 0,
		jsx,
	};
	let statements = parser.sequence()?;
	if parser.peek().is_some() {
		return Err(parser.unexpected());
	}
	let mut budget = Budget {
		left: MAX_NODES,
		pos: parser.pos,
		lines: lines.map(|lines| {
			lines
				.iter()
				.map(|line| line.trim())
				.filter(|line| !line.is_empty())
				.collect()
		}),
	};
	let mut children = unroll(&statements, None, &mut budget)?;
	if let Some(lines) = lines {
		if budget.lines.is_some() {
			if let Some(last) = children.last_mut() {
				last.deepest_last().wrapped = Some(lines.join("\n"));
			}
		}
	}
	Ok(MarkupAbbreviation { children })
}

/// State threaded through unrolling.
struct Budget<'t> {
	/// Nodes that may still be created.
	left: usize,
	/// Reported position when the budget runs out.
	pos: usize,
	/// Wrapped lines not yet taken by an implicit repeat.
	lines: Option<Vec<&'t str>>,
}

impl Budget<'_> {
	fn spend(&mut self) -> Result<()> {
		self.left = self
			.left
			.checked_sub(1)
			.ok_or_else(|| AbbreviationError::new("Too many repeated elements", self.pos))?;
		Ok(())
	}
}

#[derive(Debug, Default)]
struct Element {
	name: Option<String>,
	attributes: Vec<AbbrAttribute>,
	value: Option<String>,
	self_closing: bool,
	repeat: Option<usize>,
	/// Repeated with a bare `*`.
	implicit_repeat: bool,
}

impl Element {
	fn set_attribute(&mut self, name: String, value: Option<String>) {
		let existing = self.attributes.iter_mut().find(|attr| attr.name == name);
		match (existing, name.as_str()) {
			(Some(attr), "class") => {
				let merged = match (attr.value.take(), value) {
					(Some(prev), Some(next)) => Some(format!("{prev} {next}")),
					(prev, next) => prev.or(next),
				};
				attr.value = merged;
			}
			(Some(attr), "id") => attr.value = value,
			_ => self.attributes.push(AbbrAttribute { name, value }),
		}
	}

	fn instantiate(&self, children: &[Statement], repeat: Option<Repeat>, budget: &mut Budget<'_>) -> Result<AbbrNode> {
		budget.spend()?;
		Ok(AbbrNode {
			name: self.name.as_deref().map(|name| number(name, repeat)),
			attributes: self
				.attributes
				.iter()
				.map(|attr| AbbrAttribute {
					name: number(&attr.name, repeat),
					value: attr.value.as_deref().map(|value| number(value, repeat)),
				})
				.collect(),
			value: self.value.as_deref().map(|value| number(value, repeat)),
			repeat,
			self_closing: self.self_closing,
			wrapped: None,
			children: unroll(children, repeat, budget)?,
		})
	}
}

enum Statement {
	Element {
		element: Element,
		children: Vec<Statement>,
	},
	Group {
		items: Vec<Statement>,
		repeat: Option<usize>,
		children: Vec<Statement>,
	},
}

impl Statement {
	fn children_mut(&mut self) -> &mut Vec<Statement> {
		match self {
			Statement::Element { children, .. } | Statement::Group { children, .. } => children,
		}
	}
}

struct Parser {
	chars: Vec<char>,
	pos: usize,
	jsx: bool,
}

impl Parser {
	fn peek(&self) -> Option<char> {
		self.chars.get(self.pos).copied()
	}

	fn peek_at(&self, offset: usize) -> Option<char> {
		self.chars.get(self.pos + offset).copied()
	}

	fn unexpected(&self) -> AbbreviationError {
		match self.peek() {
			None => AbbreviationError::new("Unexpected end of input", self.pos),
			Some(_) => AbbreviationError::new("Unexpected character", self.pos),
		}
	}

	fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
		let start = self.pos;
		while self.peek().is_some_and(&pred) {
			self.pos += 1;
		}
		self.chars[start..self.pos].iter().collect()
	}

	fn skip_spaces(&mut self) {
		while self.peek().is_some_and(char::is_whitespace) {
			self.pos += 1;
		}
	}

	/// Statements joined by `>`, `+` and `^`.
	fn sequence(&mut self) -> Result<Vec<Statement>> {
		let mut levels: Vec<Vec<Statement>> = vec![Vec::new()];
		loop {
			let statement = self.statement()?;
			if let Some(level) = levels.last_mut() {
				level.push(statement);
			}
			match self.peek() {
				Some('>') => {
					self.pos += 1;
					levels.push(Vec::new());
				}
				Some('+') => self.pos += 1,
				Some('^') => {
					while self.peek() == Some('^') {
						self.pos += 1;
						if levels.len() > 1 {
							close_level(&mut levels);
						}
					}
				}
				_ => break,
			}
			// Operator typed without its operand yet.
			if self.peek().is_none() {
				break;
			}
		}
		while levels.len() > 1 {
			close_level(&mut levels);
		}
		Ok(levels.pop().unwrap_or_default())
	}

	fn statement(&mut self) -> Result<Statement> {
		if self.peek() != Some('(') {
			return Ok(Statement::Element {
				element: self.element()?,
				children: Vec::new(),
			});
		}

		self.pos += 1;
		let items = self.sequence()?;
		if self.peek() != Some(')') {
			return Err(self.unexpected());
		}
		self.pos += 1;
		let repeat = match self.peek() {
			Some('*') => Some(self.repeat()?),
			_ => None,
		};
		Ok(Statement::Group {
			items,
			repeat,
			children: Vec::new(),
		})
	}

	fn element(&mut self) -> Result<Element> {
		let start = self.pos;
		let mut element = Element::default();
		let name = self.name();
		if !name.is_empty() {
			element.name = Some(name);
		}

		loop {
			match self.peek() {
				Some('.') => {
					self.pos += 1;
					let class = self.take_while(is_ident_char);
					if class.is_empty() {
						return Err(AbbreviationError::new("Expected class name", self.pos));
					}
					element.set_attribute("class".to_string(), Some(class));
				}
				Some('#') => {
					self.pos += 1;
					let id = self.take_while(is_ident_char);
					if id.is_empty() {
						return Err(AbbreviationError::new("Expected id", self.pos));
					}
					element.set_attribute("id".to_string(), Some(id));
				}
				Some('[') => self.attributes(&mut element)?,
				Some('{') => {
					let text = self.text()?;
					element.value = Some(element.value.take().unwrap_or_default() + &text);
				}
				Some('*') => {
					element.implicit_repeat = !self.peek_at(1).is_some_and(|ch| ch.is_ascii_digit());
					element.repeat = Some(self.repeat()?);
				}
				Some('/') => {
					self.pos += 1;
					element.self_closing = true;
				}
				_ => break,
			}
		}

		if self.pos == start {
			return Err(self.unexpected());
		}
		Ok(element)
	}

	fn name(&mut self) -> String {
		let mut name = self.take_while(is_name_char);
		if self.jsx && name.starts_with(|ch: char| ch.is_ascii_uppercase()) {
			while self.peek() == Some('.') && self.peek_at(1).is_some_and(|ch| ch.is_ascii_uppercase()) {
				self.pos += 1;
				name.push('.');
				name.push_str(&self.take_while(is_name_char));
			}
		}
		name
	}

	/// `*N`; a bare `*` repeats once.
	fn repeat(&mut self) -> Result<usize> {
		let start = self.pos;
		self.pos += 1;
		let digits = self.take_while(|ch| ch.is_ascii_digit());
		if digits.is_empty() {
			return Ok(1);
		}
		match digits.parse::<usize>() {
			Ok(count) if count <= MAX_REPEAT => Ok(count.max(1)),
			_ => Err(AbbreviationError::new("Repeat count is too large", start)),
		}
	}

	fn attributes(&mut self, element: &mut Element) -> Result<()> {
		let open = self.pos;
		self.pos += 1;
		loop {
			self.skip_spaces();
			match self.peek() {
				None => return Err(AbbreviationError::new("Unclosed attribute set", open)),
				Some(']') => {
					self.pos += 1;
					return Ok(());
				}
				_ => {}
			}

			let name = match self.peek() {
				Some(quote @ ('"' | '\'')) => self.quoted(quote)?,
				_ => self.take_while(|ch| !ch.is_whitespace() && !matches!(ch, '=' | ']' | '"' | '\'')),
			};
			if name.is_empty() {
				return Err(AbbreviationError::new("Expected attribute name", self.pos));
			}

			let value = if self.peek() == Some('=') {
				self.pos += 1;
				Some(match self.peek() {
					Some(quote @ ('"' | '\'')) => self.quoted(quote)?,
					Some('{') => self.braced()?,
					_ => self.unquoted_value(),
				})
			} else {
				None
			};
			element.set_attribute(name, value);
		}
	}

	fn quoted(&mut self, quote: char) -> Result<String> {
		let open = self.pos;
		self.pos += 1;
		let value = self.take_while(|ch| ch != quote);
		if self.peek() != Some(quote) {
			return Err(AbbreviationError::new("Unclosed quote", open));
		}
		self.pos += 1;
		Ok(value)
	}

	/// Unquoted attribute value; `${...}` fields may contain spaces.
	fn unquoted_value(&mut self) -> String {
		let start = self.pos;
		while let Some(ch) = self.peek() {
			if ch == '$' && self.peek_at(1) == Some('{') {
				match closing_brace(&self.chars, self.pos + 1) {
					Some(end) => self.pos = end + 1,
					None => self.pos = self.chars.len(),
				}
				continue;
			}
			if ch.is_whitespace() || ch == ']' {
				break;
			}
			self.pos += 1;
		}
		self.chars[start..self.pos].iter().collect()
	}

	/// `{expression}` value, braces included.
	fn braced(&mut self) -> Result<String> {
		let open = self.pos;
		let end = closing_brace(&self.chars, open).ok_or_else(|| AbbreviationError::new("Unclosed expression", open))?;
		self.pos = end + 1;
		Ok(self.chars[open..=end].iter().collect())
	}

	/// `{text}` content, braces excluded.
	fn text(&mut self) -> Result<String> {
		let open = self.pos;
		let end = closing_brace(&self.chars, open).ok_or_else(|| AbbreviationError::new("Unclosed text", open))?;
		self.pos = end + 1;
		Ok(self.chars[open + 1..end].iter().collect())
	}
}

fn close_level(levels: &mut Vec<Vec<Statement>>) {
	let Some(children) = levels.pop() else {
		return;
	};
	if let Some(parent) = levels.last_mut().and_then(|level| level.last_mut()) {
		parent.children_mut().extend(children);
	}
}

fn closing_brace(chars: &[char], open: usize) -> Option<usize> {
	let mut depth = 0usize;
	for (idx, &ch) in chars.iter().enumerate().skip(open) {
		match ch {
			'{' => depth += 1,
			'}' => {
				depth = depth.saturating_sub(1);
				if depth == 0 {
					return Some(idx);
				}
			}
			_ => {}
		}
	}
	None
}

fn is_name_char(ch: char) -> bool {
	ch.is_alphanumeric() || matches!(ch, '-' | ':' | '!' | '$' | '@' | '_')
}

fn is_ident_char(ch: char) -> bool {
	ch.is_alphanumeric() || matches!(ch, '-' | '_' | '$' | '@' | ':')
}

fn unroll(statements: &[Statement], repeat: Option<Repeat>, budget: &mut Budget<'_>) -> Result<Vec<AbbrNode>> {
	let mut nodes = Vec::new();
	for statement in statements {
		match statement {
			Statement::Element { element, children } if element.implicit_repeat && budget.lines.is_some() => {
				let lines = budget.lines.take().unwrap_or_default();
				if lines.is_empty() {
					nodes.push(element.instantiate(children, repeat, budget)?);
					continue;
				}
				let count = lines.len();
				for (idx, line) in lines.into_iter().enumerate() {
					let mut node = element.instantiate(children, Some(Repeat { index: idx + 1, count }), budget)?;
					node.wrapped = Some(line.to_string());
					nodes.push(node);
				}
			}
			Statement::Element { element, children } => match element.repeat {
				Some(count) => {
					for index in 1..=count {
						nodes.push(element.instantiate(children, Some(Repeat { index, count }), budget)?);
					}
				}
				None => nodes.push(element.instantiate(children, repeat, budget)?),
			},
			Statement::Group {
				items,
				repeat: count,
				children,
			} => {
				let copies: Vec<Option<Repeat>> = match *count {
					Some(count) => (1..=count).map(|index| Some(Repeat { index, count })).collect(),
					None => vec![repeat],
				};
				for copy in copies {
					let mut group = unroll(items, copy, budget)?;
					if let Some(last) = group.last_mut() {
						last.children.extend(unroll(children, copy, budget)?);
					}
					nodes.extend(group);
				}
			}
		}
	}
	Ok(nodes)
}

/// Substitutes `$` counters: `$$` pads to two digits, `$@-` counts down,
/// `$@3` starts at 3.
fn number(text: &str, repeat: Option<Repeat>) -> String {
	let Some(repeat) = repeat else {
		return text.to_string();
	};
	let chars: Vec<char> = text.chars().collect();
	let is_counter = |idx: usize| chars.get(idx) == Some(&'$') && chars.get(idx + 1) != Some(&'{');
	let mut out = String::with_capacity(text.len());
	let mut i = 0;
	while i < chars.len() {
		if !is_counter(i) {
			out.push(chars[i]);
			i += 1;
			continue;
		}

		let start = i;
		while is_counter(i) {
			i += 1;
		}
		let width = i - start;
		let mut reverse = false;
		let mut base = 1;
		if chars.get(i) == Some(&'@') {
			i += 1;
			if chars.get(i) == Some(&'-') {
				reverse = true;
				i += 1;
			}
			let digits_start = i;
			while chars.get(i).is_some_and(char::is_ascii_digit) {
				i += 1;
			}
			if i > digits_start {
				base = chars[digits_start..i].iter().collect::<String>().parse().unwrap_or(1);
			}
		}
		let value = if reverse {
			base + repeat.count - repeat.index
		} else {
			base + repeat.index - 1
		};
		out.push_str(&format!("{value:0width$}"));
	}
	out
}
