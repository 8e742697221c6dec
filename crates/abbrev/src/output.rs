//! Output buffer shared by the markup and stylesheet renderers.

use crate::config::{FieldStyle, OutputOptions};

/// Marks the start of a tab stop in snippet output.
pub const FIELD_START: char = '\u{FFF0}';
/// Marks the end of a tab stop placeholder in snippet output.
pub const FIELD_END: char = '\u{FFF1}';

/// Values for `${name}` variables in snippets.
const VARIABLES: &[(&str, &str)] = &[
	("lang", "en"),
	("locale", "en-US"),
	("charset", "UTF-8"),
	("newline", "\n"),
];

/// Auto-generated tab stops are numbered after any explicit snippet field.
const AUTO_FIELD_BASE: usize = 100;

pub(crate) struct Output<'o> {
	buf: String,
	options: &'o OutputOptions,
	handled: Option<usize>,
	next_auto: usize,
}

impl<'o> Output<'o> {
	pub(crate) fn new(options: &'o OutputOptions) -> Self {
		Self {
			buf: String::new(),
			options,
			handled: None,
			next_auto: AUTO_FIELD_BASE,
		}
	}

	pub(crate) fn options(&self) -> &OutputOptions {
		self.options
	}

	pub(crate) fn len(&self) -> usize {
		self.buf.len()
	}

	/// Drops everything written after byte offset `len`.
	pub(crate) fn truncate(&mut self, len: usize) {
		self.buf.truncate(len);
	}

	pub(crate) fn push_str(&mut self, text: &str) {
		self.buf.push_str(text);
	}

	pub(crate) fn push(&mut self, ch: char) {
		self.buf.push(ch);
	}

	/// Starts a new line indented `depth` levels past the base indent.
	pub(crate) fn newline(&mut self, depth: usize) {
		self.buf.push('\n');
		self.buf.push_str(&self.options.base_indent);
		for _ in 0..depth {
			self.buf.push_str(&self.options.indent);
		}
	}

	/// Writes tab stop `index`. In snippet mode the first index written is
	/// wrapped in field markers, every other field is written as its
	/// placeholder.
	pub(crate) fn field(&mut self, index: usize, placeholder: &str) {
		match self.options.field {
			FieldStyle::Placeholder => self.buf.push_str(placeholder),
			FieldStyle::Snippet => {
				if self.handled.is_none_or(|handled| handled == index) {
					self.handled = Some(index);
					self.buf.push(FIELD_START);
					if !placeholder.is_empty() {
						self.buf.push_str(placeholder);
						self.buf.push(FIELD_END);
					}
				} else {
					self.buf.push_str(placeholder);
				}
			}
		}
	}

	/// Writes an empty tab stop numbered after the explicit ones.
	pub(crate) fn auto_field(&mut self) {
		let index = self.next_auto;
		self.next_auto += 1;
		self.field(index, "");
	}

	/// Writes snippet text, resolving `${N:placeholder}` fields and
	/// `${name}` variables. Newlines continue at `depth`, tabs become the
	/// configured indent unit.
	pub(crate) fn template(&mut self, text: &str, depth: usize) {
		let chars: Vec<char> = text.chars().collect();
		let mut i = 0;
		while i < chars.len() {
			let ch = chars[i];
			match ch {
				'$' if chars.get(i + 1) == Some(&'{') => match closing_brace(&chars, i + 1) {
					Some(end) => {
						let body: String = chars[i + 2..end].iter().collect();
						self.placeholder_token(&body);
						i = end + 1;
						continue;
					}
					None => self.buf.push(ch),
				},
				'\n' => self.newline(depth),
				'\t' => self.buf.push_str(&self.options.indent),
				_ => self.buf.push(ch),
			}
			i += 1;
		}
	}

	fn placeholder_token(&mut self, body: &str) {
		let (head, placeholder) = body.split_once(':').unwrap_or((body, ""));
		if let Ok(index) = head.parse::<usize>() {
			self.field(index, &strip_fields(placeholder));
			return;
		}

		match VARIABLES.iter().find(|(name, _)| *name == head) {
			Some((_, value)) => self.buf.push_str(value),
			None => self.buf.push_str(head),
		}
	}

	pub(crate) fn finish(self) -> String {
		self.buf
	}
}

/// Returns the index of the `}` matching the `{` at `open`.
fn closing_brace(chars: &[char], open: usize) -> Option<usize> {
	let mut depth = 0usize;
	for (idx, &ch) in chars.iter().enumerate().skip(open) {
		match ch {
			'{' => depth += 1,
			'}' => {
				depth -= 1;
				if depth == 0 {
					return Some(idx);
				}
			}
			_ => {}
		}
	}
	None
}

/// Replaces nested `${N:placeholder}` fields with their placeholder text.
pub(crate) fn strip_fields(text: &str) -> String {
	let chars: Vec<char> = text.chars().collect();
	let mut out = String::new();
	let mut i = 0;
	while i < chars.len() {
		if chars[i] == '$' && chars.get(i + 1) == Some(&'{') {
			if let Some(end) = closing_brace(&chars, i + 1) {
				let body: String = chars[i + 2..end].iter().collect();
				let (head, placeholder) = body.split_once(':').unwrap_or((body.as_str(), ""));
				if head.parse::<usize>().is_ok() {
					out.push_str(&strip_fields(placeholder));
				} else {
					out.push_str(head);
				}
				i = end + 1;
				continue;
			}
		}
		out.push(chars[i]);
		i += 1;
	}
	out
}

/// Returns true if `text` contains a `${N...}` tab stop.
pub(crate) fn has_fields(text: &str) -> bool {
	let mut rest = text;
	while let Some(idx) = rest.find("${") {
		rest = &rest[idx + 2..];
		if rest.starts_with(|c: char| c.is_ascii_digit()) {
			return true;
		}
	}
	false
}
