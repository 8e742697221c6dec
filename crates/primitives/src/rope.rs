//! Rope utilities and extensions.

use ropey::RopeSlice;

use crate::range::{CharIdx, Range};

/// A single line of a document, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
	/// Zero-based line number.
	pub number: usize,
	/// Character offset of the first character of the line.
	pub from: CharIdx,
	/// Line text, excluding `\n` / `\r\n`.
	pub text: String,
}

impl Line {
	/// Returns the offset right after the last character of the line.
	pub fn to(&self) -> CharIdx {
		self.from + self.text.chars().count()
	}

	/// Returns the span of the line's text.
	pub fn range(&self) -> Range {
		Range::new(self.from, self.to())
	}

	/// Returns the leading whitespace of the line.
	pub fn indent(&self) -> &str {
		let trimmed = self.text.trim_start();
		&self.text[..self.text.len() - trimmed.len()]
	}
}

/// Returns the line containing `pos`.
pub fn line_at(text: RopeSlice, pos: CharIdx) -> Line {
	let pos = pos.min(text.len_chars());
	line(text, text.char_to_line(pos))
}

/// Returns line `number`, clamped to the last line.
pub fn line(text: RopeSlice, number: usize) -> Line {
	let number = number.min(text.len_lines().saturating_sub(1));
	let from = text.line_to_char(number);
	let mut content = text.line(number).to_string();
	while content.ends_with('\n') || content.ends_with('\r') {
		content.pop();
	}

	Line { number, from, text: content }
}

/// Returns the text of `range`, clamped to the document.
pub fn slice(text: RopeSlice, range: Range) -> String {
	let range = range.clamp(text.len_chars());
	if !range.is_valid() {
		return String::new();
	}
	text.slice(range.from..range.to).to_string()
}

/// Returns the character at `pos`, if any.
pub fn char_at(text: RopeSlice, pos: CharIdx) -> Option<char> {
	(pos < text.len_chars()).then(|| text.char(pos))
}
