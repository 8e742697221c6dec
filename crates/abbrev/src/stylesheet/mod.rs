//! Stylesheet abbreviations: `p10-20`, `bgc#fc0`, `dib`, `m:a!`.

mod render;

#[cfg(test)]
mod tests;

pub(crate) use render::render;

use crate::error::AbbreviationError;

/// A parsed stylesheet abbreviation: properties joined by `+`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylesheetAbbreviation {
	pub properties: Vec<CssProperty>,
}

/// One abbreviated property. `name` is the abbreviation as typed (`bgc`,
/// `dib`) and is empty for a bare value such as `#fc0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssProperty {
	pub name: String,
	pub values: Vec<CssValue>,
	pub important: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssValue {
	/// Numeric literal with an optional, possibly abbreviated, unit.
	Number { value: String, unit: String },
	/// Hex digits following `#`.
	Color(String),
	Keyword(String),
}

pub(crate) fn parse(abbreviation: &str) -> Result<StylesheetAbbreviation, AbbreviationError> {
	let mut parser = Parser {
		chars: abbreviation.chars().collect(),
		pos: 0,
	};
	let mut properties = Vec::new();
	loop {
		properties.push(parser.property()?);
		match parser.peek() {
			None => break,
			Some('+') => parser.pos += 1,
			Some(_) => return Err(parser.unexpected()),
		}
	}
	Ok(StylesheetAbbreviation { properties })
}

struct Parser {
	chars: Vec<char>,
	pos: usize,
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

	fn property(&mut self) -> Result<CssProperty, AbbreviationError> {
		let start = self.pos;
		let name = match self.peek() {
			Some('@') => {
				self.pos += 1;
				format!("@{}", self.take_while(|ch| ch.is_ascii_alphabetic() || ch == '-'))
			}
			Some('!') if matches!(self.peek_at(1), None | Some('+')) => {
				self.pos += 1;
				"!".to_string()
			}
			_ => self.take_while(|ch| ch.is_ascii_alphabetic()),
		};

		let mut property = CssProperty {
			name,
			..CssProperty::default()
		};
		let mut keywords = false;
		if self.peek() == Some(':') {
			self.pos += 1;
			keywords = true;
		}

		// A value may start here: right after the name, the colon, or a `-`
		// separator.
		let mut expect_value = true;
		while let Some(ch) = self.peek() {
			let next = self.peek_at(1);
			let number_follows = next.is_some_and(|ch| ch.is_ascii_digit() || ch == '.');
			match ch {
				'#' => {
					self.pos += 1;
					let hex = self.take_while(|ch| ch.is_ascii_hexdigit());
					property.values.push(CssValue::Color(hex));
					expect_value = false;
				}
				'-' if expect_value && number_follows => {
					property.values.push(self.number());
					expect_value = false;
				}
				'-' if next.is_some_and(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '#' | '.')) => {
					self.pos += 1;
					expect_value = true;
					keywords = true;
				}
				ch if expect_value && (ch.is_ascii_digit() || (ch == '.' && number_follows)) => {
					property.values.push(self.number());
					expect_value = false;
				}
				ch if expect_value && keywords && ch.is_ascii_alphabetic() => {
					let keyword = self.take_while(|ch| ch.is_ascii_alphanumeric());
					property.values.push(CssValue::Keyword(keyword));
					expect_value = false;
				}
				'!' => {
					self.pos += 1;
					property.important = true;
					break;
				}
				_ => break,
			}
		}

		if self.pos == start {
			return Err(self.unexpected());
		}
		Ok(property)
	}

	fn number(&mut self) -> CssValue {
		let mut value = String::new();
		if self.peek() == Some('-') {
			value.push('-');
			self.pos += 1;
		}
		let mut seen_dot = false;
		while let Some(ch) = self.peek() {
			let is_fraction = ch == '.' && !seen_dot && self.peek_at(1).is_some_and(|ch| ch.is_ascii_digit());
			if !ch.is_ascii_digit() && !is_fraction {
				break;
			}
			seen_dot |= is_fraction;
			value.push(ch);
			self.pos += 1;
		}
		let unit = self.take_while(|ch| ch.is_ascii_alphabetic() || ch == '%');
		CssValue::Number { value, unit }
	}
}
