//! Locating an abbreviation to the left of the caret on a single line.

use serde::Serialize;

use crate::syntax::AbbreviationType;

/// An abbreviation found in a line. Offsets are character offsets into the
/// line, `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extracted {
	pub abbreviation: String,
	pub start: usize,
	pub end: usize,
}

/// Extracts the abbreviation ending at `pos` in `line`.
///
/// Brackets are matched while scanning backwards and quoted text inside
/// them is skipped. For markup, closing brackets right after `pos` that
/// close an opener before it (auto-inserted pairs) are included.
pub fn extract(line: &str, pos: usize, kind: AbbreviationType) -> Option<Extracted> {
	let chars: Vec<char> = line.chars().collect();
	let mut end = pos.min(chars.len());
	if kind == AbbreviationType::Markup {
		end = past_auto_closed(&chars, end);
	}

	let mut stack: Vec<char> = Vec::new();
	let mut start = end;
	while start > 0 {
		let idx = start - 1;
		let ch = chars[idx];
		if !stack.is_empty() {
			match ch {
				'"' | '\'' => match chars[..idx].iter().rposition(|&c| c == ch) {
					Some(open) => {
						start = open;
						continue;
					}
					None => break,
				},
				']' | '}' | ')' => stack.push(opener(ch)),
				'[' | '{' | '(' => {
					if stack.last() != Some(&ch) {
						break;
					}
					stack.pop();
				}
				_ => {}
			}
			start = idx;
			continue;
		}

		match ch {
			']' | '}' | ')' => stack.push(opener(ch)),
			'(' => {}
			'>' if kind == AbbreviationType::Markup && closes_tag(&chars, idx) => break,
			ch if is_abbreviation_char(ch, kind) => {}
			_ => break,
		}
		start = idx;
	}

	if !stack.is_empty() || start == end {
		return None;
	}
	Some(Extracted {
		abbreviation: chars[start..end].iter().collect(),
		start,
		end,
	})
}

fn opener(close: char) -> char {
	match close {
		']' => '[',
		'}' => '{',
		_ => '(',
	}
}

fn past_auto_closed(chars: &[char], pos: usize) -> usize {
	let mut open = Vec::new();
	for &ch in &chars[..pos] {
		match ch {
			'[' | '{' | '(' => open.push(ch),
			']' | '}' | ')' => {
				if open.last() == Some(&opener(ch)) {
					open.pop();
				}
			}
			_ => {}
		}
	}

	let mut pos = pos;
	while let Some(&ch) = chars.get(pos) {
		if !matches!(ch, ']' | '}' | ')') || open.last() != Some(&opener(ch)) {
			break;
		}
		open.pop();
		pos += 1;
	}
	pos
}

/// Whether the `>` at `idx` ends an HTML tag such as `<div class="a">`.
fn closes_tag(chars: &[char], idx: usize) -> bool {
	let Some(open) = chars[..idx].iter().rposition(|&c| c == '<') else {
		return false;
	};
	let inner = &chars[open + 1..idx];
	let name = inner.strip_prefix(&['/']).unwrap_or(inner);
	name.first().is_some_and(|c| c.is_ascii_alphabetic()) && !inner.contains(&'>')
}

fn is_abbreviation_char(ch: char, kind: AbbreviationType) -> bool {
	ch.is_alphanumeric()
		|| match kind {
			AbbreviationType::Markup => matches!(
				ch,
				'.' | '#' | '!' | '@' | '$' | ':' | '*' | '+' | '^' | '>' | '-' | '_' | '/' | '%'
			),
			AbbreviationType::Stylesheet => matches!(ch, '#' | '!' | '@' | '$' | ':' | '+' | '-' | '.' | '%'),
		}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("hello ul>li", 11, "ul>li", 6)]
	#[case("<div>ul>li", 10, "ul>li", 5)]
	#[case("</p>a", 5, "a", 4)]
	#[case("a[title=\"x y\"]", 14, "a[title=\"x y\"]", 0)]
	#[case("p{hello world}", 14, "p{hello world}", 0)]
	#[case("(a+b)*2", 7, "(a+b)*2", 0)]
	#[case("x (a+b", 6, "(a+b", 2)]
	#[case("x a{b", 5, "b", 4)]
	fn test_extract_markup(#[case] line: &str, #[case] pos: usize, #[case] abbreviation: &str, #[case] start: usize) {
		let extracted = extract(line, pos, AbbreviationType::Markup).unwrap();
		assert_eq!(extracted.abbreviation, abbreviation);
		assert_eq!(extracted.start, start);
	}

	#[test]
	fn test_markup_looks_past_auto_closed_brackets() {
		let extracted = extract("div[]", 4, AbbreviationType::Markup).unwrap();
		assert_eq!(extracted.abbreviation, "div[]");
		assert_eq!(extracted.end, 5);

		let extracted = extract("div[]", 4, AbbreviationType::Stylesheet);
		assert_eq!(extracted, None);
	}

	#[test]
	fn test_extract_stylesheet() {
		let extracted = extract("a{p10", 5, AbbreviationType::Stylesheet).unwrap();
		assert_eq!(extracted.abbreviation, "p10");
		assert_eq!(extracted.start, 2);
		let extracted = extract("  bgc#fc0!", 10, AbbreviationType::Stylesheet).unwrap();
		assert_eq!(extracted.abbreviation, "bgc#fc0!");
	}

	#[rstest]
	#[case("", 0)]
	#[case("foo ", 4)]
	#[case("a]", 2)]
	fn test_extract_nothing(#[case] line: &str, #[case] pos: usize) {
		assert_eq!(extract(line, pos, AbbreviationType::Markup), None);
	}
}
