use zen_primitives::{CharIdx, Range};

use super::{CssContext, CssKind, CssMatch};

/// A property of inline stylesheet code. Offsets are relative to the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineProp {
	pub name: Range,
	/// Present once a colon was seen and a non-space character followed it.
	pub value: Option<Range>,
}

/// Splits inline stylesheet code such as `color: red; margin: 0` into
/// properties without a full parse.
///
/// `;` ends a property and the first `:` separates its name from its value.
/// Leading whitespace is skipped. Scanning stops at the first `;` past
/// `limit`.
pub fn parse_inline_props(code: &str, limit: CharIdx) -> Vec<InlineProp> {
	let mut props: Vec<InlineProp> = Vec::new();
	let mut open = false;
	let mut colon = false;

	for (i, ch) in code.chars().enumerate() {
		if open {
			if let Some(prop) = props.last_mut() {
				match prop.value.as_mut() {
					Some(value) => value.to = i,
					None if !colon => prop.name.to = i,
					None => {}
				}
			}
		}

		match ch {
			';' => {
				open = false;
				if i > limit {
					break;
				}
			}
			':' => {
				if open {
					colon = true;
				}
			}
			ch if ch.is_whitespace() => {}
			_ if open => {
				if let Some(prop) = props.last_mut().filter(|prop| colon && prop.value.is_none()) {
					prop.value = Some(Range::point(i));
				}
			}
			_ => {
				props.push(InlineProp {
					name: Range::point(i),
					value: None,
				});
				open = true;
				colon = false;
			}
		}
	}

	if open {
		if let Some(prop) = props.last_mut() {
			match prop.value.as_mut() {
				Some(value) => value.to += 1,
				None if !colon => prop.name.to += 1,
				None => {}
			}
		}
	}
	props
}

/// Builds a stylesheet context for inline code at `pos`, a position inside
/// `code`. Produced ranges are shifted by `base` into host coordinates.
pub fn inline_css_context(code: &str, pos: CharIdx, base: CharIdx) -> CssContext {
	let len = code.chars().count();
	let mut ctx = CssContext {
		ancestors: Vec::new(),
		current: None,
		inline: true,
		embedded: Some(Range::new(pos + base, pos + base + len)),
	};

	let text = |range: Range| -> String {
		code.chars()
			.skip(range.from)
			.take(range.len())
			.collect::<String>()
			.trim()
			.to_string()
	};

	for prop in parse_inline_props(code, pos) {
		if let Some(value) = prop.value.filter(|value| value.contains_pos(pos)) {
			ctx.current = Some(CssMatch {
				name: text(value),
				kind: CssKind::PropertyValue,
				range: value.offset(base),
			});
			ctx.ancestors.push(CssMatch {
				name: text(prop.name),
				kind: CssKind::PropertyName,
				range: Range::new(prop.name.from, value.to).offset(base),
			});
			break;
		}
		if prop.name.contains_pos(pos) {
			let end = prop.value.map_or(prop.name.to, |value| value.to);
			ctx.current = Some(CssMatch {
				name: text(prop.name),
				kind: CssKind::PropertyName,
				range: Range::new(prop.name.from, end).offset(base),
			});
			break;
		}
	}
	ctx
}
