//! Closing text for constructs left open at the end of input.
//!
//! Both grammars give up on an element or block that is still open when the
//! input ends and wrap everything after it in an error node. Appending the
//! missing end tags or braces to a copy of the source and reparsing keeps
//! the structure the user is typing into; nodes past the real end are
//! clamped or hidden when the tree is presented.

use tree_sitter::Node as RawNode;

/// End tags for the start tags the HTML grammar could only place in an
/// error node, innermost first.
pub(super) fn closing_tags(root: RawNode<'_>, text: &str) -> String {
	let mut open = Vec::new();
	stray_start_tags(root, text, &mut open);
	open.iter().rev().map(|name| format!("</{name}>")).collect()
}

fn stray_start_tags<'s>(node: RawNode<'_>, text: &'s str, open: &mut Vec<&'s str>) {
	let mut cursor = node.walk();
	for child in node.children(&mut cursor) {
		if node.kind() == "ERROR" && child.kind() == "start_tag" {
			let name = child
				.named_child(0)
				.filter(|name| name.kind() == "tag_name")
				.and_then(|name| name.utf8_text(text.as_bytes()).ok());
			if let Some(name) = name {
				open.push(name);
			}
		} else if child.has_error() {
			stray_start_tags(child, text, open);
		}
	}
}

/// Closing braces for blocks still open at the end of a stylesheet.
///
/// Braces inside strings and comments are not counted.
pub(super) fn closing_braces(text: &str) -> String {
	let mut depth = 0usize;
	let mut chars = text.chars().peekable();
	while let Some(ch) = chars.next() {
		match ch {
			'{' => depth += 1,
			'}' => depth = depth.saturating_sub(1),
			'"' | '\'' => {
				while let Some(next) = chars.next() {
					match next {
						'\\' => {
							chars.next();
						}
						quote if quote == ch => break,
						_ => {}
					}
				}
			}
			'/' if chars.peek() == Some(&'*') => {
				chars.next();
				let mut prev = '\0';
				for next in chars.by_ref() {
					if prev == '*' && next == '/' {
						break;
					}
					prev = next;
				}
			}
			_ => {}
		}
	}
	"}".repeat(depth)
}
