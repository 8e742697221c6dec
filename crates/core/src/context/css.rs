use zen_primitives::{CharIdx, Range};
use zen_syntax::kind::stylesheet::{BLOCK, COLON, DECLARATION, PROPERTY_NAME, RULE_SET};
use zen_syntax::{Side, SyntaxNode, SyntaxTree};

use super::{CssContext, CssKind, CssMatch};
use crate::snapshot::Snapshot;

/// Builds the stylesheet context at `pos`.
///
/// Walks up from the node before `pos`: rule sets contribute their selector,
/// declarations their property name and, when `pos` is inside it, their
/// value. The innermost match becomes `current` only if `pos` falls inside
/// its own span (the selector text for rules).
pub fn css_context<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, pos: CharIdx) -> CssContext {
	let mut stack: Vec<CssMatch> = Vec::new();

	for node in snapshot.tree.resolve(pos, Side::Before).ancestors() {
		if node.is(RULE_SET) {
			stack.push(CssMatch {
				name: snapshot.slice(selector_range(node)),
				kind: CssKind::Selector,
				range: node.range(),
			});
		} else if node.is(DECLARATION) {
			let (name, value) = property_ranges(node);
			if let Some(value) = value.filter(|value| value.contains_pos(pos)) {
				stack.push(CssMatch {
					name: snapshot.slice(value),
					kind: CssKind::PropertyValue,
					range: value,
				});
			}
			if let Some(name) = name {
				stack.push(CssMatch {
					name: snapshot.slice(name),
					kind: CssKind::PropertyName,
					range: name,
				});
			}
		}
	}

	let mut current = None;
	if !stack.is_empty() {
		let tip = stack.remove(0);
		let range = match tip.kind {
			CssKind::Selector => Range::new(tip.range.from, tip.range.from + tip.name.chars().count()),
			_ => tip.range,
		};
		if range.contains_pos(pos) {
			current = Some(CssMatch { range, ..tip });
		} else {
			stack.insert(0, tip);
		}
	}

	stack.reverse();
	CssContext {
		ancestors: stack,
		current,
		inline: false,
		embedded: None,
	}
}

/// Span from the rule start to the end of the last child before its block.
fn selector_range<N: SyntaxNode>(rule: N) -> Range {
	let to = rule
		.children()
		.take_while(|child| !child.is(BLOCK))
		.last()
		.map_or(rule.from(), |child| child.to());
	Range::new(rule.from(), to)
}

/// Property name and value spans of a declaration.
///
/// The value starts after the name and an optional colon and ends with the
/// last child. A colon without value nodes yields an empty value right
/// after the colon.
fn property_ranges<N: SyntaxNode>(decl: N) -> (Option<Range>, Option<Range>) {
	let Some(name) = decl.first_child().filter(|child| child.is(PROPERTY_NAME)) else {
		return (None, None);
	};

	let mut next = name.next_sibling();
	let mut colon = None;
	if let Some(sep) = next.filter(|node| node.is(COLON)) {
		colon = Some(sep);
		next = sep.next_sibling();
	}

	let value = match (next, colon) {
		(Some(start), _) => decl
			.last_child()
			.map(|last| Range::new(start.from(), last.to().max(start.from()))),
		(None, Some(sep)) => Some(Range::point(sep.to())),
		(None, None) => None,
	};
	(Some(name.range()), value)
}
