use zen_primitives::{CharIdx, Change, Range, Selection, Transaction};
use zen_syntax::kind::{markup, stylesheet};
use zen_syntax::{Layer, Side, SyntaxNode, SyntaxTree};

use super::edit_each;
use crate::snapshot::Snapshot;

/// Comment delimiters of one grammar.
#[derive(Debug, Clone, Copy)]
struct Delimiters {
	open: &'static str,
	close: &'static str,
}

const MARKUP: Delimiters = Delimiters {
	open: "<!--",
	close: "-->",
};

const STYLESHEET: Delimiters = Delimiters { open: "/*", close: "*/" };

/// Comments out the element, rule or declaration at each caret, or
/// uncomments the comment holding it.
///
/// Comments directly inside the node being commented are stripped first,
/// since comments do not nest.
pub fn toggle_comment<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, selection: &Selection) -> Option<Transaction> {
	edit_each(snapshot, selection, |range| {
		let pos = range.from;
		if snapshot.tree.is_active_at(Layer::Stylesheet, pos) {
			toggle(snapshot, pos, Layer::Stylesheet, STYLESHEET, &[stylesheet::RULE_SET, stylesheet::DECLARATION])
		} else if snapshot.tree.is_active_at(Layer::Markup, pos) {
			toggle(snapshot, pos, Layer::Markup, MARKUP, &[markup::ELEMENT])
		} else {
			Vec::new()
		}
	})
}

fn toggle<T: SyntaxTree>(
	snapshot: &Snapshot<'_, T>,
	pos: CharIdx,
	layer: Layer,
	delimiters: Delimiters,
	targets: &[&str],
) -> Vec<Change> {
	let found = snapshot
		.tree
		.resolve(pos, Side::After)
		.ancestors()
		.filter(|node| node.layer() == layer)
		.find(|node| node.is(markup::COMMENT) || targets.contains(&node.name()));
	let Some(node) = found else {
		return Vec::new();
	};

	if node.is(markup::COMMENT) {
		return strip_comment(snapshot, node.range(), delimiters);
	}

	let range = node.range();
	let mut changes = vec![
		Change::insert(range.from, format!("{} ", delimiters.open)),
		Change::insert(range.to, format!(" {}", delimiters.close)),
	];
	changes.extend(strip_child_comments(snapshot, node, layer, delimiters));
	if node.is(stylesheet::RULE_SET) {
		if let Some(block) = node.child(stylesheet::BLOCK) {
			changes.extend(strip_child_comments(snapshot, block, layer, delimiters));
		}
	}
	changes
}

fn strip_child_comments<'t, T: SyntaxTree>(
	snapshot: &Snapshot<'t, T>,
	node: T::Node<'t>,
	layer: Layer,
	delimiters: Delimiters,
) -> Vec<Change> {
	node.children_named(markup::COMMENT)
		.filter(|comment| snapshot.tree.is_active_at(layer, comment.from()))
		.flat_map(|comment| strip_comment(snapshot, comment.range(), delimiters))
		.collect()
}

/// Removes the delimiters of the comment at `range` together with the
/// whitespace padding its content.
fn strip_comment<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, range: Range, delimiters: Delimiters) -> Vec<Change> {
	let text = snapshot.slice(range);
	let open = delimiters.open.chars().count();
	let close = delimiters.close.chars().count();
	if !text.starts_with(delimiters.open) || !text.ends_with(delimiters.close) || range.len() < open + close {
		return Vec::new();
	}

	let inner = Range::new(range.from + open, range.to - close).narrow_to_non_space(snapshot.text);
	if inner.is_empty() {
		return vec![Change::delete(range.from, range.to)];
	}
	vec![Change::delete(range.from, inner.from), Change::delete(inner.to, range.to)]
}
