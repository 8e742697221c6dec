use indexmap::IndexMap;
use serde::Serialize;
use zen_primitives::{CharIdx, Change, Range, Selection, Transaction};
use zen_syntax::kind::markup::{CLOSE_TAG, ELEMENT, OPEN_TAG, SELF_CLOSING_TAG, TAG_NAME};
use zen_syntax::{Side, SyntaxNode, SyntaxTree};

use super::edit_each;
use crate::context::tag_attributes;
use crate::snapshot::Snapshot;

/// The tags of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextTag {
	pub name: String,
	pub attributes: IndexMap<String, Option<String>>,
	/// The open tag, or the whole self-closing tag.
	pub open: Range,
	/// Missing for self-closing and unterminated elements.
	pub close: Option<Range>,
}

/// Returns the innermost element at `pos`.
pub fn tag_context<'t, T: SyntaxTree>(snapshot: &Snapshot<'t, T>, pos: CharIdx) -> Option<ContextTag> {
	let element = snapshot
		.tree
		.resolve(pos, Side::After)
		.ancestors()
		.find(|node| node.is(ELEMENT))?;

	if let Some(tag) = element.child(SELF_CLOSING_TAG) {
		return Some(ContextTag {
			name: tag.child(TAG_NAME).map(|name| snapshot.slice(name.range()))?,
			attributes: tag_attributes(snapshot, tag),
			open: tag.range(),
			close: None,
		});
	}

	let open = element.child(OPEN_TAG)?;
	Some(ContextTag {
		name: open.child(TAG_NAME).map(|name| snapshot.slice(name.range()))?,
		attributes: tag_attributes(snapshot, open),
		open: open.range(),
		close: element.child(CLOSE_TAG).map(|close| close.range()),
	})
}

/// Moves each caret between the open and close tag of its element.
pub fn go_to_tag_pair<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, selection: &Selection) -> Option<Transaction> {
	let mut moved = false;
	let next = selection.transform(|range| {
		let pos = range.from;
		let target = tag_context(snapshot, pos).and_then(|tag| {
			let close = tag.close?;
			if pos >= tag.open.from && pos < tag.open.to {
				Some(close.from)
			} else if pos >= close.from && pos < close.to {
				Some(tag.open.from)
			} else {
				None
			}
		});
		match target {
			Some(target) => {
				moved = true;
				Range::point(target)
			}
			None => *range,
		}
	});
	moved.then(|| Transaction::select(snapshot.text, next))
}

/// Joins an element into a self-closing tag, dropping its content, or
/// splits a self-closing tag into an open and close pair.
pub fn split_join_tag<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, selection: &Selection) -> Option<Transaction> {
	edit_each(snapshot, selection, |range| {
		let Some(tag) = tag_context(snapshot, range.from) else {
			return Vec::new();
		};
		let before_end = |offset: usize| tag.open.to.checked_sub(offset).and_then(|pos| snapshot.char_at(pos));

		match tag.close {
			Some(close) => {
				let slash = if before_end(2).is_some_and(char::is_whitespace) { "/>" } else { " />" };
				vec![Change::replace(tag.open.to - 1, close.to, slash)]
			}
			None => {
				let close = format!("</{}>", tag.name);
				if before_end(2) != Some('/') {
					return vec![Change::insert(tag.open.to, close)];
				}
				let mut from = tag.open.to - 2;
				if from > 0 && snapshot.char_at(from - 1).is_some_and(char::is_whitespace) {
					from -= 1;
				}
				vec![Change::replace(from, tag.open.to, format!(">{close}"))]
			}
		}
	})
}

/// Removes the tags of the element at each caret, keeping its content.
///
/// Content spanning several lines is shifted back to the indentation of
/// the removed open tag.
pub fn remove_tag<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, selection: &Selection) -> Option<Transaction> {
	edit_each(snapshot, selection, |range| {
		tag_context(snapshot, range.from)
			.map(|tag| remove_tag_changes(snapshot, &tag))
			.unwrap_or_default()
	})
}

fn remove_tag_changes<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, tag: &ContextTag) -> Vec<Change> {
	let open = tag.open;
	let Some(close) = tag.close else {
		return vec![Change::delete(open.from, open.to)];
	};

	let inner = Range::new(open.to, close.from).narrow_to_non_space(snapshot.text);
	if inner.is_empty() {
		return vec![Change::delete(open.from, close.to)];
	}

	let mut changes = vec![Change::delete(open.from, inner.from)];
	let first_line = snapshot.line_at(open.from);
	let last_line = snapshot.line_at(close.to);
	if first_line.number != last_line.number {
		let base_indent = first_line.indent().to_string();
		let inner_indent = snapshot.line_at(inner.from).indent().chars().count();
		// The first content line loses its indentation with the open tag.
		for number in first_line.number + 2..=last_line.number {
			let line = snapshot.line(number);
			if line.from >= inner.to {
				break;
			}
			let prefix: String = line.text.chars().take(inner_indent).collect();
			if prefix.chars().count() == inner_indent && prefix.chars().all(char::is_whitespace) {
				changes.push(Change::replace(line.from, line.from + inner_indent, base_indent.clone()));
			}
		}
	}
	changes.push(Change::delete(inner.to, close.to));
	changes
}
