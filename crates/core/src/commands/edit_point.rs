use zen_primitives::{CharIdx, Range, Selection, Transaction};
use zen_syntax::SyntaxTree;

use crate::snapshot::Snapshot;

/// Direction of an edit point search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	Forward,
	Backward,
}

impl Direction {
	fn step(self, pos: CharIdx) -> Option<CharIdx> {
		match self {
			Direction::Forward => pos.checked_add(1),
			Direction::Backward => pos.checked_sub(1),
		}
	}
}

/// Moves each range to a caret at the nearest edit point in `direction`.
/// Ranges without an edit point stay where they are.
pub fn go_to_edit_point<T: SyntaxTree>(
	snapshot: &Snapshot<'_, T>,
	selection: &Selection,
	direction: Direction,
) -> Option<Transaction> {
	let mut moved = false;
	let next = selection.transform(|range| match find_edit_point(snapshot, range.from, direction) {
		Some(pos) => {
			moved = true;
			Range::point(pos)
		}
		None => *range,
	});
	moved.then(|| Transaction::select(snapshot.text, next))
}

/// Finds the nearest edit point from `from`: an empty attribute value, the
/// gap between a tag end and the next tag, or the end of a blank line.
///
/// The character next to `from` is skipped so the point under the caret is
/// not found again.
pub fn find_edit_point<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, from: CharIdx, direction: Direction) -> Option<CharIdx> {
	let mut pos = direction.step(from)?;
	loop {
		pos = direction.step(pos)?;
		let cur = snapshot.char_at(pos)?;
		let prev = pos.checked_sub(1).and_then(|prev| snapshot.char_at(prev));
		let next = snapshot.char_at(pos + 1);

		if matches!(cur, '"' | '\'') && next == Some(cur) && prev == Some('=') {
			return Some(pos + 1);
		}
		if cur == '<' && prev == Some('>') {
			return Some(pos);
		}
		if matches!(cur, '\n' | '\r') {
			let line = snapshot.line_at(direction.step(pos).unwrap_or(pos));
			if line.text.trim().is_empty() {
				return Some(line.to());
			}
		}
	}
}
