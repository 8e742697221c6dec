//! Editing commands over markup documents, stylesheets and numbers.
//!
//! Commands never touch the document: each returns the [`Transaction`] or,
//! for wrapping, the [`Commit`](crate::Commit) the host should apply, or
//! `None` when there is nothing to do.

mod comment;
mod edit_point;
mod number;
mod tag;
mod wrap;


pub use comment::toggle_comment;
pub use edit_point::{Direction, find_edit_point, go_to_edit_point};
pub use number::{extract_number, inc_dec_number, update_number};
pub use tag::{ContextTag, go_to_tag_pair, remove_tag, split_join_tag, tag_context};
pub use wrap::{wrap_range, wrap_with_abbreviation};
use zen_primitives::{Change, Range, Selection, Transaction};
use zen_syntax::SyntaxTree;

use crate::snapshot::Snapshot;

/// Runs `f` for every selection range and merges the resulting changes
/// into one transaction. Selections follow the edit.
fn edit_each<T, F>(snapshot: &Snapshot<'_, T>, selection: &Selection, mut f: F) -> Option<Transaction>
where
	T: SyntaxTree,
	F: FnMut(Range) -> Vec<Change>,
{
	let mut changes: Vec<Change> = selection.iter().flat_map(|range| f(*range)).collect();
	if changes.is_empty() {
		return None;
	}
	changes.sort_by_key(|change| (change.start, change.end));
	changes.dedup();

	let tx = Transaction::change(snapshot.text, changes);
	let selection = tx.map_selection(selection);
	Some(tx.with_selection(selection))
}
