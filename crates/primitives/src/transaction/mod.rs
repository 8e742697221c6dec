//! Edit batches: a changeset plus an optional selection to apply with it.

mod changeset;
mod types;

#[cfg(test)]
mod tests;

pub use changeset::ChangeSet;
pub use types::{Bias, Change, EditedRange, Insertion, Operation, Tendril};

use crate::{Rope, RopeSlice, Selection};

/// A batch of document changes, optionally carrying the selection that
/// should be active once the changes are applied.
///
/// Transactions are plain instructions: building one never touches the
/// document, the host applies it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
	changes: ChangeSet,
	selection: Option<Selection>,
}

impl Transaction {
	/// Creates a transaction from sorted, non-overlapping changes.
	pub fn change(doc: RopeSlice, changes: impl IntoIterator<Item = Change>) -> Self {
		Self {
			changes: ChangeSet::from_changes(doc, changes),
			selection: None,
		}
	}

	/// Creates a transaction inserting `text` at every selection range,
	/// replacing the selected text.
	pub fn insert(doc: RopeSlice, selection: &Selection, text: Tendril) -> Self {
		let changes = selection
			.iter()
			.map(|r| Change::replace(r.from, r.to, text.clone()));
		Self::change(doc, changes)
	}

	/// Creates a selection-only transaction.
	pub fn select(doc: RopeSlice, selection: Selection) -> Self {
		Self::change(doc, std::iter::empty()).with_selection(selection)
	}

	/// Sets the selection to apply after the changes.
	pub fn with_selection(mut self, selection: Selection) -> Self {
		self.selection = Some(selection);
		self
	}

	/// Returns the underlying changeset.
	pub fn changes(&self) -> &ChangeSet {
		&self.changes
	}

	/// Returns the selection carried by this transaction, if any.
	pub fn selection(&self) -> Option<&Selection> {
		self.selection.as_ref()
	}

	/// Applies the changes to `doc`.
	pub fn apply(&self, doc: &mut Rope) {
		self.changes.apply(doc);
	}

	/// Maps every range of `selection` through the changes.
	pub fn map_selection(&self, selection: &Selection) -> Selection {
		selection.transform(|r| {
			if r.is_empty() {
				return crate::Range::point(self.changes.map_pos(r.from, Bias::Right));
			}
			crate::Range::new(
				self.changes.map_pos(r.from, Bias::Left),
				self.changes.map_pos(r.to, Bias::Right),
			)
		})
	}
}
