use super::types::{Bias, Change, EditedRange, Insertion, Operation, Tendril};
use crate::range::{CharIdx, CharLen};
use crate::{Rope, RopeSlice};

/// A sequence of operations representing a set of changes to a document.
///
/// Changes are stored as retain, delete and insert operations covering the
/// whole source document, which keeps position mapping and edit replay linear.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
	/// Sequence of retain/delete/insert operations.
	pub(super) changes: Vec<Operation>,
	/// Length of the source document before changes.
	pub(super) len: usize,
	/// Length of the document after applying changes.
	pub(super) len_after: usize,
}

impl ChangeSet {
	/// Creates a new empty changeset.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a changeset from sorted, non-overlapping changes against `doc`.
	///
	/// Changes that overlap a previous one or run past the end of the
	/// document are clamped.
	pub fn from_changes(doc: RopeSlice, changes: impl IntoIterator<Item = Change>) -> Self {
		let doc_len = doc.len_chars();
		let mut cs = Self::new();
		let mut last = 0;

		for change in changes {
			let start = change.start.clamp(last, doc_len);
			let end = change.end.clamp(start, doc_len);
			cs.retain(start - last);
			if let Some(text) = change.replacement {
				cs.insert(text);
			}
			cs.delete(end - start);
			last = end;
		}

		cs.retain(doc_len - last);
		cs
	}

	/// Returns the length of the source document (before changes).
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns the length of the document after applying changes.
	pub fn len_after(&self) -> usize {
		self.len_after
	}

	/// Returns true if this changeset only retains text.
	pub fn is_empty(&self) -> bool {
		self.changes.iter().all(|op| matches!(op, Operation::Retain(_)))
	}

	/// Returns a slice of all operations in this changeset.
	pub fn changes(&self) -> &[Operation] {
		&self.changes
	}

	/// Adds a retain operation, preserving N characters from the source.
	///
	/// Consecutive retain operations are automatically merged.
	pub(crate) fn retain(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}

		self.len += n;
		self.len_after += n;

		if let Some(Operation::Retain(count)) = self.changes.last_mut() {
			*count += n;
		} else {
			self.changes.push(Operation::Retain(n));
		}
	}

	/// Adds a delete operation, removing N characters from the source.
	///
	/// Consecutive delete operations are automatically merged.
	pub(crate) fn delete(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}

		self.len += n;

		if let Some(Operation::Delete(count)) = self.changes.last_mut() {
			*count += n;
		} else {
			self.changes.push(Operation::Delete(n));
		}
	}

	/// Adds an insert operation at the current position.
	///
	/// Inserts are kept ahead of an adjacent delete and merged with a
	/// neighbouring insert, so every edit group holds at most one of each.
	pub(crate) fn insert(&mut self, text: Tendril) {
		if text.is_empty() {
			return;
		}

		let ins = Insertion::new(text);
		self.len_after += ins.char_len();

		match self.changes.as_mut_slice() {
			[.., Operation::Insert(prev)] | [.., Operation::Insert(prev), Operation::Delete(_)] => {
				prev.push_str(&ins);
			}
			[.., last @ Operation::Delete(_)] => {
				let del = std::mem::replace(last, Operation::Insert(ins));
				self.changes.push(del);
			}
			_ => {
				self.changes.push(Operation::Insert(ins));
			}
		}
	}

	/// Applies this changeset to a document, modifying it in place.
	pub fn apply(&self, doc: &mut Rope) {
		let mut pos = 0;
		for op in &self.changes {
			match op {
				Operation::Retain(n) => {
					pos += n;
				}
				Operation::Delete(n) => {
					doc.remove(pos..pos + n);
				}
				Operation::Insert(ins) => {
					doc.insert(pos, ins.text());
					pos += ins.char_len();
				}
			}
		}
	}

	/// Maps a position through this changeset using the specified bias.
	pub fn map_pos(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		let mut old_pos = 0;
		let mut new_pos = 0;

		for op in &self.changes {
			if old_pos > pos {
				break;
			}

			match op {
				Operation::Retain(n) => {
					if old_pos + n > pos {
						return new_pos + (pos - old_pos);
					}
					old_pos += n;
					new_pos += n;
				}
				Operation::Delete(n) => {
					if old_pos + n > pos {
						return new_pos;
					}
					old_pos += n;
				}
				Operation::Insert(ins) => {
					if old_pos == pos && bias == Bias::Left {
						// Position is exactly at insert point, stay before
					} else {
						new_pos += ins.char_len();
					}
				}
			}
		}

		new_pos + (pos - old_pos)
	}

	/// Iterates over the contiguous edits of this changeset in document order.
	///
	/// Each item reports the replaced span in old-document coordinates and
	/// the inserted span in new-document coordinates, so `from_b` is `from_a`
	/// shifted by every preceding edit.
	pub fn iter_changes(&self) -> impl Iterator<Item = EditedRange<'_>> + '_ {
		let mut ops = self.changes.iter().peekable();
		let mut pos_a = 0;
		let mut pos_b = 0;

		std::iter::from_fn(move || {
			loop {
				match ops.next()? {
					Operation::Retain(n) => {
						pos_a += n;
						pos_b += n;
					}
					first => {
						let (from_a, from_b) = (pos_a, pos_b);
						let mut text = "";
						let mut op = Some(first);

						while let Some(current) = op {
							match current {
								Operation::Insert(ins) => {
									text = ins.text();
									pos_b += ins.char_len();
								}
								Operation::Delete(n) => pos_a += n,
								Operation::Retain(_) => unreachable!("retain ends an edit group"),
							}
							op = ops.next_if(|next| !matches!(next, Operation::Retain(_)));
						}

						return Some(EditedRange {
							from_a,
							to_a: pos_a,
							from_b,
							to_b: pos_b,
							text,
						});
					}
				}
			}
		})
	}
}
