use crate::range::{CharIdx, CharLen};

/// Owned text carried by an insertion.
pub type Tendril = String;

/// Represents a single text change operation.
///
/// A change describes replacing the text range `[start, end)` with the optional
/// `replacement` text. If `replacement` is [`None`], this represents a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
	/// The starting character index of the change.
	pub start: CharIdx,
	/// The ending character index of the change (exclusive).
	pub end: CharIdx,
	/// The replacement text, or [`None`] for deletion.
	pub replacement: Option<Tendril>,
}

impl Change {
	/// Creates a change inserting `text` at `pos`.
	pub fn insert(pos: CharIdx, text: impl Into<Tendril>) -> Self {
		Self {
			start: pos,
			end: pos,
			replacement: Some(text.into()),
		}
	}

	/// Creates a change replacing `[start, end)` with `text`.
	pub fn replace(start: CharIdx, end: CharIdx, text: impl Into<Tendril>) -> Self {
		Self {
			start,
			end,
			replacement: Some(text.into()),
		}
	}

	/// Creates a change deleting `[start, end)`.
	pub fn delete(start: CharIdx, end: CharIdx) -> Self {
		Self {
			start,
			end,
			replacement: None,
		}
	}
}

/// Bias determines how positions at change boundaries are mapped.
///
/// When mapping a position through a change, bias determines whether the position
/// moves with insertions or stays before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
	/// Position stays before insertions at the same location.
	Left,
	/// Position moves after insertions at the same location.
	Right,
}

/// A text insertion with cached character length.
///
/// Fields are private to enforce the invariant that `char_len` always equals
/// `text.chars().count()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
	text: Tendril,
	char_len: CharLen,
}

impl Insertion {
	/// Creates a new insertion, computing the character length once.
	#[inline]
	pub fn new(text: Tendril) -> Self {
		let char_len = text.chars().count();
		Self { text, char_len }
	}

	/// Returns true if this insertion is empty.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.char_len == 0
	}

	/// Returns the inserted text.
	#[inline]
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Returns the cached character length.
	#[inline]
	pub fn char_len(&self) -> CharLen {
		self.char_len
	}

	/// Appends text from another insertion, updating the cached length.
	pub(super) fn push_str(&mut self, other: &Insertion) {
		self.text.push_str(&other.text);
		self.char_len += other.char_len;
	}
}

/// A single operation in a changeset.
///
/// Operations are the atomic units that make up a `ChangeSet`: retaining
/// existing text, deleting text, or inserting new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
	/// Retain the next N characters from the source document.
	Retain(CharLen),
	/// Delete the next N characters from the source document.
	Delete(CharLen),
	/// Insert new text at the current position.
	Insert(Insertion),
}

/// One contiguous edit of a changeset, seen from both sides.
///
/// `from_a..to_a` is the replaced span in the document before the changes,
/// `from_b..to_b` is the inserted span in the document after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditedRange<'a> {
	/// Start of the replaced span in the old document.
	pub from_a: CharIdx,
	/// End of the replaced span in the old document.
	pub to_a: CharIdx,
	/// Start of the inserted span in the new document.
	pub from_b: CharIdx,
	/// End of the inserted span in the new document.
	pub to_b: CharIdx,
	/// Inserted text.
	pub text: &'a str,
}

impl EditedRange<'_> {
	/// Number of characters removed from the old document.
	#[inline]
	pub fn deleted_len(&self) -> CharLen {
		self.to_a - self.from_a
	}

	/// Number of characters inserted into the new document.
	#[inline]
	pub fn inserted_len(&self) -> CharLen {
		self.to_b - self.from_b
	}
}
