//! Core types for text editing: ranges, selections and edit batches.

/// Text range type and range algebra.
pub mod range;
/// Rope utilities and extensions.
pub mod rope;
/// Selection types for single and multi-cursor editing.
pub mod selection;
/// Edit batches: changesets and transactions.
pub mod transaction;

pub use range::{CharIdx, CharLen, Range};
pub use rope::{Line, char_at, line_at};
pub use ropey::{Rope, RopeSlice};
pub use selection::Selection;
pub use transaction::{Bias, Change, ChangeSet, EditedRange, Transaction};
