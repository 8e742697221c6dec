use smallvec::{SmallVec, smallvec};

use crate::range::{CharIdx, Range};


/// A set of non-overlapping ranges with a designated primary.
///
/// A selection always contains at least one range. The primary range is the
/// one commands read the caret from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
	/// The collection of selection ranges (always non-empty).
	ranges: SmallVec<[Range; 1]>,
	/// Index of the primary range within `ranges`.
	primary_index: usize,
}

impl Selection {
	/// Create a new selection with at least one range.
	///
	/// The `primary` range is the one that will be used for caret-based
	/// operations. Additional ranges can be provided via the `others` iterator.
	pub fn new(primary: Range, others: impl IntoIterator<Item = Range>) -> Self {
		let mut ranges: SmallVec<[Range; 1]> = smallvec![primary];
		ranges.extend(others);

		let mut sel = Self { ranges, primary_index: 0 };
		sel.normalize();
		sel
	}

	/// Creates a single-range selection.
	pub fn single(from: CharIdx, to: CharIdx) -> Self {
		Self {
			ranges: smallvec![Range::new(from.min(to), from.max(to))],
			primary_index: 0,
		}
	}

	/// Creates a point selection (zero-width cursor).
	pub fn point(pos: CharIdx) -> Self {
		Self::single(pos, pos)
	}

	/// Returns the primary range.
	pub fn primary(&self) -> Range {
		self.ranges[self.primary_index]
	}

	/// Returns the caret of the primary range: its far end.
	pub fn caret(&self) -> CharIdx {
		self.primary().to
	}

	/// Returns all ranges as a slice.
	pub fn ranges(&self) -> &[Range] {
		&self.ranges
	}

	/// Returns the number of ranges in this selection.
	///
	/// This is always at least 1 (Selection cannot be empty).
	#[allow(clippy::len_without_is_empty, reason = "a selection always holds at least one range")]
	pub fn len(&self) -> usize {
		self.ranges.len()
	}

	/// Returns true when more than one range is selected.
	pub fn is_multi(&self) -> bool {
		self.ranges.len() > 1
	}

	/// Iterates over all ranges.
	pub fn iter(&self) -> impl Iterator<Item = &Range> {
		self.ranges.iter()
	}

	/// Transforms all ranges using the given function, returning a new selection.
	pub fn transform<F>(&self, mut f: F) -> Self
	where
		F: FnMut(&Range) -> Range,
	{
		let primary = f(&self.primary());
		let others = self
			.ranges
			.iter()
			.enumerate()
			.filter(|&(i, _)| i != self.primary_index)
			.map(|(_, r)| f(r));

		Self::new(primary, others)
	}

	/// Normalize the selection by sorting ranges and merging overlaps.
	///
	/// Adjacent ranges such as `[0, 5)` and `[5, 10)` stay separate; equal
	/// carets collapse into one.
	fn normalize(&mut self) {
		if self.ranges.len() <= 1 {
			return;
		}

		let primary = self.ranges[self.primary_index];

		self.ranges.sort_by_key(|r: &Range| r.from);

		let mut merged: SmallVec<[Range; 1]> = SmallVec::new();
		let mut primary_index = 0;

		for range in &self.ranges {
			if let Some(last) = merged.last_mut() {
				let overlaps = last.from < range.to && range.from < last.to;
				let same_caret = last.is_empty() && range.is_empty() && last.from == range.from;
				if overlaps || same_caret {
					let old_last = *last;
					*last = last.union(range);
					if *range == primary || old_last == primary || last.covers(&primary) {
						primary_index = merged.len() - 1;
					}
					continue;
				}
			}

			if *range == primary {
				primary_index = merged.len();
			}
			merged.push(*range);
		}

		self.ranges = merged;
		self.primary_index = primary_index.min(self.ranges.len().saturating_sub(1));
	}
}

impl Default for Selection {
	fn default() -> Self {
		Self::point(0)
	}
}

impl From<Range> for Selection {
	fn from(range: Range) -> Self {
		Self {
			ranges: smallvec![range],
			primary_index: 0,
		}
	}
}
