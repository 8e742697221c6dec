use ropey::RopeSlice;

/// A position in the text, measured in characters (not bytes).
///
/// This is the canonical coordinate space for Zen.
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
///
/// This is distinct from CharIdx to avoid accidentally passing an index
/// where a length is expected or vice versa.
pub type CharLen = usize;

/// A half-open text span `[from, to)`.
///
/// Ranges are plain values: every operation returns a new range instead of
/// mutating a shared one. A well-formed range has `from <= to`; callers that
/// compute ends arithmetically check [`Range::is_valid`] before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub struct Range {
	/// Inclusive start of the span.
	pub from: CharIdx,
	/// Exclusive end of the span.
	pub to: CharIdx,
}

impl Range {
	/// Creates a new range from `from` to `to`.
	pub const fn new(from: CharIdx, to: CharIdx) -> Self {
		Self { from, to }
	}

	/// Creates an empty range at the given position.
	pub const fn point(pos: CharIdx) -> Self {
		Self::new(pos, pos)
	}

	/// Returns the length of the range in characters.
	#[inline]
	pub fn len(&self) -> CharLen {
		self.to.saturating_sub(self.from)
	}

	/// Returns true if `from == to`.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.from == self.to
	}

	/// Returns true if `from <= to`.
	#[inline]
	pub fn is_valid(&self) -> bool {
		self.from <= self.to
	}

	/// Returns true if `pos` lies within the range, including both endpoints.
	///
	/// A caret placed right after the last character of a span counts as
	/// inside it.
	#[inline]
	pub fn contains_pos(&self, pos: CharIdx) -> bool {
		pos >= self.from && pos <= self.to
	}

	/// Returns true if this range fully contains `other`.
	#[inline]
	pub fn covers(&self, other: &Range) -> bool {
		self.from <= other.from && self.to >= other.to
	}

	/// Moves both endpoints forward by `base`.
	///
	/// Used to map ranges computed over an embedded substring back into
	/// host document coordinates.
	#[inline]
	pub fn offset(self, base: CharIdx) -> Self {
		Self::new(self.from + base, self.to + base)
	}

	/// Returns the smallest range covering both `self` and `other`.
	pub fn union(&self, other: &Range) -> Self {
		Self::new(self.from.min(other.from), self.to.max(other.to))
	}

	/// Returns a copy of this range shrunk so it starts and ends at a
	/// non-whitespace character.
	///
	/// A range holding only whitespace collapses to an empty range at the
	/// position where the leading scan stopped.
	pub fn narrow_to_non_space(&self, text: RopeSlice) -> Self {
		let mut from = self.from;
		let mut to = self.to;

		while from < to && text.char(from).is_whitespace() {
			from += 1;
		}

		while to > from && text.char(to - 1).is_whitespace() {
			to -= 1;
		}

		Self::new(from, to)
	}

	/// Clamps both endpoints to `[0, max_char]`.
	pub fn clamp(&self, max_char: CharIdx) -> Self {
		Self::new(self.from.min(max_char), self.to.min(max_char))
	}
}

impl From<std::ops::Range<CharIdx>> for Range {
	fn from(range: std::ops::Range<CharIdx>) -> Self {
		Self::new(range.start, range.end)
	}
}

impl From<Range> for std::ops::Range<CharIdx> {
	fn from(range: Range) -> Self {
		range.from..range.to
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use ropey::Rope;

	use super::*;

	#[test]
	fn test_range_basics() {
		let r = Range::new(5, 10);
		assert_eq!(r.len(), 5);
		assert!(!r.is_empty());
		assert!(r.is_valid());
	}

	#[test]
	fn test_range_point() {
		let r = Range::point(5);
		assert!(r.is_empty());
		assert_eq!(r.from, 5);
		assert_eq!(r.to, 5);
	}

	#[test]
	fn test_range_contains_pos_is_inclusive() {
		let r = Range::new(5, 10);
		assert!(!r.contains_pos(4));
		assert!(r.contains_pos(5));
		assert!(r.contains_pos(7));
		assert!(r.contains_pos(10));
		assert!(!r.contains_pos(11));
	}

	#[test]
	fn test_empty_range_contains_its_point() {
		assert!(Range::point(3).contains_pos(3));
		assert!(!Range::point(3).surrounds(3));
	}

	#[test]
	fn test_range_covers() {
		let outer = Range::new(0, 10);
		assert!(outer.covers(&Range::new(2, 5)));
		assert!(outer.covers(&outer));
		assert!(!Range::new(2, 5).covers(&outer));
		assert!(!outer.covers(&Range::new(8, 12)));
	}

	#[test]
	fn test_offset_and_union() {
		assert_eq!(Range::new(1, 4).offset(10), Range::new(11, 14));
		assert_eq!(Range::new(1, 4).union(&Range::new(3, 9)), Range::new(1, 9));
	}

	#[test]
	fn test_narrow_to_non_space() {
		let text = Rope::from("<a>  \n  hello \n</a>");
		let narrowed = Range::new(3, 15).narrow_to_non_space(text.slice(..));
		assert_eq!(narrowed, Range::new(8, 13));
		assert_eq!(text.slice(narrowed.from..narrowed.to).to_string(), "hello");
	}

	#[test]
	fn test_narrow_whitespace_only_collapses() {
		let text = Rope::from("a    b");
		let narrowed = Range::new(1, 5).narrow_to_non_space(text.slice(..));
		assert!(narrowed.is_empty());
	}

	fn arb_range() -> impl Strategy<Value = Range> {
		(0usize..100, 0usize..100).prop_map(|(a, b)| Range::new(a.min(b), a.max(b)))
	}

	proptest! {
		#[test]
		fn prop_covers_is_reflexive(r in arb_range()) {
			prop_assert!(r.covers(&r));
		}

		#[test]
		fn prop_covers_is_antisymmetric(a in arb_range(), b in arb_range()) {
			if a.covers(&b) && b.covers(&a) {
				prop_assert_eq!(a, b);
			}
		}

		#[test]
		fn prop_union_covers_both(a in arb_range(), b in arb_range()) {
			let u = a.union(&b);
			prop_assert!(u.covers(&a));
			prop_assert!(u.covers(&b));
		}
	}
}
