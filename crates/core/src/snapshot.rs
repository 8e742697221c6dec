use zen_primitives::rope;
use zen_primitives::{CharIdx, Line, Range, RopeSlice};
use zen_syntax::SyntaxTree;

use crate::config::Config;

/// One document revision as seen by the resolver: its text, the syntax tree
/// parsed from that text and the active configuration.
///
/// Snapshots are cheap borrowed views; build a new one after every edit.
pub struct Snapshot<'a, T: SyntaxTree> {
	pub text: RopeSlice<'a>,
	pub tree: &'a T,
	pub config: &'a Config,
}

impl<T: SyntaxTree> Clone for Snapshot<'_, T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: SyntaxTree> Copy for Snapshot<'_, T> {}

impl<'a, T: SyntaxTree> Snapshot<'a, T> {
	pub fn new(text: RopeSlice<'a>, tree: &'a T, config: &'a Config) -> Self {
		Self { text, tree, config }
	}

	/// Returns the text of `range`, clamped to the document.
	pub fn slice(&self, range: Range) -> String {
		rope::slice(self.text, range)
	}

	/// Returns the line containing `pos`.
	pub fn line_at(&self, pos: CharIdx) -> Line {
		rope::line_at(self.text, pos)
	}

	/// Returns line `number`, clamped to the last line.
	pub fn line(&self, number: usize) -> Line {
		rope::line(self.text, number)
	}

	pub fn char_at(&self, pos: CharIdx) -> Option<char> {
		rope::char_at(self.text, pos)
	}

	pub fn len(&self) -> usize {
		self.text.len_chars()
	}

	pub fn is_empty(&self) -> bool {
		self.text.len_chars() == 0
	}
}
