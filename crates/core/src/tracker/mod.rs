//! Abbreviation tracker: follows an abbreviation while it is being typed.
//!
//! The tracker is a plain value. Hosts keep at most one per document and
//! thread it through [`update`] together with every edit batch, which
//! returns the next state. Nothing here mutates the document.

mod build;
mod update;


pub use build::{TrackerOptions, build_tracker};
use serde::Serialize;
pub use update::{TrackerEvent, update};
use zen_abbrev::{AbbreviationConfig, AbbreviationError};
use zen_primitives::{CharLen, Range};

/// Fields shared by every tracker state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerBase {
	/// Source span holding the abbreviation, fixed prefix included.
	pub range: Range,
	/// Text of `range` without the first `offset` characters.
	pub abbreviation: String,
	/// Length of a fixed prefix, such as the JSX `<`, that is part of
	/// `range` but not of the abbreviation.
	pub offset: CharLen,
	/// Started by an explicit command; empty or invalid text does not
	/// dismiss it.
	pub forced: bool,
	/// Hidden from the UI but kept so the user can fix a mistake in place.
	pub inactive: bool,
	/// Activation result captured when tracking started.
	pub config: AbbreviationConfig,
}

/// A tracked abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Tracker {
	/// Text that parses and expands.
	Abbreviation {
		#[serde(flatten)]
		base: TrackerBase,
		/// A single plain element or text node, not worth a preview.
		simple: bool,
		/// Expansion with tab stops rendered as plain text.
		preview: String,
	},
	/// Text the grammar rejected. Only forced trackers reach this state.
	Error {
		#[serde(flatten)]
		base: TrackerBase,
		error: AbbreviationError,
	},
}

impl Tracker {
	pub fn base(&self) -> &TrackerBase {
		match self {
			Tracker::Abbreviation { base, .. } | Tracker::Error { base, .. } => base,
		}
	}

	fn base_mut(&mut self) -> &mut TrackerBase {
		match self {
			Tracker::Abbreviation { base, .. } | Tracker::Error { base, .. } => base,
		}
	}

	pub fn range(&self) -> Range {
		self.base().range
	}

	pub fn abbreviation(&self) -> &str {
		&self.base().abbreviation
	}

	pub fn is_active(&self) -> bool {
		!self.base().inactive
	}

	pub fn is_forced(&self) -> bool {
		self.base().forced
	}

	pub fn config(&self) -> &AbbreviationConfig {
		&self.base().config
	}

	/// Returns the preview of a valid abbreviation.
	pub fn preview(&self) -> Option<&str> {
		match self {
			Tracker::Abbreviation { preview, .. } => Some(preview),
			Tracker::Error { .. } => None,
		}
	}

	pub fn is_simple(&self) -> bool {
		matches!(self, Tracker::Abbreviation { simple: true, .. })
	}

	pub fn error(&self) -> Option<&AbbreviationError> {
		match self {
			Tracker::Abbreviation { .. } => None,
			Tracker::Error { error, .. } => Some(error),
		}
	}

	/// Keeps the current state for new text that no longer builds.
	pub(crate) fn deactivate(mut self, range: Range, abbreviation: String) -> Self {
		let base = self.base_mut();
		base.range = range;
		base.abbreviation = abbreviation;
		base.inactive = true;
		self
	}

	/// Moves the tracked span after an edit that ends before it.
	pub(crate) fn shift(mut self, inserted: CharLen, deleted: CharLen) -> Self {
		let base = self.base_mut();
		base.range = Range::new(
			base.range.from + inserted - deleted,
			base.range.to + inserted - deleted,
		);
		self
	}
}
