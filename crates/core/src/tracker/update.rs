use tracing::{debug, trace};
use zen_abbrev::{AbbreviationType, Expander};
use zen_primitives::{CharIdx, ChangeSet, EditedRange, Range, Selection};
use zen_syntax::{Layer, SyntaxTree};

use super::build::{TrackerOptions, build_tracker};
use super::Tracker;
use crate::activation::activation_context;
use crate::snapshot::Snapshot;

/// Input driving the tracker.
#[derive(Debug, Clone, Copy)]
pub enum TrackerEvent<'a> {
	/// Document edits, with the selection after them.
	Changes {
		changes: &'a ChangeSet,
		selection: &'a Selection,
		/// The edits come from filling in an expanded snippet.
		expansion_active: bool,
	},
	/// Explicit request to track the selected text.
	Force { selection: &'a Selection },
	/// Explicit cancellation.
	Reset,
	/// A completion was accepted.
	CompletionPicked,
}

/// Returns the tracker state following `prev` after `event`.
///
/// `snapshot` is the document after the event.
pub fn update<T, E>(
	prev: Option<Tracker>,
	event: TrackerEvent<'_>,
	snapshot: &Snapshot<'_, T>,
	expander: &E,
) -> Option<Tracker>
where
	T: SyntaxTree,
	E: Expander + ?Sized,
{
	let selection = match event {
		TrackerEvent::Changes { selection, .. } | TrackerEvent::Force { selection } => Some(selection),
		TrackerEvent::Reset | TrackerEvent::CompletionPicked => None,
	};
	if selection.is_some_and(Selection::is_multi) {
		return reset(prev, "multiple selections");
	}

	match event {
		TrackerEvent::Reset => reset(prev, "reset"),
		TrackerEvent::CompletionPicked => reset(prev, "completion picked"),
		TrackerEvent::Force { selection } => force(prev, selection, snapshot, expander),
		TrackerEvent::Changes {
			changes,
			expansion_active,
			..
		} => {
			if changes.is_empty() {
				return prev;
			}
			if expansion_active {
				return reset(prev, "snippet in progress");
			}
			if !snapshot.config.tracking_enabled() {
				return None;
			}
			apply_changes(prev, changes, snapshot, expander)
		}
	}
}

fn reset(prev: Option<Tracker>, reason: &str) -> Option<Tracker> {
	if let Some(tracker) = prev {
		debug!(abbreviation = %tracker.abbreviation(), reason, "tracker.reset");
	}
	None
}

fn force<T, E>(prev: Option<Tracker>, selection: &Selection, snapshot: &Snapshot<'_, T>, expander: &E) -> Option<Tracker>
where
	T: SyntaxTree,
	E: Expander + ?Sized,
{
	let range = selection.primary();
	let Some(config) = activation_context(snapshot, range.from) else {
		trace!(pos = range.from, "tracker.force_rejected");
		return prev;
	};

	let options = TrackerOptions {
		config,
		forced: true,
		offset: 0,
	};
	match build_tracker(snapshot, range, &options, expander) {
		Some(tracker) => {
			debug!(abbreviation = %tracker.abbreviation(), from = range.from, to = range.to, "tracker.forced");
			Some(tracker)
		}
		None => prev,
	}
}

fn apply_changes<T, E>(
	prev: Option<Tracker>,
	changes: &ChangeSet,
	snapshot: &Snapshot<'_, T>,
	expander: &E,
) -> Option<Tracker>
where
	T: SyntaxTree,
	E: Expander + ?Sized,
{
	if prev.as_ref().is_none_or(|tracker| !tracker.is_active()) {
		let mut started = None;
		for edit in changes.iter_changes().filter(|edit| !edit.text.is_empty()) {
			if let Some(tracker) = start_tracking(snapshot, edit.from_b, edit.text, expander) {
				started = Some(tracker);
			}
		}
		if let Some(tracker) = started {
			debug!(
				abbreviation = %tracker.abbreviation(),
				from = tracker.range().from,
				to = tracker.range().to,
				"tracker.started"
			);
			return Some(tracker);
		}
	}

	let mut tracker = prev?;
	for edit in changes.iter_changes() {
		tracker = continue_tracking(tracker, &edit, snapshot, expander)?;
	}
	Some(tracker)
}

/// Prefix and first-character rules of one abbreviation dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
	Markup,
	Stylesheet,
	Jsx,
}

impl Dialect {
	fn at<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, pos: CharIdx) -> Self {
		if snapshot.tree.is_active_at(Layer::Stylesheet, pos) {
			Dialect::Stylesheet
		} else if snapshot.config.syntax.is_jsx() {
			Dialect::Jsx
		} else {
			Dialect::Markup
		}
	}

	fn allows_prefix(self, prefix: Option<char>) -> bool {
		let boundary = |ch: char| ch.is_whitespace() || matches!(ch, '>' | ';' | '"' | '\'');
		match (self, prefix) {
			(Dialect::Jsx, prefix) => prefix == Some('<'),
			(_, None) => true,
			(Dialect::Markup, Some(ch)) => boundary(ch),
			(Dialect::Stylesheet, Some(ch)) => boundary(ch) || ch == ':',
		}
	}

	fn allows_start(self, ch: char) -> bool {
		ch.is_ascii_alphabetic()
			|| match self {
				Dialect::Markup => matches!(ch, '.' | '#' | '!' | '@' | '[' | '('),
				Dialect::Stylesheet => matches!(ch, '!' | '@' | '#'),
				Dialect::Jsx => matches!(ch, '.' | '#' | '[' | '('),
			}
	}

	fn allows(self, prefix: Option<char>, ch: char) -> bool {
		self.allows_prefix(prefix) && self.allows_start(ch)
	}
}

/// Starts tracking when `text`, inserted at `pos`, is a single character
/// that can open an abbreviation there.
fn start_tracking<T, E>(snapshot: &Snapshot<'_, T>, pos: CharIdx, text: &str, expander: &E) -> Option<Tracker>
where
	T: SyntaxTree,
	E: Expander + ?Sized,
{
	let mut chars = text.chars();
	let (Some(ch), None) = (chars.next(), chars.next()) else {
		return None;
	};

	let line = snapshot.line_at(pos);
	let prefix = if pos > line.from { snapshot.char_at(pos - 1) } else { None };
	let dialect = Dialect::at(snapshot, pos);
	if !dialect.allows(prefix, ch) {
		return None;
	}

	let config = activation_context(snapshot, pos)?;
	if config.kind == AbbreviationType::Stylesheet {
		if !Dialect::Stylesheet.allows(prefix, ch) {
			return None;
		}
		// Inside a property value only colours may start tracking.
		if !config.scope().starts_with("@@") && ch != '#' {
			return None;
		}
	}

	let (from, offset) = if dialect == Dialect::Jsx && prefix == Some('<') {
		(pos - 1, 1)
	} else {
		(pos, 0)
	};
	let options = TrackerOptions {
		config,
		forced: false,
		offset,
	};
	build_tracker(snapshot, Range::new(from, pos + 1), &options, expander)
}

/// Replays one edit against an existing tracker.
fn continue_tracking<T, E>(
	tracker: Tracker,
	edit: &EditedRange<'_>,
	snapshot: &Snapshot<'_, T>,
	expander: &E,
) -> Option<Tracker>
where
	T: SyntaxTree,
	E: Expander + ?Sized,
{
	let range = tracker.range();
	let inserted = edit.inserted_len();
	let deleted = edit.deleted_len();

	if !range.contains_pos(edit.from_b) {
		if tracker.is_active() {
			return destroyed(tracker, edit.from_b);
		}
		if edit.from_b > range.to {
			return Some(tracker);
		}
		if edit.from_b + deleted <= range.from {
			return Some(tracker.shift(inserted, deleted));
		}
		return destroyed(tracker, edit.from_b);
	}

	let new_to = match (range.to + inserted).checked_sub(deleted) {
		Some(to) if to > range.from || (to == range.from && tracker.is_forced()) => to,
		_ => return destroyed(tracker, edit.from_b),
	};
	if edit.text.contains(['\r', '\n']) {
		return destroyed(tracker, edit.from_b);
	}

	let range = Range::new(range.from, new_to);
	let options = TrackerOptions::from(tracker.base());
	match build_tracker(snapshot, range, &options, expander) {
		Some(next) => {
			trace!(abbreviation = %next.abbreviation(), from = range.from, to = range.to, "tracker.extended");
			Some(next)
		}
		None => {
			let abbreviation: String = snapshot.slice(range).chars().skip(options.offset).collect();
			debug!(%abbreviation, "tracker.deactivated");
			Some(tracker.deactivate(range, abbreviation))
		}
	}
}

fn destroyed(tracker: Tracker, pos: CharIdx) -> Option<Tracker> {
	debug!(abbreviation = %tracker.abbreviation(), pos, "tracker.destroyed");
	None
}
