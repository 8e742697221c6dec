//! Commit instructions: what expanding an abbreviation inserts and where
//! the carets land.

use serde::Serialize;
use tracing::{debug, trace};
use zen_abbrev::{Expander, FIELD_END, FIELD_START, extract};
use zen_primitives::{CharIdx, Change, Range, RopeSlice, Selection, Transaction};
use zen_syntax::SyntaxTree;

use crate::activation::activation_context;
use crate::snapshot::Snapshot;
use crate::tracker::Tracker;

/// Replace `replace` with `insert`, then select `selections`.
///
/// Selections are in the coordinates of the document after the edit.
///
/// Building or applying a commit leaves the tracker alone: the host sends
/// [`TrackerEvent::Reset`](crate::TrackerEvent::Reset) once the commit is
/// applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
	pub replace: Range,
	pub insert: String,
	pub selections: Vec<Range>,
}

impl Commit {
	/// Builds a commit inserting snippet text with tab stop markers.
	pub fn from_snippet(replace: Range, snippet: &str) -> Self {
		let (insert, selections) = selections_from_snippet(snippet, replace.from);
		Self {
			replace,
			insert,
			selections,
		}
	}

	pub fn to_transaction(&self, doc: RopeSlice) -> Transaction {
		let change = Change::replace(self.replace.from, self.replace.to, self.insert.clone());
		let tx = Transaction::change(doc, [change]);
		match self.selections.split_first() {
			Some((primary, others)) => tx.with_selection(Selection::new(*primary, others.iter().copied())),
			None => tx,
		}
	}
}

/// Strips tab stop markers from `snippet`.
///
/// Returns the plain text and the tab stop ranges, offset by `base`. A
/// field without placeholder text becomes a caret. Without any field the
/// caret goes after the text.
pub fn selections_from_snippet(snippet: &str, base: CharIdx) -> (String, Vec<Range>) {
	let mut text = String::with_capacity(snippet.len());
	let mut ranges = Vec::new();
	let mut open: Option<CharIdx> = None;
	let mut len = 0;

	for ch in snippet.chars() {
		match ch {
			FIELD_START => {
				if let Some(start) = open.replace(len) {
					ranges.push(Range::point(base + start));
				}
			}
			FIELD_END => {
				if let Some(start) = open.take() {
					ranges.push(Range::new(base + start, base + len));
				}
			}
			_ => {
				text.push(ch);
				len += 1;
			}
		}
	}
	if let Some(start) = open {
		ranges.push(Range::point(base + start));
	}
	if ranges.is_empty() {
		ranges.push(Range::point(base + len));
	}
	(text, ranges)
}

/// Expands a valid tracked abbreviation over its whole range.
pub fn expand_tracker<E: Expander + ?Sized>(tracker: &Tracker, expander: &E) -> Option<Commit> {
	let Tracker::Abbreviation { base, .. } = tracker else {
		return None;
	};
	let snippet = expander
		.expand(&base.abbreviation, &base.config)
		.inspect_err(|error| trace!(abbreviation = %base.abbreviation, %error, "commit.expand_failed"))
		.ok()?;
	debug!(abbreviation = %base.abbreviation, from = base.range.from, to = base.range.to, "commit.expand");
	Some(Commit::from_snippet(base.range, &snippet))
}

/// Tab key handler: expands the tracker when it is active and holds the
/// caret. Leaves Tab to the completion popup while one is open.
pub fn handle_tab<E: Expander + ?Sized>(
	tracker: Option<&Tracker>,
	caret: CharIdx,
	completion_active: bool,
	expander: &E,
) -> Option<Commit> {
	if completion_active {
		return None;
	}
	let tracker = tracker.filter(|tracker| tracker.is_active() && tracker.range().contains_pos(caret))?;
	expand_tracker(tracker, expander)
}

/// Expands the abbreviation left of the caret without a tracker.
///
/// The abbreviation is extracted from the caret line and expanded with the
/// settings of the caret position. Requires a single empty selection.
pub fn expand_abbreviation<T, E>(snapshot: &Snapshot<'_, T>, selection: &Selection, expander: &E) -> Option<Commit>
where
	T: SyntaxTree,
	E: Expander + ?Sized,
{
	let range = selection.primary();
	if selection.is_multi() || !range.is_empty() {
		return None;
	}

	let pos = range.from;
	let config = activation_context(snapshot, pos)?;
	let line = snapshot.line_at(pos);
	let extracted = extract(&line.text, pos - line.from, config.kind)?;
	let replace = Range::new(line.from + extracted.start, line.from + extracted.end);

	let snippet = expander
		.expand(&extracted.abbreviation, &config)
		.inspect_err(|error| trace!(abbreviation = %extracted.abbreviation, %error, "commit.expand_failed"))
		.ok()
		.filter(|snippet| !snippet.is_empty())?;
	debug!(abbreviation = %extracted.abbreviation, from = replace.from, to = replace.to, "commit.expand");
	Some(Commit::from_snippet(replace, &snippet))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use zen_abbrev::Engine;

	use super::*;
	use crate::testing::{Doc, Session};

	#[test]
	fn test_selections_from_snippet() {
		assert_eq!(
			selections_from_snippet("<p>\u{FFF0}</p>", 10),
			("<p></p>".to_string(), vec![Range::point(13)])
		);
		assert_eq!(
			selections_from_snippet("a\u{FFF0}x\u{FFF1}b", 0),
			("axb".to_string(), vec![Range::new(1, 2)])
		);
		assert_eq!(
			selections_from_snippet("\u{FFF0}a\u{FFF1}-\u{FFF0}a\u{FFF1}", 0),
			("a-a".to_string(), vec![Range::new(0, 1), Range::new(2, 3)])
		);
		assert_eq!(selections_from_snippet("abc", 5), ("abc".to_string(), vec![Range::point(8)]));
	}

	#[test]
	fn test_expand_tracker() {
		let mut session = Session::new(Doc::markup("<p>|</p>"));
		session.type_text("ul>li");
		let commit = expand_tracker(session.tracker(), &session.engine).unwrap();
		assert_eq!(
			commit,
			Commit {
				replace: Range::new(3, 8),
				insert: "<ul>\n    <li></li>\n</ul>".to_string(),
				selections: vec![Range::point(16)],
			}
		);

		let tx = commit.to_transaction(session.doc.text.slice(..));
		session.doc.apply(&tx);
		assert_eq!(session.doc.text.to_string(), "<p><ul>\n    <li></li>\n</ul></p>");
		assert_eq!(session.doc.caret, 16);
	}

	#[test]
	fn test_applied_commit_keeps_tracker_until_reset() {
		let mut session = Session::new(Doc::markup("<p>|</p>"));
		session.type_text("b");
		let commit = expand_tracker(session.tracker(), &session.engine).unwrap();
		session.doc.apply(&commit.to_transaction(session.doc.text.slice(..)));
		assert_eq!(session.doc.contents(), "<p><b></b></p>");
		assert_eq!(session.tracker().abbreviation(), "b");

		session.send(crate::TrackerEvent::Reset);
		assert!(session.tracker.is_none());
	}

	#[test]
	fn test_expand_tracker_uses_line_indent() {
		let mut session = Session::new(Doc::markup("<div>\n\t|\n</div>"));
		session.type_text("ul>li");
		let commit = expand_tracker(session.tracker(), &session.engine).unwrap();
		assert_eq!(commit.insert, "<ul>\n\t    <li></li>\n\t</ul>");
	}

	#[test]
	fn test_handle_tab() {
		let mut session = Session::new(Doc::markup("<p>|</p>"));
		session.type_text("b>i");
		let tracker = session.tracker.as_ref();
		assert!(handle_tab(tracker, 6, false, &session.engine).is_some());
		assert_eq!(handle_tab(tracker, 6, true, &session.engine), None);
		assert_eq!(handle_tab(tracker, 1, false, &session.engine), None);
		assert_eq!(handle_tab(None, 6, false, &session.engine), None);

		session.type_text(";");
		assert_eq!(handle_tab(session.tracker.as_ref(), 7, false, &session.engine), None);
	}

	#[test]
	fn test_expand_abbreviation_markup() {
		let doc = Doc::markup("<div>ul>li|</div>");
		let commit = expand_abbreviation(&doc.snapshot(), &doc.selection(), &Engine::default()).unwrap();
		assert_eq!(commit.replace, Range::new(5, 10));
		assert_eq!(commit.insert, "<ul>\n    <li></li>\n</ul>");
		assert_eq!(commit.selections, vec![Range::point(18)]);
	}

	#[test]
	fn test_expand_abbreviation_stylesheet() {
		let doc = Doc::stylesheet("a{\n\tp10|\n}");
		let commit = expand_abbreviation(&doc.snapshot(), &doc.selection(), &Engine::default()).unwrap();
		assert_eq!(commit.replace, Range::new(4, 7));
		assert_eq!(commit.insert, "padding: 10px;");
		assert_eq!(commit.selections, vec![Range::point(18)]);
	}

	#[test]
	fn test_expand_abbreviation_rejects() {
		let engine = Engine::default();
		let doc = Doc::markup("<div>ul|</div>");
		assert_eq!(expand_abbreviation(&doc.snapshot(), &Selection::single(5, 7), &engine), None);

		let doc = Doc::markup("<di|v></div>");
		assert_eq!(expand_abbreviation(&doc.snapshot(), &doc.selection(), &engine), None);

		let doc = Doc::markup("<div> |</div>");
		assert_eq!(expand_abbreviation(&doc.snapshot(), &doc.selection(), &engine), None);
	}
}
