use pretty_assertions::assert_eq;
use proptest::prelude::*;
use zen_abbrev::AbbreviationType;
use zen_core::context::CssKind;
use zen_core::{Context, Tracker, TrackerEvent, activation_context, handle_tab, resolve_context};
use zen_primitives::{Change, Range, Selection, Transaction};

use crate::testing::{Doc, Session};

#[test]
fn caret_inside_tag_name_is_not_a_start() {
	let doc = Doc::markup("<div|>");
	assert_eq!(activation_context(&doc.snapshot(), doc.caret), None);
}

#[test]
fn typing_between_tags_tracks_abbreviation() {
	let doc = Doc::markup("<div>|</div>");
	let config = activation_context(&doc.snapshot(), doc.caret).unwrap();
	assert_eq!(config.kind, AbbreviationType::Markup);

	let mut session = Session::new(doc);
	session.type_text("u");
	assert_eq!(session.tracker().range(), Range::new(5, 6));
	session.type_text("l");
	assert_eq!(session.tracker().range(), Range::new(5, 7));
	assert_eq!(session.tracker().abbreviation(), "ul");
	assert!(session.tracker().is_active());
}

#[test]
fn typing_after_property_colon_tracks_colour() {
	let doc = Doc::stylesheet("a{color:|}");
	let Some(Context::Css(ctx)) = resolve_context(&doc.snapshot(), doc.caret) else {
		panic!("expected a stylesheet context");
	};
	assert_eq!(ctx.current.map(|m| m.kind), Some(CssKind::PropertyValue));
	assert!(activation_context(&doc.snapshot(), doc.caret).is_some());

	let mut session = Session::new(doc);
	session.type_text("#");
	assert_eq!(session.tracker().abbreviation(), "#");
	assert_eq!(session.tracker().range(), Range::new(8, 9));
}

fn tracked_div() -> Session {
	let mut session = Session::new(Doc::markup("<template>|</template>"));
	session.type_text("div");
	assert_eq!(session.tracker().range(), Range::new(10, 13));
	session
}

#[test]
fn insertion_at_range_end_extends_tracker() {
	let mut session = tracked_div();
	session.edit(vec![Change::insert(13, "XY")], 15);
	let tracker = session.tracker();
	assert_eq!(tracker.range(), Range::new(10, 15));
	assert_eq!(tracker.abbreviation(), "divXY");
	assert!(tracker.is_active());
}

#[test]
fn edit_before_active_tracker_destroys_it() {
	let mut session = tracked_div();
	session.edit(vec![Change::delete(5, 8)], 10);
	assert_eq!(session.tracker, None);
}

#[test]
fn forced_tracking_needs_legal_position() {
	let mut session = Session::new(Doc::markup("<di|v></div>"));
	let selection = session.doc.selection();
	session.force(&selection);
	assert_eq!(session.tracker, None);
}

#[test]
fn inactive_tracker_follows_edits_before_it() {
	let mut session = Session::new(Doc::markup("<template>|</template>"));
	session.type_text("ul.");
	assert!(!session.tracker().is_active());
	assert_eq!(session.tracker().range(), Range::new(10, 13));

	session.edit(vec![Change::delete(1, 3)], 11);
	let tracker = session.tracker();
	assert_eq!(tracker.range(), Range::new(8, 11));
	assert_eq!(tracker.abbreviation(), "ul.");
	assert!(!tracker.is_active());

	session.type_text("a");
	let tracker = session.tracker();
	assert!(tracker.is_active());
	assert_eq!(tracker.abbreviation(), "ul.a");
	assert_eq!(tracker.preview(), Some("<ul class=\"a\"></ul>"));
}

#[test]
fn edit_overlapping_inactive_tracker_destroys_it() {
	let mut session = Session::new(Doc::markup("<template>|</template>"));
	session.type_text("ul.");
	session.edit(vec![Change::delete(8, 11)], 10);
	assert_eq!(session.tracker, None);
}

#[test]
fn fresh_selector_may_follow_indentation() {
	let doc = Doc::stylesheet("a{}\n    p|");
	assert!(activation_context(&doc.snapshot(), doc.caret).is_some());

	let doc = Doc::stylesheet("a{}\n    pq|");
	assert_eq!(activation_context(&doc.snapshot(), doc.caret), None);
}

#[test]
fn tab_commits_tracked_abbreviation() {
	let mut session = Session::new(Doc::markup("<div>|</div>"));
	session.type_text("ul>li");
	let commit = handle_tab(session.tracker.as_ref(), session.doc.caret, false, &session.engine).unwrap();

	let tx = commit.to_transaction(session.doc.text.slice(..));
	session.doc.apply(&tx);
	session.send(TrackerEvent::Reset);

	assert_eq!(session.doc.contents(), "<div><ul>\n    <li></li>\n</ul></div>");
	assert_eq!(session.doc.caret, 18);
	assert_eq!(session.tracker, None);
}

#[test]
fn multiple_carets_stop_tracking() {
	let mut session = Session::new(Doc::markup("<div>|</div>"));
	session.type_text("ul");
	let selection = Selection::new(Range::point(7), [Range::point(0)]);
	let tx = Transaction::change(session.doc.text.slice(..), [Change::insert(7, "l")]);
	session.doc.apply(&tx);
	session.send(TrackerEvent::Changes {
		changes: tx.changes(),
		selection: &selection,
		expansion_active: false,
	});
	assert_eq!(session.tracker, None);
}

#[test]
fn context_resolution_is_idempotent() {
	let doc = Doc::markup("<div class=\"a\"><p style=\"color: red\">x</p></div>");
	for pos in 0..=doc.text.len_chars() {
		let snapshot = doc.snapshot();
		assert_eq!(resolve_context(&snapshot, pos), resolve_context(&snapshot, pos));
	}
}

#[derive(Debug, Clone)]
enum Op {
	Type(char),
	Backspace,
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		4 => prop::sample::select(vec!['u', 'l', 'i', 'a', 'p', '>', '+', '^', '.', '#', '*', '[', ']', '{', '}', ' ', ';'])
			.prop_map(Op::Type),
		1 => Just(Op::Backspace),
	]
}

fn check_tracker(session: &Session) -> Result<(), TestCaseError> {
	let Some(tracker) = &session.tracker else {
		return Ok(());
	};
	let range = tracker.range();
	prop_assert!(range.from <= range.to);
	prop_assert!(range.to <= session.doc.text.len_chars());

	let text: String = session
		.doc
		.text
		.slice(range.from..range.to)
		.chars()
		.skip(tracker.base().offset)
		.collect();
	prop_assert_eq!(tracker.abbreviation(), text.as_str());

	if let Tracker::Abbreviation { preview, .. } = tracker {
		prop_assert!(!preview.is_empty());
	}
	Ok(())
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn tracker_matches_document_while_typing(ops in prop::collection::vec(op(), 1..30)) {
		let mut session = Session::new(Doc::markup("<div>|</div>"));
		for op in ops {
			match op {
				Op::Type(ch) => session.type_text(&ch.to_string()),
				Op::Backspace => session.backspace(),
			}
			check_tracker(&session)?;
		}
	}
}
