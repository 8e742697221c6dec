use proptest::prelude::*;

use super::*;
use crate::{Range, Rope, Selection};

#[test]
fn test_changeset_retain() {
	let doc = Rope::from("hello");
	let cs = ChangeSet::from_changes(doc.slice(..), []);
	assert_eq!(cs.len(), 5);
	assert_eq!(cs.len_after(), 5);
	assert!(cs.is_empty());
}

#[test]
fn test_changeset_delete() {
	let doc = Rope::from("hello");
	let cs = ChangeSet::from_changes(doc.slice(..), [Change::delete(0, 2)]);
	assert_eq!(cs.len(), 5);
	assert_eq!(cs.len_after(), 3);
}

#[test]
fn test_changeset_insert() {
	let doc = Rope::from("hello");
	let cs = ChangeSet::from_changes(doc.slice(..), [Change::insert(0, "world")]);
	assert_eq!(cs.len(), 5);
	assert_eq!(cs.len_after(), 10);
}

#[test]
fn test_changeset_apply_replacement() {
	let mut doc = Rope::from("hello");
	let cs = ChangeSet::from_changes(doc.slice(..), [Change::replace(0, 2, "aa")]);
	cs.apply(&mut doc);
	assert_eq!(doc.to_string(), "aallo");
}

#[test]
fn test_transaction_insert_at_caret() {
	let mut doc = Rope::from("hello world");
	let tx = Transaction::insert(doc.slice(..), &Selection::point(5), ",".into());
	tx.apply(&mut doc);
	assert_eq!(doc.to_string(), "hello, world");
}

#[test]
fn test_transaction_replaces_selection() {
	let mut doc = Rope::from("hello world");
	let tx = Transaction::insert(doc.slice(..), &Selection::single(6, 11), "there".into());
	tx.apply(&mut doc);
	assert_eq!(doc.to_string(), "hello there");
}

#[test]
fn test_map_selection() {
	let doc = Rope::from("hello world");
	let tx = Transaction::change(doc.slice(..), [Change::insert(0, "!! ")]);
	let mapped = tx.map_selection(&Selection::single(6, 11));
	assert_eq!(mapped.primary(), Range::new(9, 14));
}

#[test]
fn test_map_caret_moves_past_insertion() {
	let doc = Rope::from("ab");
	let tx = Transaction::change(doc.slice(..), [Change::insert(1, "x")]);
	assert_eq!(tx.map_selection(&Selection::point(1)).primary(), Range::point(2));
}

#[test]
fn test_iter_changes_single_insert() {
	let doc = Rope::from("<div></div>");
	let cs = ChangeSet::from_changes(doc.slice(..), [Change::insert(5, "u")]);
	let edits: Vec<_> = cs.iter_changes().collect();
	assert_eq!(edits.len(), 1);
	let edit = edits[0];
	assert_eq!((edit.from_a, edit.to_a, edit.from_b, edit.to_b), (5, 5, 5, 6));
	assert_eq!(edit.text, "u");
	assert_eq!(edit.inserted_len(), 1);
	assert_eq!(edit.deleted_len(), 0);
}

#[test]
fn test_iter_changes_reports_shifted_positions() {
	let doc = Rope::from("0123456789");
	let cs = ChangeSet::from_changes(
		doc.slice(..),
		[Change::replace(1, 3, "abcd"), Change::delete(6, 8)],
	);
	let edits: Vec<_> = cs.iter_changes().collect();
	assert_eq!(edits.len(), 2);
	assert_eq!((edits[0].from_a, edits[0].to_a, edits[0].from_b, edits[0].to_b), (1, 3, 1, 5));
	assert_eq!(edits[0].text, "abcd");
	assert_eq!((edits[1].from_a, edits[1].to_a, edits[1].from_b, edits[1].to_b), (6, 8, 8, 8));
	assert_eq!(edits[1].text, "");
}

/// Generates a random ASCII document of variable length.
fn arb_document() -> impl Strategy<Value = String> {
	"[ -~\n]{0,120}"
}

/// Generates sorted, non-overlapping changes for a document of `doc_len` chars.
fn arb_changes(doc_len: usize) -> impl Strategy<Value = Vec<Change>> {
	prop::collection::vec((0..=doc_len, 0..=6usize, "[a-z]{0,4}"), 0..4).prop_map(move |mut items| {
		items.sort_by_key(|(pos, _, _)| *pos);
		let mut changes = Vec::new();
		let mut last_end = 0;

		for (pos, delete_len, text) in items {
			let start = pos.max(last_end);
			if start > doc_len {
				break;
			}
			let end = (start + delete_len).min(doc_len);
			changes.push(Change::replace(start, end, text));
			last_end = end;
		}
		changes
	})
}

proptest! {
	/// Replaying `iter_changes` on a copy of the old document yields the new one.
	#[test]
	fn prop_iter_changes_replays_apply(doc in arb_document()) {
		let original = Rope::from(doc.as_str());
		let changes = arb_changes(original.len_chars());

		proptest!(|(changes in changes)| {
			let cs = ChangeSet::from_changes(original.slice(..), changes);
			let mut applied = original.clone();
			cs.apply(&mut applied);

			let mut replayed = original.clone();
			for edit in cs.iter_changes() {
				replayed.remove(edit.from_b..edit.from_b + edit.deleted_len());
				replayed.insert(edit.from_b, edit.text);
			}

			prop_assert_eq!(replayed.to_string(), applied.to_string());
			prop_assert_eq!(applied.len_chars(), cs.len_after());
		});
	}

	/// Mapping the end of the document lands on the end of the new document.
	#[test]
	fn prop_map_end_of_document(doc in arb_document()) {
		let original = Rope::from(doc.as_str());
		let changes = arb_changes(original.len_chars());

		proptest!(|(changes in changes)| {
			let cs = ChangeSet::from_changes(original.slice(..), changes);
			prop_assert_eq!(cs.map_pos(original.len_chars(), Bias::Right), cs.len_after());
		});
	}
}
