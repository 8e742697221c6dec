use pretty_assertions::assert_eq;
use zen_abbrev::Engine;
use zen_core::commands::{go_to_tag_pair, inc_dec_number, remove_tag, split_join_tag, tag_context};
use zen_core::expand_abbreviation;
use zen_primitives::{Range, Selection};

use crate::testing::Doc;

#[test]
fn expand_then_edit_tags() {
	let mut doc = Doc::markup("<body>ul>li.item|</body>");
	let commit = expand_abbreviation(&doc.snapshot(), &doc.selection(), &Engine::default()).unwrap();
	let tx = commit.to_transaction(doc.text.slice(..));
	doc.apply(&tx);
	assert_eq!(
		doc.contents(),
		"<body><ul>\n    <li class=\"item\"></li>\n</ul></body>"
	);

	let tag = tag_context(&doc.snapshot(), doc.caret).unwrap();
	assert_eq!(tag.name, "li");

	let tx = go_to_tag_pair(&doc.snapshot(), &Selection::point(tag.open.from + 1)).unwrap();
	doc.apply(&tx);
	assert_eq!(doc.caret, tag.close.unwrap().from);

	let tx = split_join_tag(&doc.snapshot(), &doc.selection()).unwrap();
	doc.apply(&tx);
	assert_eq!(doc.contents(), "<body><ul>\n    <li class=\"item\" />\n</ul></body>");

	doc.caret = 12;
	let tx = remove_tag(&doc.snapshot(), &doc.selection()).unwrap();
	doc.apply(&tx);
	assert_eq!(doc.contents(), "<body><li class=\"item\" /></body>");
}

#[test]
fn step_numbers_in_stylesheet() {
	let mut doc = Doc::stylesheet("a { margin: 0.5|em; }");
	let tx = inc_dec_number(&doc.snapshot(), &doc.selection(), 0.1).unwrap();
	doc.apply(&tx);
	assert_eq!(doc.contents(), "a { margin: 0.6em; }");
	assert_eq!(tx.selection().map(|s| s.primary()), Some(Range::new(12, 15)));

	let tx = inc_dec_number(&doc.snapshot(), &doc.selection(), -1.0).unwrap();
	doc.apply(&tx);
	assert_eq!(doc.contents(), "a { margin: -0.4em; }");
}
