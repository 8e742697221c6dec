//! Document fixtures shared by the unit tests and the integration tests.
//!
//! Everything is imported through the parent module so the integration
//! tests can mount this file next to their own re-exports of the crate API.

use zen_abbrev::Engine;
use zen_primitives::{Change, Rope, Selection, Transaction};
use zen_syntax::Tree;

use super::{Config, Snapshot, Tracker, TrackerEvent, update};

/// Grammar used to build the tree of a [`Doc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Grammar {
	Markup,
	Stylesheet,
	Plain,
}

/// A document revision with its tree. `|` in fixture text marks the caret.
pub(crate) struct Doc {
	pub text: Rope,
	pub tree: Tree,
	pub config: Config,
	pub grammar: Grammar,
	pub caret: usize,
}

impl Doc {
	pub fn new(grammar: Grammar, fixture: &str, config: Config) -> Self {
		let caret = fixture.chars().position(|ch| ch == '|').unwrap_or(fixture.chars().count());
		let text: String = fixture.chars().filter(|&ch| ch != '|').collect();
		Self {
			tree: build(grammar, &text),
			text: Rope::from(text.as_str()),
			config,
			grammar,
			caret,
		}
	}

	pub fn markup(fixture: &str) -> Self {
		Self::new(Grammar::Markup, fixture, Config::default())
	}

	pub fn stylesheet(fixture: &str) -> Self {
		let config = Config {
			syntax: zen_abbrev::Syntax::Css,
			..Config::default()
		};
		Self::new(Grammar::Stylesheet, fixture, config)
	}

	pub fn snapshot(&self) -> Snapshot<'_, Tree> {
		Snapshot::new(self.text.slice(..), &self.tree, &self.config)
	}

	/// Applies `tx` and reparses.
	pub fn apply(&mut self, tx: &Transaction) {
		tx.apply(&mut self.text);
		self.tree = build(self.grammar, &self.text.to_string());
		if let Some(selection) = tx.selection() {
			self.caret = selection.caret();
		}
	}

	pub fn selection(&self) -> Selection {
		Selection::point(self.caret)
	}

	pub fn contents(&self) -> String {
		self.text.to_string()
	}
}

/// A document with its tracker threaded through every edit, the way an
/// editor host drives it.
pub(crate) struct Session {
	pub doc: Doc,
	pub tracker: Option<Tracker>,
	pub engine: Engine,
}

impl Session {
	pub fn new(doc: Doc) -> Self {
		Self {
			doc,
			tracker: None,
			engine: Engine::default(),
		}
	}

	/// Applies `changes` as one batch and leaves the caret at `caret`.
	pub fn edit(&mut self, changes: Vec<Change>, caret: usize) {
		let tx = Transaction::change(self.doc.text.slice(..), changes).with_selection(Selection::point(caret));
		self.doc.apply(&tx);
		let selection = self.doc.selection();
		self.send(TrackerEvent::Changes {
			changes: tx.changes(),
			selection: &selection,
			expansion_active: false,
		});
	}

	/// Types `text` at the caret, one character per batch.
	pub fn type_text(&mut self, text: &str) {
		for ch in text.chars() {
			let caret = self.doc.caret;
			self.edit(vec![Change::insert(caret, ch.to_string())], caret + 1);
		}
	}

	/// Deletes the character before the caret. Does nothing at the start of
	/// the document.
	pub fn backspace(&mut self) {
		let caret = self.doc.caret;
		if let Some(prev) = caret.checked_sub(1) {
			self.edit(vec![Change::delete(prev, caret)], prev);
		}
	}

	pub fn force(&mut self, selection: &Selection) {
		self.send(TrackerEvent::Force { selection });
	}

	pub fn send(&mut self, event: TrackerEvent<'_>) {
		self.tracker = update(self.tracker.take(), event, &self.doc.snapshot(), &self.engine);
	}

	pub fn tracker(&self) -> &Tracker {
		self.tracker.as_ref().expect("no tracker")
	}
}

fn build(grammar: Grammar, text: &str) -> Tree {
	match grammar {
		Grammar::Markup => Tree::markup(text).expect("markup grammar loads"),
		Grammar::Stylesheet => Tree::stylesheet(text).expect("stylesheet grammar loads"),
		Grammar::Plain => Tree::plain(text),
	}
}
