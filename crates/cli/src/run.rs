//! Subcommand implementations over an in-memory document.

use std::path::Path;

use anyhow::{Result, bail};
use serde::Serialize;
use zen_abbrev::{AbbreviationConfig, Engine, Syntax};
use zen_core::commands::{ContextTag, tag_context};
use zen_core::preview::{self, Completion, Preview};
use zen_core::{
	Commit, Config, Context, Snapshot, Tracker, TrackerEvent, activation_context, expand_abbreviation, handle_tab,
	resolve_context, update,
};
use zen_primitives::{Range, Rope, Selection, Transaction};
use zen_syntax::Tree;

/// Guesses the document syntax from a file extension.
pub fn detect_syntax(path: &Path) -> Option<Syntax> {
	let ext = path.extension()?.to_str()?.to_ascii_lowercase();
	match ext.as_str() {
		"htm" | "xhtml" => Some(Syntax::Html),
		"styl" => Some(Syntax::Stylus),
		"pcss" => Some(Syntax::Postcss),
		other => other.parse().ok(),
	}
}

/// Builds the tree the resolver expects for `syntax`: stylesheet syntaxes get
/// a stylesheet tree, tag-based markup a markup tree and everything else a
/// tree without grammar.
pub fn build_tree(syntax: Syntax, text: &str) -> Result<Tree> {
	let tree = if syntax.is_stylesheet() {
		Tree::stylesheet(text)?
	} else if syntax.is_html() && !syntax.is_jsx() {
		Tree::markup(text)?
	} else {
		Tree::plain(text)
	};
	Ok(tree)
}

/// A document with its tree, reparsed after every edit.
pub struct Document {
	pub text: Rope,
	pub tree: Tree,
	pub config: Config,
}

impl Document {
	pub fn new(text: &str, config: Config) -> Result<Self> {
		Ok(Self {
			tree: build_tree(config.syntax, text)?,
			text: Rope::from(text),
			config,
		})
	}

	pub fn snapshot(&self) -> Snapshot<'_, Tree> {
		Snapshot::new(self.text.slice(..), &self.tree, &self.config)
	}

	pub fn apply(&mut self, tx: &Transaction) -> Result<()> {
		tx.apply(&mut self.text);
		self.tree = build_tree(self.config.syntax, &self.text.to_string())?;
		Ok(())
	}

	fn check_pos(&self, pos: usize) -> Result<()> {
		let len = self.text.len_chars();
		if pos > len {
			bail!("position {pos} is past the end of the document ({len} characters)");
		}
		Ok(())
	}
}

/// Output of `zen context`.
#[derive(Debug, Serialize)]
pub struct ContextReport {
	pub pos: usize,
	pub context: Option<Context>,
	/// Expansion settings, when an abbreviation may start here.
	pub activation: Option<AbbreviationConfig>,
	pub tag: Option<ContextTag>,
}

pub fn context(doc: &Document, pos: usize) -> Result<ContextReport> {
	doc.check_pos(pos)?;
	let snapshot = doc.snapshot();
	Ok(ContextReport {
		pos,
		context: resolve_context(&snapshot, pos),
		activation: activation_context(&snapshot, pos),
		tag: tag_context(&snapshot, pos),
	})
}

pub fn expand(doc: &Document, pos: usize, engine: &Engine) -> Result<Commit> {
	doc.check_pos(pos)?;
	match expand_abbreviation(&doc.snapshot(), &Selection::point(pos), engine) {
		Some(commit) => Ok(commit),
		None => bail!("no abbreviation to expand at {pos}"),
	}
}

/// Tracker state after one keystroke of `zen type`.
#[derive(Debug, Serialize)]
pub struct Keystroke {
	pub typed: char,
	pub caret: usize,
	pub tracker: Option<Tracker>,
	/// Range the editor would underline.
	pub decoration: Option<Range>,
	pub preview: Option<Preview>,
	pub completions: Vec<Completion>,
}

/// Replays `text` at `pos` one character per edit and records the tracker
/// after each one.
pub fn type_text(doc: &mut Document, pos: usize, text: &str, engine: &Engine) -> Result<Vec<Keystroke>> {
	doc.check_pos(pos)?;
	let mut tracker = None;
	let mut caret = pos;
	let mut keystrokes = Vec::with_capacity(text.chars().count());

	for ch in text.chars() {
		let tx = Transaction::insert(doc.text.slice(..), &Selection::point(caret), ch.to_string());
		doc.apply(&tx)?;
		caret += 1;

		let selection = Selection::point(caret);
		let event = TrackerEvent::Changes {
			changes: tx.changes(),
			selection: &selection,
			expansion_active: false,
		};
		tracker = update(tracker, event, &doc.snapshot(), engine);

		let shown = tracker
			.as_ref()
			.filter(|tracker| preview::can_display_preview(tracker, &doc.config, caret, false))
			.and_then(preview::preview);
		keystrokes.push(Keystroke {
			typed: ch,
			caret,
			tracker: tracker.clone(),
			decoration: preview::decoration(tracker.as_ref()),
			preview: shown,
			completions: preview::completions(tracker.as_ref(), &doc.config),
		});
	}
	Ok(keystrokes)
}

/// Presses Tab with the caret at the end of the last keystroke and applies
/// the resulting commit.
pub fn commit(doc: &mut Document, keystrokes: &[Keystroke], engine: &Engine) -> Result<Commit> {
	let Some(last) = keystrokes.last() else {
		bail!("nothing was typed");
	};
	let Some(commit) = handle_tab(last.tracker.as_ref(), last.caret, false, engine) else {
		bail!("no active abbreviation at {}", last.caret);
	};
	let tx = commit.to_transaction(doc.text.slice(..));
	doc.apply(&tx)?;
	Ok(commit)
}
