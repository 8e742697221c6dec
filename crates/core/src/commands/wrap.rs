use tracing::{debug, trace};
use zen_abbrev::{AbbreviationConfig, AbbreviationType, Expander};
use zen_primitives::{CharIdx, Range, Selection};
use zen_syntax::SyntaxTree;

use super::tag::{ContextTag, tag_context};
use crate::activation::{markup_context, output_options};
use crate::commit::Commit;
use crate::context::html_context;
use crate::snapshot::Snapshot;

/// Returns the range wrapped from `range`.
///
/// A non-empty range is wrapped as is. A caret inside a tag of an element
/// wraps the whole element, a caret in its content wraps the content
/// without surrounding whitespace.
pub fn wrap_range<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, range: Range) -> Range {
	if !range.is_empty() {
		return range;
	}
	let Some(ContextTag { open, close, .. }) = tag_context(snapshot, range.from) else {
		return range;
	};

	let pos = range.from;
	let inside = |tag: Range| tag.from < pos && pos < tag.to;
	if inside(open) || close.is_some_and(inside) {
		return Range::new(open.from, close.map_or(open.to, |close| close.to));
	}
	match close {
		Some(close) => Range::new(open.to, close.from).narrow_to_non_space(snapshot.text),
		None => range,
	}
}

/// Expands markup `abbreviation` around the text of the primary range.
///
/// The wrapped lines lose the indentation of the line the range starts on;
/// the expansion indents them again.
pub fn wrap_with_abbreviation<T, E>(
	snapshot: &Snapshot<'_, T>,
	selection: &Selection,
	abbreviation: &str,
	expander: &E,
) -> Option<Commit>
where
	T: SyntaxTree,
	E: Expander + ?Sized,
{
	let syntax = snapshot.config.syntax;
	if syntax.abbreviation_type() != AbbreviationType::Markup {
		return None;
	}

	let range = wrap_range(snapshot, selection.primary());
	let config = AbbreviationConfig {
		syntax,
		kind: AbbreviationType::Markup,
		context: markup_context(snapshot, &html_context(snapshot, range.from)),
		options: output_options(snapshot, range.from, false),
		text: Some(wrapped_lines(snapshot, range.from, &snapshot.slice(range))),
	};
	let snippet = expander
		.expand(abbreviation, &config)
		.inspect_err(|error| trace!(abbreviation, %error, "commit.wrap_failed"))
		.ok()?;
	debug!(abbreviation, from = range.from, to = range.to, "commit.wrap");
	Some(Commit::from_snippet(range, &snippet))
}

fn wrapped_lines<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, from: CharIdx, text: &str) -> Vec<String> {
	let line = snapshot.line_at(from);
	let indent = line.indent();
	text.split('\n')
		.map(|line| line.strip_prefix(indent).unwrap_or(line).to_string())
		.collect()
}
