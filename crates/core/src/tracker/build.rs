use tracing::trace;
use zen_abbrev::{Abbreviation, AbbreviationConfig, AbbreviationError, Expander};
use zen_primitives::{CharLen, Range};
use zen_syntax::SyntaxTree;

use super::{Tracker, TrackerBase};
use crate::snapshot::Snapshot;

/// Settings a tracker keeps across reconstructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerOptions {
	pub config: AbbreviationConfig,
	pub forced: bool,
	pub offset: CharLen,
}

impl From<&TrackerBase> for TrackerOptions {
	fn from(base: &TrackerBase) -> Self {
		Self {
			config: base.config.clone(),
			forced: base.forced,
			offset: base.offset,
		}
	}
}

/// Builds a tracker for the text at `range`.
///
/// Returns `None` when the text is not worth tracking: empty or multi-line
/// text, an abbreviation that expands to nothing, or one the grammar
/// rejects. Forced trackers turn grammar errors into [`Tracker::Error`]
/// instead.
pub fn build_tracker<T, E>(
	snapshot: &Snapshot<'_, T>,
	range: Range,
	options: &TrackerOptions,
	expander: &E,
) -> Option<Tracker>
where
	T: SyntaxTree,
	E: Expander + ?Sized,
{
	if !range.is_valid() {
		return None;
	}

	let abbreviation: String = snapshot.slice(range).chars().skip(options.offset).collect();
	if (abbreviation.is_empty() && !options.forced) || abbreviation.contains(['\r', '\n']) {
		return None;
	}

	let base = TrackerBase {
		range,
		abbreviation,
		offset: options.offset,
		forced: options.forced,
		inactive: false,
		config: options.config.clone(),
	};

	match parse_and_preview(&base.abbreviation, &base.config, expander) {
		Ok((_, preview)) if preview.is_empty() => {
			trace!(abbreviation = %base.abbreviation, "tracker.empty_expansion");
			None
		}
		Ok((simple, preview)) => Some(Tracker::Abbreviation { base, simple, preview }),
		Err(error) if options.forced => Some(Tracker::Error { base, error }),
		Err(error) => {
			trace!(abbreviation = %base.abbreviation, %error, "tracker.rejected");
			None
		}
	}
}

fn parse_and_preview<E: Expander + ?Sized>(
	abbreviation: &str,
	config: &AbbreviationConfig,
	expander: &E,
) -> Result<(bool, String), AbbreviationError> {
	let parsed = expander.parse(abbreviation, config)?;
	let preview = expander.expand_parsed(&parsed, &config.for_preview())?;
	Ok((is_simple(&parsed), preview))
}

/// A lone element or text node without children, named with a letter.
fn is_simple(parsed: &Abbreviation) -> bool {
	let Abbreviation::Markup(markup) = parsed else {
		return false;
	};
	match markup.children.as_slice() {
		[] => true,
		[node] => {
			node.children.is_empty()
				&& node
					.name
					.as_deref()
					.is_none_or(|name| name.starts_with(|ch: char| ch.is_ascii_alphabetic()))
		}
		_ => false,
	}
}
