//! What the UI shows for a tracker: the underline, the preview popup and
//! the completion entry.

use serde::Serialize;
use zen_abbrev::{AbbreviationError, AbbreviationType, Syntax};
use zen_primitives::{CharIdx, Range};

use crate::config::Config;
use crate::tracker::Tracker;

/// Label of the abbreviation completion.
pub const COMPLETION_LABEL: &str = "Emmet abbreviation";

/// Range to underline, if any.
pub fn decoration(tracker: Option<&Tracker>) -> Option<Range> {
	tracker
		.filter(|tracker| tracker.is_active())
		.map(Tracker::range)
		.filter(|range| !range.is_empty())
}

/// Returns true if the preview of `tracker` may be shown with the caret at
/// `caret`.
///
/// A preview is hidden while a completion popup is open, for syntaxes the
/// configuration excludes and for plain element names the user has not
/// explicitly asked to track.
pub fn can_display_preview(tracker: &Tracker, config: &Config, caret: CharIdx, completion_active: bool) -> bool {
	if completion_active {
		return false;
	}
	let abbr_config = tracker.config();
	if !config.preview_enabled.allows(abbr_config.syntax, abbr_config.kind) {
		return false;
	}
	match tracker {
		Tracker::Error { .. } => true,
		Tracker::Abbreviation { base, simple, .. } => {
			(!simple || base.forced) && !base.abbreviation.is_empty() && base.range.contains_pos(caret)
		}
	}
}

/// Content of the preview popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Preview {
	/// Expanded code, highlighted as `syntax`.
	Expanded { syntax: Syntax, text: String },
	/// A parse error pointing into the abbreviation.
	Error { message: String, pos: usize },
}

/// Returns the preview of `tracker`. Stylesheet abbreviations have none.
pub fn preview(tracker: &Tracker) -> Option<Preview> {
	match tracker {
		Tracker::Abbreviation { base, preview, .. } => {
			if base.config.kind == AbbreviationType::Stylesheet {
				return None;
			}
			Some(Preview::Expanded {
				syntax: base.config.syntax,
				text: preview.clone(),
			})
		}
		Tracker::Error { error, .. } => Some(Preview::Error {
			message: error.reason().to_string(),
			pos: error.pos,
		}),
	}
}

/// Renders `error` as a caret line pointing at the offending character
/// followed by the message.
///
/// ```text
///    ^
/// Unexpected end of input
/// ```
pub fn error_snippet(error: &AbbreviationError) -> String {
	format!("{}^\n{}", " ".repeat(error.pos), error.reason())
}

/// A completion offered for the tracked abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
	pub label: &'static str,
	/// Text replaced when the completion is applied.
	pub range: Range,
	pub boost: i32,
	pub preview: String,
	pub syntax: Syntax,
}

/// Completions for the tracked abbreviation: one entry for an active,
/// valid abbreviation that is not a plain element name unless forced.
pub fn completions(tracker: Option<&Tracker>, config: &Config) -> Vec<Completion> {
	let Some(Tracker::Abbreviation { base, simple, preview }) = tracker else {
		return Vec::new();
	};
	if base.inactive || (*simple && !base.forced) || preview.is_empty() {
		return Vec::new();
	}
	vec![Completion {
		label: COMPLETION_LABEL,
		range: base.range,
		boost: config.completion_boost,
		preview: preview.clone(),
		syntax: base.config.syntax,
	}]
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use zen_primitives::Selection;

	use super::*;
	use crate::config::EnableFor;
	use crate::testing::{Doc, Session};
	use crate::tracker::TrackerEvent;

	fn typed(fixture: &str, text: &str) -> Session {
		let mut session = Session::new(Doc::markup(fixture));
		session.type_text(text);
		session
	}

	#[test]
	fn test_decoration() {
		let session = typed("<p>|</p>", "ul>li");
		assert_eq!(decoration(session.tracker.as_ref()), Some(Range::new(3, 8)));

		let session = typed("<p>|</p>", "ul;");
		assert_eq!(decoration(session.tracker.as_ref()), None);
		assert_eq!(decoration(None), None);
	}

	#[test]
	fn test_preview_hidden_for_simple_abbreviations() {
		let session = typed("<p>|</p>", "div");
		let config = Config::default();
		assert!(!can_display_preview(session.tracker(), &config, 6, false));

		let session = typed("<p>|</p>", "div>p");
		assert!(can_display_preview(session.tracker(), &config, 8, false));
		assert!(!can_display_preview(session.tracker(), &config, 8, true));
		assert!(!can_display_preview(session.tracker(), &config, 1, false));
	}

	#[test]
	fn test_preview_respects_configuration() {
		let session = typed("<p>|</p>", "div>p");
		let config = Config {
			preview_enabled: EnableFor::Only(vec!["stylesheet".to_string()]),
			..Config::default()
		};
		assert!(!can_display_preview(session.tracker(), &config, 8, false));

		let config = Config {
			preview_enabled: EnableFor::Only(vec!["html".to_string()]),
			..Config::default()
		};
		assert!(can_display_preview(session.tracker(), &config, 8, false));
	}

	#[test]
	fn test_forced_error_preview() {
		let mut session = Session::new(Doc::markup("<p>|</p>"));
		let selection = session.doc.selection();
		session.send(TrackerEvent::Force { selection: &selection });
		session.type_text("a[");

		let tracker = session.tracker();
		assert!(can_display_preview(tracker, &Config::default(), 5, false));
		assert_eq!(
			preview(tracker),
			Some(Preview::Error {
				message: "Unclosed attribute set".to_string(),
				pos: 1,
			})
		);
		assert_eq!(error_snippet(tracker.error().unwrap()), " ^\nUnclosed attribute set");
	}

	#[test]
	fn test_preview_content() {
		let session = typed("<p>|</p>", "b>i");
		assert_eq!(
			preview(session.tracker()),
			Some(Preview::Expanded {
				syntax: Syntax::Html,
				text: "<b><i></i></b>".to_string(),
			})
		);

		let mut session = Session::new(Doc::stylesheet("a{ |}"));
		session.type_text("p10");
		assert_eq!(preview(session.tracker()), None);
	}

	#[test]
	fn test_completions() {
		let config = Config {
			completion_boost: 5,
			..Config::default()
		};
		let session = typed("<p>|</p>", "ul>li");
		let items = completions(session.tracker.as_ref(), &config);
		assert_eq!(
			items,
			vec![Completion {
				label: COMPLETION_LABEL,
				range: Range::new(3, 8),
				boost: 5,
				preview: "<ul>\n  <li></li>\n</ul>".to_string(),
				syntax: Syntax::Html,
			}]
		);

		let session = typed("<p>|</p>", "span");
		assert!(completions(session.tracker.as_ref(), &config).is_empty());

		let mut session = Session::new(Doc::markup("<p>span|</p>"));
		let selection = Selection::single(3, 7);
		session.send(TrackerEvent::Force { selection: &selection });
		assert_eq!(completions(session.tracker.as_ref(), &config).len(), 1);
	}
}
