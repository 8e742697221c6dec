use serde::Serialize;
use thiserror::Error;

/// A malformed abbreviation.
///
/// `message` reads like `Unexpected character at 3`; `pos` is the offending
/// character offset inside the abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct AbbreviationError {
	pub message: String,
	pub pos: usize,
}

impl AbbreviationError {
	pub(crate) fn new(reason: impl std::fmt::Display, pos: usize) -> Self {
		Self {
			message: format!("{reason} at {pos}"),
			pos,
		}
	}

	/// First line of the message without its trailing ` at N` location.
	pub fn reason(&self) -> &str {
		let first = self.message.lines().next().unwrap_or_default();
		match first.rsplit_once(" at ") {
			Some((reason, pos)) if !pos.is_empty() && pos.chars().all(|c| c.is_ascii_digit()) => reason.trim_end(),
			_ => first,
		}
	}
}
