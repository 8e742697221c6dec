//! Known abbreviation syntaxes.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Grammar family of an abbreviation.
#[derive(Debug, Default, Display, EnumString, AsRefStr, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AbbreviationType {
	#[default]
	Markup,
	Stylesheet,
}

/// A syntax the expander knows how to produce output for.
#[derive(Debug, Default, Display, EnumString, AsRefStr, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
	#[default]
	Html,
	Vue,
	Xml,
	Xsl,
	Jsx,
	Tsx,
	Haml,
	Jade,
	Pug,
	Slim,
	Css,
	Scss,
	Less,
	Sass,
	Sss,
	Stylus,
	Postcss,
}

impl Syntax {
	/// XML dialects, including JSX.
	pub fn is_xml(self) -> bool {
		matches!(self, Syntax::Xml | Syntax::Xsl | Syntax::Jsx | Syntax::Tsx)
	}

	/// HTML dialects, including every XML dialect.
	pub fn is_html(self) -> bool {
		matches!(self, Syntax::Html | Syntax::Vue) || self.is_xml()
	}

	pub fn is_jsx(self) -> bool {
		matches!(self, Syntax::Jsx | Syntax::Tsx)
	}

	/// CSS dialects. Not every stylesheet syntax is one: SASS is indented
	/// and has no braces.
	pub fn is_css(self) -> bool {
		matches!(self, Syntax::Css | Syntax::Scss | Syntax::Less)
	}

	pub fn is_stylesheet(self) -> bool {
		matches!(
			self,
			Syntax::Css | Syntax::Scss | Syntax::Less | Syntax::Sass | Syntax::Sss | Syntax::Stylus | Syntax::Postcss
		)
	}

	pub fn abbreviation_type(self) -> AbbreviationType {
		if self.is_stylesheet() {
			AbbreviationType::Stylesheet
		} else {
			AbbreviationType::Markup
		}
	}

	/// Separator between a property name and its value, and the declaration
	/// terminator.
	pub(crate) fn declaration_punctuation(self) -> (&'static str, &'static str) {
		match self {
			Syntax::Sass => (": ", ""),
			Syntax::Stylus => (" ", ""),
			_ => (": ", ";"),
		}
	}
}
