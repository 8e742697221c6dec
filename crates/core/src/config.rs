//! Editor-facing configuration, loaded from TOML.
//!
//! ```toml
//! syntax = "html"
//! mark = true
//! preview-enabled = ["markup"]
//! attribute-quotes = "single"
//! comments = true
//! tab-size = 2
//!
//! [snippets.markup]
//! card = "div.card>h2+p"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use zen_abbrev::{AbbreviationType, AttributeQuotes, MarkupStyle, SnippetTables, Syntax};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or an option value.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A `mark` or `preview-enabled` list names neither a known syntax nor
	/// an abbreviation type.
	#[error("unknown syntax: {0}")]
	UnknownSyntax(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// An on/off switch that can also be limited to some syntaxes or
/// abbreviation types (`markup`, `stylesheet`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnableFor {
	All(bool),
	Only(Vec<String>),
}

impl Default for EnableFor {
	fn default() -> Self {
		EnableFor::All(true)
	}
}

impl EnableFor {
	/// Returns true if the switch is on for `syntax` or its abbreviation
	/// type.
	pub fn allows(&self, syntax: Syntax, kind: AbbreviationType) -> bool {
		match self {
			EnableFor::All(enabled) => *enabled,
			EnableFor::Only(names) => names
				.iter()
				.any(|name| name == syntax.as_ref() || name == kind.as_ref()),
		}
	}

	fn validate(&self) -> Result<()> {
		let EnableFor::Only(names) = self else {
			return Ok(());
		};
		for name in names {
			if name.parse::<Syntax>().is_err() && name.parse::<AbbreviationType>().is_err() {
				return Err(ConfigError::UnknownSyntax(name.clone()));
			}
		}
		Ok(())
	}
}

/// Default trailing comment for elements with an id or class.
pub const DEFAULT_COMMENTS_TEMPLATE: &str = "<!-- /[#ID][.CLASS] -->";

/// Abbreviation tracking and expansion options.
///
/// Read by every operation and never mutated by them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
	/// Syntax of the edited document.
	pub syntax: Syntax,
	/// Track abbreviations while typing.
	pub mark: EnableFor,
	/// Show a preview of the tracked abbreviation.
	pub preview_enabled: EnableFor,
	pub attribute_quotes: AttributeQuotes,
	/// Style of void elements and boolean attributes in `html`.
	pub markup_style: MarkupStyle,
	/// Comment elements with an id or class after their closing tag.
	pub comments: bool,
	/// Comment template: `[...]` sections are written only when every
	/// uppercase attribute name inside them exists on the element.
	pub comments_template: String,
	/// Expand `-element` and `_modifier` classes against the BEM block.
	pub bem: bool,
	/// Shorten stylesheet colours to three digits when possible.
	pub short_hex: bool,
	/// Ranking boost of the abbreviation completion.
	pub completion_boost: i32,
	pub tab_size: usize,
	pub indent_with_tabs: bool,
	/// User snippets, merged over the built-in ones.
	pub snippets: SnippetTables,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			syntax: Syntax::Html,
			mark: EnableFor::default(),
			preview_enabled: EnableFor::default(),
			attribute_quotes: AttributeQuotes::Double,
			markup_style: MarkupStyle::Html,
			comments: false,
			comments_template: DEFAULT_COMMENTS_TEMPLATE.to_string(),
			bem: false,
			short_hex: true,
			completion_boost: 99,
			tab_size: 4,
			indent_with_tabs: false,
			snippets: SnippetTables::default(),
		}
	}
}

impl Config {
	/// Parses configuration from a TOML string. Missing keys keep their
	/// defaults.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		let config: Config = toml::from_str(input)?;
		config.mark.validate()?;
		config.preview_enabled.validate()?;
		debug!(
			syntax = %config.syntax,
			markup_snippets = config.snippets.markup.len(),
			stylesheet_snippets = config.snippets.stylesheet.len(),
			"config.loaded"
		);
		Ok(config)
	}

	/// Loads configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&content)
	}

	/// One level of indentation for generated code.
	pub fn indent_unit(&self) -> String {
		if self.indent_with_tabs || self.tab_size == 0 {
			"\t".to_string()
		} else {
			" ".repeat(self.tab_size)
		}
	}

	/// Returns true if abbreviations are tracked while typing in the
	/// document syntax.
	pub fn tracking_enabled(&self) -> bool {
		self.mark.allows(self.syntax, self.syntax.abbreviation_type())
	}
}
