use std::cell::OnceCell;

use tracing::debug;

use crate::config::{AbbreviationConfig, SnippetTables};
use crate::error::AbbreviationError;
use crate::markup::{self, MarkupAbbreviation};
use crate::snippets::Registry;
use crate::stylesheet::{self, StylesheetAbbreviation};
use crate::syntax::AbbreviationType;

/// A parsed abbreviation of either grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Abbreviation {
	Markup(MarkupAbbreviation),
	Stylesheet(StylesheetAbbreviation),
}

/// Parses and renders abbreviations.
///
/// Both steps fail with an [`AbbreviationError`] carrying the offending
/// offset; callers decide whether to surface or swallow it.
pub trait Expander {
	fn parse(&self, abbreviation: &str, config: &AbbreviationConfig) -> Result<Abbreviation, AbbreviationError>;

	fn expand_parsed(&self, abbreviation: &Abbreviation, config: &AbbreviationConfig) -> Result<String, AbbreviationError>;

	fn expand(&self, abbreviation: &str, config: &AbbreviationConfig) -> Result<String, AbbreviationError> {
		let parsed = self.parse(abbreviation, config)?;
		self.expand_parsed(&parsed, config)
	}
}

/// The built-in expander.
///
/// Snippet tables are resolved into a registry on first use; [`configure`]
/// drops it so the next expansion sees the new tables.
///
/// [`configure`]: Engine::configure
#[derive(Debug, Default)]
pub struct Engine {
	snippets: SnippetTables,
	registry: OnceCell<Registry>,
}

impl Engine {
	pub fn new(snippets: SnippetTables) -> Self {
		Self {
			snippets,
			registry: OnceCell::new(),
		}
	}

	/// Replaces the user snippet tables and invalidates the registry.
	pub fn configure(&mut self, snippets: SnippetTables) {
		debug!(
			markup = snippets.markup.len(),
			stylesheet = snippets.stylesheet.len(),
			"reconfiguring abbreviation engine"
		);
		self.snippets = snippets;
		self.registry = OnceCell::new();
	}

	pub fn snippets(&self) -> &SnippetTables {
		&self.snippets
	}

	/// Whether the snippet registry has been built since the last
	/// [`configure`](Engine::configure).
	pub fn is_warm(&self) -> bool {
		self.registry.get().is_some()
	}

	fn registry(&self) -> &Registry {
		self.registry.get_or_init(|| {
			debug!("building snippet registry");
			Registry::build(&self.snippets)
		})
	}
}

impl Expander for Engine {
	fn parse(&self, abbreviation: &str, config: &AbbreviationConfig) -> Result<Abbreviation, AbbreviationError> {
		match config.kind {
			AbbreviationType::Markup => {
				let jsx = config.syntax.is_jsx();
				match config.text.as_deref() {
					Some(lines) => markup::wrap(abbreviation, jsx, lines),
					None => markup::parse(abbreviation, jsx),
				}
				.map(Abbreviation::Markup)
			}
			AbbreviationType::Stylesheet => stylesheet::parse(abbreviation).map(Abbreviation::Stylesheet),
		}
	}

	fn expand_parsed(&self, abbreviation: &Abbreviation, config: &AbbreviationConfig) -> Result<String, AbbreviationError> {
		let registry = self.registry();
		Ok(match abbreviation {
			Abbreviation::Markup(parsed) => markup::render(parsed, config, registry),
			Abbreviation::Stylesheet(parsed) => stylesheet::render(parsed, config, registry),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::syntax::Syntax;

	#[test]
	fn test_expand_by_type() {
		let engine = Engine::default();
		let html = AbbreviationConfig::new(Syntax::Html).for_preview();
		let css = AbbreviationConfig::new(Syntax::Css).for_preview();
		assert_eq!(engine.expand("p", &html).unwrap(), "<p></p>");
		assert_eq!(engine.expand("p10", &css).unwrap(), "padding: 10px;");
	}

	#[test]
	fn test_expand_with_text() {
		let engine = Engine::default();
		let config = AbbreviationConfig {
			text: Some(vec!["one".to_string(), "two".to_string()]),
			..AbbreviationConfig::new(Syntax::Html).for_preview()
		};
		assert_eq!(engine.expand("ol>li*", &config).unwrap(), "<ol>\n  <li>one</li>\n  <li>two</li>\n</ol>");
		assert_eq!(engine.expand("p", &config).unwrap(), "<p>\n  one\n  two\n</p>");
	}

	#[test]
	fn test_parse_error_has_offset() {
		let engine = Engine::default();
		let err = engine.parse("ul>>", &AbbreviationConfig::new(Syntax::Html)).unwrap_err();
		assert_eq!(err.pos, 3);
		assert_eq!(err.reason(), "Unexpected character");
	}

	#[test]
	fn test_configure_resets_registry() {
		let mut engine = Engine::default();
		let config = AbbreviationConfig::new(Syntax::Html).for_preview();
		assert!(!engine.is_warm());
		assert_eq!(engine.expand("card", &config).unwrap(), "<card></card>");
		assert!(engine.is_warm());

		let mut snippets = SnippetTables::default();
		snippets.markup.insert("card".to_string(), "div.card".to_string());
		engine.configure(snippets);
		assert!(!engine.is_warm());
		assert_eq!(engine.expand("card", &config).unwrap(), "<div class=\"card\"></div>");
	}
}
