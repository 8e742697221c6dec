//! Abbreviation grammar and expander.
//!
//! Parses markup (`ul>li.item$*3`) and stylesheet (`p10-20`, `bgc#fc0`)
//! abbreviations and renders them into snippet text with tab stops.

mod config;
mod engine;
mod error;
mod extract;
mod markup;
mod output;
mod snippets;
mod stylesheet;
mod syntax;

pub use config::{
	AbbreviationConfig, AbbreviationContext, AttributeQuotes, FieldStyle, MarkupStyle, OutputOptions, SCOPE_GLOBAL,
	SCOPE_PROPERTY, SCOPE_SECTION, SnippetTables,
};
pub use engine::{Abbreviation, Engine, Expander};
pub use error::AbbreviationError;
pub use extract::{Extracted, extract};
pub use markup::{AbbrAttribute, AbbrNode, MarkupAbbreviation, Repeat};
pub use output::{FIELD_END, FIELD_START};
pub use stylesheet::{CssProperty, CssValue, StylesheetAbbreviation};
pub use syntax::{AbbreviationType, Syntax};
