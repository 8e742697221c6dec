//! Expansion settings resolved for a single abbreviation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::syntax::{AbbreviationType, Syntax};

/// Quote character used around generated attribute values.
#[derive(Debug, Default, Display, EnumString, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AttributeQuotes {
	#[default]
	Double,
	Single,
}

impl AttributeQuotes {
	pub fn char(self) -> char {
		match self {
			AttributeQuotes::Double => '"',
			AttributeQuotes::Single => '\'',
		}
	}
}

/// Style of void elements and boolean attributes.
#[derive(Debug, Default, Display, EnumString, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MarkupStyle {
	/// `<br>`
	#[default]
	Html,
	/// `<br />`
	Xhtml,
	/// `<br/>`
	Xml,
}

/// How tab stops are written into expanded output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStyle {
	/// Editable snippet: the first tab stop is wrapped in
	/// [`FIELD_START`](crate::FIELD_START)/[`FIELD_END`](crate::FIELD_END)
	/// markers, later ones become their placeholder text.
	#[default]
	Snippet,
	/// Plain text: every tab stop becomes its placeholder text.
	Placeholder,
}

/// Output formatting options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputOptions {
	/// Indentation prepended to every generated line but the first.
	pub base_indent: String,
	/// One level of indentation.
	pub indent: String,
	pub field: FieldStyle,
	/// Break block elements onto separate lines.
	pub format: bool,
	pub attribute_quotes: AttributeQuotes,
	pub self_closing_style: MarkupStyle,
	/// Write boolean attributes without a value.
	pub compact_boolean: bool,
	/// Comment template written after elements with an id or class.
	pub comment: Option<String>,
	pub bem: bool,
	/// Shorten `#aabbcc` colours to `#abc`.
	pub short_hex: bool,
}

impl Default for OutputOptions {
	fn default() -> Self {
		Self {
			base_indent: String::new(),
			indent: "\t".to_string(),
			field: FieldStyle::Snippet,
			format: true,
			attribute_quotes: AttributeQuotes::Double,
			self_closing_style: MarkupStyle::Html,
			compact_boolean: false,
			comment: None,
			bem: false,
			short_hex: true,
		}
	}
}

/// Host element (markup) or scope token (stylesheet) the abbreviation is
/// expanded inside.
///
/// Stylesheet scopes are `@@global`, `@@section`, `@@property`, or the name
/// of the property whose value is being typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AbbreviationContext {
	pub name: String,
	pub attributes: IndexMap<String, Option<String>>,
}

impl AbbreviationContext {
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			attributes: IndexMap::new(),
		}
	}
}

/// Stylesheet scope: every snippet and property.
pub const SCOPE_GLOBAL: &str = "@@global";
/// Stylesheet scope: raw snippets only, such as at-rules.
pub const SCOPE_SECTION: &str = "@@section";
/// Stylesheet scope: properties only.
pub const SCOPE_PROPERTY: &str = "@@property";

/// Everything the expander needs to parse and render one abbreviation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AbbreviationConfig {
	pub syntax: Syntax,
	#[serde(rename = "type")]
	pub kind: AbbreviationType,
	pub context: Option<AbbreviationContext>,
	pub options: OutputOptions,
	/// Document lines the markup abbreviation wraps.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub text: Option<Vec<String>>,
}

impl AbbreviationConfig {
	/// Creates a config for `syntax` with its natural abbreviation type.
	pub fn new(syntax: Syntax) -> Self {
		Self {
			syntax,
			kind: syntax.abbreviation_type(),
			context: None,
			options: OutputOptions::default(),
			text: None,
		}
	}

	/// Returns a copy that renders tab stops as plain placeholders with a
	/// fixed two-space indent and no base indent.
	pub fn for_preview(&self) -> Self {
		let mut config = self.clone();
		config.options.field = FieldStyle::Placeholder;
		config.options.indent = "  ".to_string();
		config.options.base_indent = String::new();
		config
	}

	/// Returns the stylesheet scope token, defaulting to `@@global`.
	pub fn scope(&self) -> &str {
		self.context.as_ref().map_or(SCOPE_GLOBAL, |ctx| ctx.name.as_str())
	}
}

/// User-supplied snippets, merged over the built-in tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetTables {
	pub markup: IndexMap<String, String>,
	pub stylesheet: IndexMap<String, String>,
}
