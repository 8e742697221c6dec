//! Node type names shared by tree producers and the context resolver.

/// Markup node names.
pub mod markup {
	pub const DOCUMENT: &str = "Document";
	pub const ELEMENT: &str = "Element";
	pub const OPEN_TAG: &str = "OpenTag";
	pub const CLOSE_TAG: &str = "CloseTag";
	pub const SELF_CLOSING_TAG: &str = "SelfClosingTag";
	pub const TAG_NAME: &str = "TagName";
	pub const ATTRIBUTE: &str = "Attribute";
	pub const ATTRIBUTE_NAME: &str = "AttributeName";
	/// Attribute value including its quotes.
	pub const ATTRIBUTE_VALUE: &str = "AttributeValue";
	pub const TEXT: &str = "Text";
	pub const COMMENT: &str = "Comment";
	/// Raw content of `<script>` and `<style>` elements.
	pub const SCRIPT_TEXT: &str = "ScriptText";
}

/// Stylesheet node names.
pub mod stylesheet {
	pub const STYLESHEET: &str = "StyleSheet";
	pub const RULE_SET: &str = "RuleSet";
	pub const SELECTOR: &str = "Selector";
	pub const BLOCK: &str = "Block";
	pub const DECLARATION: &str = "Declaration";
	pub const PROPERTY_NAME: &str = "PropertyName";
	pub const VALUE: &str = "Value";
	pub const IMPORTANT: &str = "Important";
	pub const AT_RULE: &str = "AtRule";
	pub const AT_KEYWORD: &str = "AtKeyword";
	pub const COMMENT: &str = "Comment";
	pub const COLON: &str = ":";
	pub const OPEN_BRACE: &str = "{";
	pub const CLOSE_BRACE: &str = "}";
}

/// Root of a tree without structure.
pub const PLAIN: &str = "Document";
