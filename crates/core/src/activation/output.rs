use zen_abbrev::{FieldStyle, MarkupStyle, OutputOptions, Syntax};
use zen_primitives::CharIdx;
use zen_syntax::SyntaxTree;

use crate::snapshot::Snapshot;

/// Output settings for code expanded at `pos`.
///
/// Generated lines are indented like the line at `pos`. Inline code (such as
/// a `style` attribute) is written on a single line.
pub fn output_options<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, pos: CharIdx, inline: bool) -> OutputOptions {
	let config = snapshot.config;
	let mut options = OutputOptions {
		base_indent: snapshot.line_at(pos).indent().to_string(),
		indent: config.indent_unit(),
		field: FieldStyle::Snippet,
		format: !inline,
		attribute_quotes: config.attribute_quotes,
		short_hex: config.short_hex,
		..OutputOptions::default()
	};

	if config.syntax == Syntax::Html {
		options.self_closing_style = config.markup_style;
		options.compact_boolean = config.markup_style == MarkupStyle::Html;
	}

	if config.syntax.is_html() {
		if config.comments && !config.comments_template.is_empty() {
			options.comment = Some(config.comments_template.clone());
		}
		options.bem = config.bem;
	}
	options
}
