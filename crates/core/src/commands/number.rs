use zen_primitives::{Bias, CharIdx, Change, Range, Selection, Transaction};
use zen_syntax::SyntaxTree;

use crate::snapshot::Snapshot;

/// Digits kept after the decimal point.
const PRECISION: usize = 3;

/// Finds the number around `pos` in `line`: digits with at most one dot
/// and an optional leading minus. Offsets are character offsets.
pub fn extract_number(line: &str, pos: usize) -> Option<Range> {
	let chars: Vec<char> = line.chars().collect();
	let mut has_dot = false;
	let mut end = pos.min(chars.len());
	let mut start = end;

	while let Some(&ch) = chars.get(end) {
		if ch == '.' {
			if has_dot {
				break;
			}
			has_dot = true;
		} else if !ch.is_ascii_digit() {
			break;
		}
		end += 1;
	}

	while start > 0 {
		let ch = chars[start - 1];
		if ch == '.' {
			if has_dot {
				break;
			}
			has_dot = true;
		} else if !ch.is_ascii_digit() {
			break;
		}
		start -= 1;
	}

	if start > 0 && chars[start - 1] == '-' {
		start -= 1;
	}
	(start != end).then(|| Range::new(start, end))
}

/// Adds `delta` to the number written as `num`.
///
/// The result keeps up to three decimals without trailing zeros, and no
/// leading zero when `num` had none. Text that is not a number is
/// returned unchanged.
pub fn update_number(num: &str, delta: f64) -> String {
	let Some(value) = parse_number_prefix(num) else {
		return num.to_string();
	};
	let value = value + delta;

	let mut result = format!("{:.*}", PRECISION, value.abs());
	if result.contains('.') {
		result = result.trim_end_matches('0').trim_end_matches('.').to_string();
	}
	if (num.starts_with('.') || num.starts_with("-.")) && result.starts_with("0.") {
		result.remove(0);
	}
	if value < 0.0 && result != "0" {
		result.insert(0, '-');
	}
	result
}

/// Parses the longest numeric prefix of `text`.
fn parse_number_prefix(text: &str) -> Option<f64> {
	let is_numeric = |s: &str| s.chars().all(|ch| ch.is_ascii_digit() || ch == '.' || ch == '-');
	text.char_indices()
		.map(|(idx, ch)| idx + ch.len_utf8())
		.rev()
		.map(|end| &text[..end])
		.filter(|prefix| is_numeric(prefix))
		.find_map(|prefix| prefix.parse::<f64>().ok())
}

/// Increments or decrements the number at each selection range.
///
/// An empty range picks the number around the caret; a non-empty range
/// must hold exactly a number. Each updated number ends up selected, and a
/// number reached from several ranges changes once.
pub fn inc_dec_number<T: SyntaxTree>(
	snapshot: &Snapshot<'_, T>,
	selection: &Selection,
	delta: f64,
) -> Option<Transaction> {
	let mut changes = Vec::new();
	let mut updated: Vec<(Range, CharIdx)> = Vec::new();

	for range in selection.iter() {
		let Some(num) = number_range(snapshot, *range) else {
			continue;
		};
		// Several carets in one number update it once.
		if updated.iter().any(|(prev, _)| prev.from < num.to && num.from < prev.to) {
			continue;
		}
		let value = update_number(&snapshot.slice(num), delta);
		updated.push((num, value.chars().count()));
		changes.push(Change::replace(num.from, num.to, value));
	}
	if changes.is_empty() {
		return None;
	}

	let tx = Transaction::change(snapshot.text, changes);
	let mapped = selection.transform(|range| {
		match updated.iter().find(|(num, _)| num.contains_pos(range.from) && num.contains_pos(range.to)) {
			Some((num, len)) => {
				let from = tx.changes().map_pos(num.from, Bias::Left);
				Range::new(from, from + len)
			}
			None => Range::new(
				tx.changes().map_pos(range.from, Bias::Left),
				tx.changes().map_pos(range.to, Bias::Right),
			),
		}
	});
	Some(tx.with_selection(mapped))
}

fn number_range<T: SyntaxTree>(snapshot: &Snapshot<'_, T>, range: Range) -> Option<Range> {
	if range.is_empty() {
		let line = snapshot.line_at(range.from);
		return extract_number(&line.text, range.from - line.from).map(|num| num.offset(line.from));
	}

	let text = snapshot.slice(range);
	let valid = !text.is_empty()
		&& text.chars().all(|ch| ch.is_ascii_digit() || ch == '.' || ch == '-')
		&& text.parse::<f64>().is_ok();
	valid.then_some(range)
}
