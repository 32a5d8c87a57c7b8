//! Ordered-subsequence matching and scoring for a single text field.
//!
//! A query matches a text when every query character appears in the text in
//! the same relative order, compared case-insensitively. Matching runs in two
//! passes: a cheap rejection scan, then a scoring walk that rewards word
//! boundaries, camel-case humps, consecutive runs and exact case, and
//! penalises gaps.
//!
//! The scoring walk is greedy: each query character consumes the first
//! eligible text position. This is not a globally optimal alignment, so a
//! later, better-placed occurrence can be passed over (`"ab"` against
//! `"a_ab"` aligns to indices `[0, 3]`).

use serde::Serialize;


/// Per-character bonus multiplied by the length of the current consecutive run.
pub const CONSECUTIVE_BONUS: i64 = 5;
/// Bonus for matching the very first character of the text.
pub const START_BONUS: i64 = 10;
/// Bonus for matching right after a word separator.
pub const SEPARATOR_BONUS: i64 = 8;
/// Bonus for matching an uppercase character that follows a lowercase one.
pub const CAMEL_CASE_BONUS: i64 = 6;
/// Bonus for matching with identical case.
pub const EXACT_CASE_BONUS: i64 = 2;
/// Upper bound on the penalty subtracted for a gap between two matches.
pub const MAX_GAP_PENALTY: i64 = 3;
/// Constant in the `1 + K / (len + K)` length normalisation factor.
pub const LENGTH_NORMALIZATION: f64 = 10.0;

const WORD_SEPARATORS: [char; 6] = [' ', '_', '-', '.', '/', '\\'];

/// Score and matched char indices for one field.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FieldMatch {
	pub score: f64,
	/// Ascending char indices into the matched text.
	pub indices: Vec<usize>,
}

impl FieldMatch {
	/// Whether the field contributed a non-zero score.
	#[must_use]
	pub fn is_match(&self) -> bool {
		self.score > 0.0
	}
}

/// Match `query` against `text`.
///
/// An empty query yields score `0` with no indices, which callers treat as an
/// unconditional pass. A query that is not an ordered subsequence of `text`
/// also yields score `0`.
#[must_use]
pub fn match_text(query: &str, text: &str) -> FieldMatch {
	if query.is_empty() {
		return FieldMatch::default();
	}

	let query: Vec<char> = query.chars().collect();
	if !is_subsequence(&query, text) {
		return FieldMatch::default();
	}

	let text: Vec<char> = text.chars().collect();
	score_alignment(&query, &text)
}

/// Single scan that advances through `query` whenever the current text
/// character matches.
fn is_subsequence(query: &[char], text: &str) -> bool {
	let mut cursor = 0;
	for ch in text.chars() {
		if cursor == query.len() {
			break;
		}
		if eq_ignore_case(ch, query[cursor]) {
			cursor += 1;
		}
	}
	cursor == query.len()
}

fn score_alignment(query: &[char], text: &[char]) -> FieldMatch {
	let mut indices = Vec::with_capacity(query.len());
	let mut raw: i64 = 0;
	let mut consecutive: i64 = 0;
	let mut previous: Option<usize> = None;

	for (index, &ch) in text.iter().enumerate() {
		let Some(&wanted) = query.get(indices.len()) else {
			break;
		};
		if !eq_ignore_case(ch, wanted) {
			continue;
		}

		match previous {
			Some(prev) if index == prev + 1 => consecutive += 1,
			_ => consecutive = 0,
		}

		let mut weight = 1 + consecutive * CONSECUTIVE_BONUS + position_bonus(text, index);
		if ch == wanted {
			weight += EXACT_CASE_BONUS;
		}
		if let Some(prev) = previous {
			let gap = index - prev;
			if gap > 1 {
				weight -= i64::try_from(gap - 1)
					.unwrap_or(i64::MAX)
					.min(MAX_GAP_PENALTY);
			}
		}

		raw += weight;
		indices.push(index);
		previous = Some(index);
	}

	// Gap penalties can push a match to zero or below; floor it at 1.
	let raw = raw.max(1) as f64;
	let factor = 1.0 + LENGTH_NORMALIZATION / (text.len() as f64 + LENGTH_NORMALIZATION);

	FieldMatch {
		score: raw * factor,
		indices,
	}
}

fn position_bonus(text: &[char], index: usize) -> i64 {
	let Some(prev) = index.checked_sub(1).map(|i| text[i]) else {
		return START_BONUS;
	};

	if WORD_SEPARATORS.contains(&prev) {
		SEPARATOR_BONUS
	} else if prev.is_lowercase() && text[index].is_uppercase() {
		CAMEL_CASE_BONUS
	} else {
		0
	}
}

fn eq_ignore_case(a: char, b: char) -> bool {
	a == b || a.to_lowercase().eq(b.to_lowercase())
}
