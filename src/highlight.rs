//! Split text into matched and unmatched runs for rendering.

use std::mem;

use serde::Serialize;

/// A contiguous run of text that is either entirely matched or unmatched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Segment {
	pub text: String,
	pub matched: bool,
}

impl Segment {
	fn new(text: String, matched: bool) -> Self {
		Self { text, matched }
	}
}

/// Partition `text` at the boundaries implied by the ascending char
/// `indices`. Adjacent matched characters coalesce into one segment; indices
/// past the end of the text are ignored.
#[must_use]
pub fn segments(text: &str, indices: &[usize]) -> Vec<Segment> {
	if indices.is_empty() {
		if text.is_empty() {
			return Vec::new();
		}
		return vec![Segment::new(text.to_owned(), false)];
	}

	let mut next = indices.iter().copied().peekable();
	let mut buffer = String::new();
	let mut highlighted = false;
	let mut out = Vec::new();

	for (idx, ch) in text.chars().enumerate() {
		while next.peek().is_some_and(|&i| i < idx) {
			next.next();
		}
		let matched = next.peek() == Some(&idx);
		if matched {
			next.next();
		}
		if matched != highlighted {
			if !buffer.is_empty() {
				out.push(Segment::new(mem::take(&mut buffer), highlighted));
			}
			highlighted = matched;
		}
		buffer.push(ch);
	}

	if !buffer.is_empty() {
		out.push(Segment::new(buffer, highlighted));
	}

	out
}
