//! Turn a pool of items and a query into an ordered, scored view.
//!
//! Ranking is a pure function of the pool, the query and the options: it
//! keeps no memo state, so identical inputs always produce identical output.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use crate::item::Item;
use crate::matcher::{FieldMatch, match_text};

/// Weight applied to the label score relative to description and detail.
pub const LABEL_WEIGHT: f64 = 2.0;

/// Fixed score given to items accepted by a [`FilterOverride`].
pub const OVERRIDE_SCORE: f64 = 1.0;

/// Caller predicate that replaces field matching entirely.
pub type FilterOverride<T> = Arc<dyn Fn(&Item<T>, &str) -> bool + Send + Sync>;

/// Field-matching flags that shape a ranking pass.
pub struct RankOptions<T> {
	pub match_on_description: bool,
	pub match_on_detail: bool,
	/// Sort by label when the query is empty.
	pub sort_by_label: bool,
	pub filter_override: Option<FilterOverride<T>>,
}

impl<T> Default for RankOptions<T> {
	fn default() -> Self {
		Self {
			match_on_description: false,
			match_on_detail: false,
			sort_by_label: false,
			filter_override: None,
		}
	}
}

impl<T> Clone for RankOptions<T> {
	fn clone(&self) -> Self {
		Self {
			match_on_description: self.match_on_description,
			match_on_detail: self.match_on_detail,
			sort_by_label: self.sort_by_label,
			filter_override: self.filter_override.clone(),
		}
	}
}

impl<T> fmt::Debug for RankOptions<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RankOptions")
			.field("match_on_description", &self.match_on_description)
			.field("match_on_detail", &self.match_on_detail)
			.field("sort_by_label", &self.sort_by_label)
			.field("filter_override", &self.filter_override.is_some())
			.finish()
	}
}

/// One surviving entry of a ranking pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RankedItem {
	/// Position of the item in the pool that was ranked.
	pub index: usize,
	pub score: f64,
	pub label: FieldMatch,
	pub description: FieldMatch,
	pub detail: FieldMatch,
	pub separator: bool,
}

impl RankedItem {
	fn unscored(index: usize, separator: bool) -> Self {
		Self {
			index,
			separator,
			..Self::default()
		}
	}
}

/// Rank `pool` against `query`.
///
/// With an empty query every item passes in pool order (or label order for
/// non-separators when [`RankOptions::sort_by_label`] is set). Otherwise
/// separators and `always_show` items pass unscored, items without a match
/// are dropped, and the rest are stably sorted by descending score with
/// separators ahead of everything else.
pub fn rank<T, I>(pool: &[I], query: &str, options: &RankOptions<T>) -> Vec<RankedItem>
where
	I: AsRef<Item<T>>,
{
	if query.is_empty() {
		return rank_unfiltered(pool, options.sort_by_label);
	}

	let mut ranked = Vec::new();
	for (index, entry) in pool.iter().enumerate() {
		let item = entry.as_ref();
		if item.is_separator() || item.always_show {
			ranked.push(RankedItem::unscored(index, item.is_separator()));
			continue;
		}

		if let Some(filter) = &options.filter_override {
			if filter(item, query) {
				ranked.push(RankedItem {
					score: OVERRIDE_SCORE,
					..RankedItem::unscored(index, false)
				});
			}
			continue;
		}

		if item.label.is_empty() {
			trace!(index, "item has an empty label");
		}

		let label = match_text(query, &item.label);
		let description = optional_field(query, item.description.as_deref(), options.match_on_description);
		let detail = optional_field(query, item.detail.as_deref(), options.match_on_detail);

		let score = LABEL_WEIGHT * label.score + description.score + detail.score;
		if score == 0.0 {
			continue;
		}

		ranked.push(RankedItem {
			index,
			score,
			label,
			description,
			detail,
			separator: false,
		});
	}

	ranked.sort_by(|a, b| {
		b.separator
			.cmp(&a.separator)
			.then_with(|| b.score.total_cmp(&a.score))
	});
	ranked
}

fn optional_field(query: &str, text: Option<&str>, enabled: bool) -> FieldMatch {
	match text {
		Some(text) if enabled => match_text(query, text),
		_ => FieldMatch::default(),
	}
}

fn rank_unfiltered<T, I>(pool: &[I], sort_by_label: bool) -> Vec<RankedItem>
where
	I: AsRef<Item<T>>,
{
	let mut ranked: Vec<RankedItem> = pool
		.iter()
		.enumerate()
		.map(|(index, item)| RankedItem::unscored(index, item.as_ref().is_separator()))
		.collect();

	if sort_by_label {
		// Separators stay in their slots; the other items are sorted into the
		// remaining positions.
		let slots: Vec<usize> = ranked
			.iter()
			.enumerate()
			.filter(|(_, entry)| !entry.separator)
			.map(|(slot, _)| slot)
			.collect();
		let mut sorted: Vec<RankedItem> = slots.iter().map(|&slot| ranked[slot].clone()).collect();
		sorted.sort_by(|a, b| {
			pool[a.index]
				.as_ref()
				.label
				.cmp(&pool[b.index].as_ref().label)
		});
		for (slot, entry) in slots.into_iter().zip(sorted) {
			ranked[slot] = entry;
		}
	}

	ranked
}
