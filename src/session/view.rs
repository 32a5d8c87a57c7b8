use std::sync::Arc;

use super::PickerSession;
use crate::highlight::{Segment, segments};
use crate::item::Item;
use crate::ranker::RankedItem;

/// Render-ready snapshot of a session.
pub struct PickerView<'a, T> {
	pub query: &'a str,
	pub title: Option<&'a str>,
	pub placeholder: Option<&'a str>,
	pub rows: Vec<ViewRow<'a, T>>,
	/// Active index among selectable rows.
	pub active: Option<usize>,
	pub picked: Vec<&'a Arc<Item<T>>>,
	pub busy: bool,
	/// Set when nothing is selectable and no provider call is pending.
	pub message: Option<&'a str>,
	pub show_back_button: bool,
}

/// One row of a [`PickerView`].
pub struct ViewRow<'a, T> {
	pub item: &'a Arc<Item<T>>,
	pub ranked: &'a RankedItem,
	pub label: Vec<Segment>,
	pub description: Vec<Segment>,
	pub detail: Vec<Segment>,
	pub is_active: bool,
	pub is_picked: bool,
}

impl<T> PickerSession<T> {
	/// Build a snapshot of the current state for a renderer.
	#[must_use]
	pub fn view(&self) -> PickerView<'_, T> {
		let active_position = self.active_position();
		let rows = self
			.ranked
			.iter()
			.enumerate()
			.map(|(position, entry)| {
				let item = &self.pool[entry.index];
				ViewRow {
					item,
					ranked: entry,
					label: segments(&item.label, &entry.label.indices),
					description: item
						.description
						.as_deref()
						.map(|text| segments(text, &entry.description.indices))
						.unwrap_or_default(),
					detail: item
						.detail
						.as_deref()
						.map(|text| segments(text, &entry.detail.indices))
						.unwrap_or_default(),
					is_active: Some(position) == active_position,
					is_picked: self.selection.is_picked(item.id()),
				}
			})
			.collect();

		let message = (self.selectable.is_empty() && !self.busy)
			.then(|| self.options.no_results_message());

		PickerView {
			query: &self.query,
			title: self.options.title.as_deref(),
			placeholder: self.options.placeholder.as_deref(),
			rows,
			active: self.selection.active(),
			picked: self.selection.picked().collect(),
			busy: self.busy,
			message,
			show_back_button: self.options.show_back_button,
		}
	}
}
