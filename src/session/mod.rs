//! The picker session: an explicit reducer over query, pool and selection.
//!
//! Every [`PickerAction`] passed to [`PickerSession::dispatch`] mutates the
//! session and immediately re-derives the ranked view, so the observable
//! state is always a function of `(pool, query, options)` plus the selection.
//! Provider results for dynamic sessions are applied by
//! [`PickerSession::pump`], which the owner calls from its event loop.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::item::{Item, ItemId};
use crate::options::PickerOptions;
use crate::provider::{ProviderRuntime, ProviderUpdate};
use crate::ranker::{RankOptions, RankedItem, rank};
use crate::selection::Selection;

mod actions;
mod builder;
mod view;

#[cfg(test)]
mod tests;

pub use actions::{PickerAction, PickerCommand, PickerEvent};
pub use builder::PickerBuilder;
pub use view::{PickerView, ViewRow};

enum Source<T> {
	Static,
	Dynamic(ProviderRuntime<T>),
}

/// One open instance of the item picker.
pub struct PickerSession<T> {
	options: PickerOptions,
	rank_options: RankOptions<T>,
	source: Source<T>,
	query: String,
	pool: Vec<Arc<Item<T>>>,
	ranked: Vec<RankedItem>,
	/// Positions in `ranked` of the rows that can be selected.
	selectable: Vec<usize>,
	selection: Selection<T>,
	busy: bool,
	closed: bool,
	/// Active row and item at the time of the last notification.
	last_active: Option<(usize, ItemId)>,
}

impl<T: Send + 'static> PickerSession<T> {
	fn new(options: PickerOptions, rank_options: RankOptions<T>, source: Source<T>) -> Self {
		let selection = Selection::new(options.can_select_many);
		let query = options.initial_query.clone();
		Self {
			options,
			rank_options,
			source,
			query,
			pool: Vec::new(),
			ranked: Vec::new(),
			selectable: Vec::new(),
			selection,
			busy: false,
			closed: false,
			last_active: None,
		}
	}

	/// Apply one action and return the events it produced.
	///
	/// Actions that do not apply in the current mode (toggling in
	/// single-select, going back outside a wizard step) are ignored. A closed
	/// session ignores everything.
	pub fn dispatch(&mut self, action: PickerAction) -> Vec<PickerEvent<T>> {
		let mut events = Vec::new();
		if self.closed {
			return events;
		}

		match action {
			PickerAction::SetQuery(query) => self.set_query(query, &mut events),
			PickerAction::Navigate(movement) => {
				if self.selection.apply(movement) {
					self.notify_active(&mut events);
				}
			}
			PickerAction::ToggleActive => {
				if let Some(item) = self.active_item().cloned() {
					self.selection.toggle(&item);
				}
			}
			PickerAction::Commit => self.commit(&mut events),
			PickerAction::Cancel => {
				if self.options.back_enabled() {
					events.push(PickerEvent::Back);
				} else {
					self.terminate();
					events.push(PickerEvent::Closed);
				}
			}
			PickerAction::Back => {
				if self.options.back_enabled() {
					events.push(PickerEvent::Back);
				}
			}
			PickerAction::TriggerItemButton { position, button } => {
				self.trigger_button(position, button, &mut events);
			}
			PickerAction::Close => {
				self.terminate();
				events.push(PickerEvent::Closed);
			}
		}

		events
	}

	/// Apply provider updates that arrived since the last call.
	///
	/// Updates for superseded requests are discarded. A provider failure
	/// clears the pool; the session stays open.
	pub fn pump(&mut self) -> Vec<PickerEvent<T>> {
		let mut events = Vec::new();
		if self.closed {
			return events;
		}
		let Source::Dynamic(runtime) = &mut self.source else {
			return events;
		};

		let updates: Vec<ProviderUpdate<T>> = std::iter::from_fn(|| runtime.try_recv().ok()).collect();
		let mut next_pool = None;
		for update in updates {
			if !runtime.matches_latest(update.token()) {
				debug!(token = update.token(), "discarding superseded provider update");
				continue;
			}
			match update {
				ProviderUpdate::Started { .. } => self.busy = true,
				ProviderUpdate::Resolved { result, .. } => {
					self.busy = false;
					next_pool = Some(result.unwrap_or_else(|err| {
						warn!(error = %err, query = %self.query, "item provider failed");
						Vec::new()
					}));
				}
			}
		}

		if let Some(items) = next_pool {
			self.replace_pool(items);
			self.notify_active(&mut events);
		}
		events
	}

	fn set_query(&mut self, query: String, events: &mut Vec<PickerEvent<T>>) {
		if query == self.query {
			return;
		}
		self.query = query;
		events.push(PickerEvent::ValueChanged(self.query.clone()));

		if let Source::Dynamic(runtime) = &mut self.source {
			runtime.issue(self.query.clone());
		}
		self.refresh();
		self.notify_active(events);
	}

	fn commit(&mut self, events: &mut Vec<PickerEvent<T>>) {
		if self.selection.is_multi() {
			let picked = self.selection.picked().cloned().collect();
			self.terminate();
			events.push(PickerEvent::SelectedMany(picked));
			return;
		}

		let Some(item) = self.active_item().cloned() else {
			return;
		};
		self.terminate();
		events.push(PickerEvent::Selected(item));
	}

	fn trigger_button(&mut self, position: usize, button: String, events: &mut Vec<PickerEvent<T>>) {
		let Some(entry) = self.ranked.get(position) else {
			return;
		};
		let item = &self.pool[entry.index];
		if !item.buttons.contains(&button) {
			debug!(position, %button, "ignoring unknown item button");
			return;
		}
		events.push(PickerEvent::ItemButtonClicked {
			item: Arc::clone(item),
			button,
		});
	}

	fn terminate(&mut self) {
		self.closed = true;
		self.busy = false;
		if let Source::Dynamic(runtime) = &mut self.source {
			runtime.shutdown();
		}
	}

	/// Replace the pool, picking any items that arrive flagged as picked.
	fn replace_pool(&mut self, items: Vec<Item<T>>) {
		self.pool = items.into_iter().map(Arc::new).collect();
		for item in &self.pool {
			if item.picked {
				self.selection.pick(item);
			}
		}
		self.refresh();
	}

	fn refresh(&mut self) {
		self.ranked = rank(&self.pool, &self.query, &self.rank_options);
		self.selectable = self
			.ranked
			.iter()
			.enumerate()
			.filter(|(_, entry)| !entry.separator)
			.map(|(position, _)| position)
			.collect();
		self.selection.clamp(self.selectable.len());
	}

	fn notify_active(&mut self, events: &mut Vec<PickerEvent<T>>) {
		let current = self.active_position().map(|position| {
			let id = self.pool[self.ranked[position].index].id();
			(self.selection.active().unwrap_or_default(), id)
		});
		if current != self.last_active {
			self.last_active = current;
			events.push(PickerEvent::ActiveItemChanged(self.active_item().cloned()));
		}
	}
}

impl<T> PickerSession<T> {
	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	#[must_use]
	pub fn options(&self) -> &PickerOptions {
		&self.options
	}

	/// Whether a provider call is in flight for the current query.
	#[must_use]
	pub fn is_busy(&self) -> bool {
		self.busy
	}

	#[must_use]
	pub fn is_closed(&self) -> bool {
		self.closed
	}

	#[must_use]
	pub fn pool(&self) -> &[Arc<Item<T>>] {
		&self.pool
	}

	/// The ordered view for the current pool and query, separators included.
	#[must_use]
	pub fn ranked(&self) -> &[RankedItem] {
		&self.ranked
	}

	/// Active index among selectable rows.
	#[must_use]
	pub fn active_index(&self) -> Option<usize> {
		self.selection.active()
	}

	/// Number of rows in the ranked view that can be selected.
	#[must_use]
	pub fn selectable_len(&self) -> usize {
		self.selectable.len()
	}

	/// Position of the active row within [`PickerSession::ranked`].
	fn active_position(&self) -> Option<usize> {
		self.selection
			.active()
			.and_then(|active| self.selectable.get(active).copied())
	}

	#[must_use]
	pub fn active_item(&self) -> Option<&Arc<Item<T>>> {
		self.active_position()
			.map(|position| &self.pool[self.ranked[position].index])
	}

	/// Picked items in pick order.
	pub fn picked(&self) -> impl Iterator<Item = &Arc<Item<T>>> {
		self.selection.picked()
	}

	#[must_use]
	pub fn is_picked(&self, id: ItemId) -> bool {
		self.selection.is_picked(id)
	}
}
