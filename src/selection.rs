//! Active-row tracking and multi-select membership.
//!
//! The active index always refers to the *selectable* rows of the current
//! ranked view, i.e. with separators removed. The picked set is keyed by
//! [`ItemId`] and outlives re-filtering: an item stays picked while it is
//! hidden by the query or replaced by a newer provider pool.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::item::{Item, ItemId};

/// Rows skipped by a page movement.
pub const PAGE_SIZE: usize = 10;

/// Keyboard-driven change of the active row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
	Next,
	Previous,
	First,
	Last,
	PageForward,
	PageBackward,
	/// Like [`Movement::Next`] but wraps from the last row to the first.
	CycleForward,
	/// Like [`Movement::Previous`] but wraps from the first row to the last.
	CycleBackward,
}

/// Active index and picked set for one picker session.
#[derive(Debug)]
pub struct Selection<T> {
	active: Option<usize>,
	len: usize,
	multi: bool,
	picked: IndexMap<ItemId, Arc<Item<T>>>,
}

impl<T> Selection<T> {
	pub fn new(multi: bool) -> Self {
		Self {
			active: None,
			len: 0,
			multi,
			picked: IndexMap::new(),
		}
	}

	/// Index of the active row among selectable rows, `None` when there are
	/// no selectable rows.
	#[must_use]
	pub fn active(&self) -> Option<usize> {
		self.active
	}

	/// Number of selectable rows the selection was last clamped to.
	#[must_use]
	pub fn len(&self) -> usize {
		self.len
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	#[must_use]
	pub fn is_multi(&self) -> bool {
		self.multi
	}

	/// Re-fit the active index to a view with `len` selectable rows.
	pub fn clamp(&mut self, len: usize) {
		self.len = len;
		self.active = match len {
			0 => None,
			_ => Some(self.active.unwrap_or(0).min(len - 1)),
		};
	}

	/// Move the active row. Returns `true` when the active index changed.
	pub fn apply(&mut self, movement: Movement) -> bool {
		let Some(current) = self.active else {
			return false;
		};
		let last = self.len - 1;
		let next = match movement {
			Movement::Next => (current + 1).min(last),
			Movement::Previous => current.saturating_sub(1),
			Movement::First => 0,
			Movement::Last => last,
			Movement::PageForward => current.saturating_add(PAGE_SIZE).min(last),
			Movement::PageBackward => current.saturating_sub(PAGE_SIZE),
			Movement::CycleForward => (current + 1) % self.len,
			Movement::CycleBackward => (current + self.len - 1) % self.len,
		};
		self.active = Some(next);
		next != current
	}

	/// Add `item` to the picked set, or remove it if already present.
	///
	/// No-op in single-select mode and for separators. Returns `true` when the
	/// picked set changed.
	pub fn toggle(&mut self, item: &Arc<Item<T>>) -> bool {
		if !self.multi || item.is_separator() {
			return false;
		}
		if self.picked.shift_remove(&item.id()).is_none() {
			self.picked.insert(item.id(), Arc::clone(item));
		}
		true
	}

	/// Mark `item` as picked without toggling. Used for items that arrive
	/// with their `picked` flag set.
	pub fn pick(&mut self, item: &Arc<Item<T>>) {
		if self.multi && !item.is_separator() {
			self.picked.entry(item.id()).or_insert_with(|| Arc::clone(item));
		}
	}

	#[must_use]
	pub fn is_picked(&self, id: ItemId) -> bool {
		self.picked.contains_key(&id)
	}

	/// Picked items in the order they were picked.
	pub fn picked(&self) -> impl Iterator<Item = &Arc<Item<T>>> {
		self.picked.values()
	}

	#[must_use]
	pub fn picked_len(&self) -> usize {
		self.picked.len()
	}
}
