//! Candidate items shown by the picker.
//!
//! An [`Item`] pairs an opaque caller payload with the text fields the
//! matcher looks at. Identity is carried by an [`ItemId`] handed out when the
//! item is constructed, so two items with identical labels remain distinct
//! entries in the picked set.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of an item for the lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ItemId(u64);

impl ItemId {
	fn next() -> Self {
		Self(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
	}

	/// Raw numeric value of the identifier.
	#[must_use]
	pub fn get(self) -> u64 {
		self.0
	}
}

/// Whether an entry is a regular candidate or a section header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
	#[default]
	Default,
	Separator,
}

/// A single entry in the picker pool.
#[derive(Clone, Debug)]
pub struct Item<T> {
	id: ItemId,
	pub payload: T,
	pub label: String,
	pub description: Option<String>,
	pub detail: Option<String>,
	pub kind: ItemKind,
	/// Keep the item visible regardless of the query.
	pub always_show: bool,
	/// Initial membership in the multi-select picked set.
	pub picked: bool,
	/// Identifiers of side actions rendered next to the item.
	pub buttons: Vec<String>,
}

impl<T> Item<T> {
	/// Create a regular item with the given label.
	pub fn new(label: impl Into<String>, payload: T) -> Self {
		Self {
			id: ItemId::next(),
			payload,
			label: label.into(),
			description: None,
			detail: None,
			kind: ItemKind::Default,
			always_show: false,
			picked: false,
			buttons: Vec::new(),
		}
	}

	/// Create a section header. Separators are never scored or selectable.
	pub fn separator(label: impl Into<String>, payload: T) -> Self {
		Self {
			kind: ItemKind::Separator,
			..Self::new(label, payload)
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
		self.detail = Some(detail.into());
		self
	}

	pub fn with_always_show(mut self, always_show: bool) -> Self {
		self.always_show = always_show;
		self
	}

	pub fn with_picked(mut self, picked: bool) -> Self {
		self.picked = picked;
		self
	}

	pub fn with_button(mut self, button: impl Into<String>) -> Self {
		self.buttons.push(button.into());
		self
	}

	#[must_use]
	pub fn id(&self) -> ItemId {
		self.id
	}

	#[must_use]
	pub fn is_separator(&self) -> bool {
		self.kind == ItemKind::Separator
	}
}

impl<T> AsRef<Item<T>> for Item<T> {
	fn as_ref(&self) -> &Item<T> {
		self
	}
}

impl Item<()> {
	/// Convenience constructor for items that carry no payload.
	pub fn labeled(label: impl Into<String>) -> Self {
		Self::new(label, ())
	}
}
