//! Inputs to and outputs from a picker session.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::PickerError;
use crate::item::Item;
use crate::selection::Movement;

/// A user or host event fed into [`PickerSession::dispatch`](super::PickerSession::dispatch).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerAction {
	SetQuery(String),
	Navigate(Movement),
	/// Add or remove the active item from the picked set (multi-select only).
	ToggleActive,
	Commit,
	Cancel,
	/// Step back in a multi-step flow; ignored outside wizard steps.
	Back,
	/// A side-action button on the ranked row at `position` was pressed.
	TriggerItemButton { position: usize, button: String },
	/// The host tore the picker down.
	Close,
}

/// Notification emitted by a session in response to an action or update.
pub enum PickerEvent<T> {
	/// Single-select commit.
	Selected(Arc<Item<T>>),
	/// Multi-select commit, in pick order.
	SelectedMany(Vec<Arc<Item<T>>>),
	/// Session ended without a selection.
	Closed,
	/// Wizard step asked to go back.
	Back,
	ValueChanged(String),
	/// The active row changed; `None` when nothing is selectable.
	ActiveItemChanged(Option<Arc<Item<T>>>),
	ItemButtonClicked { item: Arc<Item<T>>, button: String },
}

impl<T> fmt::Debug for PickerEvent<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Selected(item) => f.debug_tuple("Selected").field(&item.label).finish(),
			Self::SelectedMany(items) => f
				.debug_tuple("SelectedMany")
				.field(&items.iter().map(|item| item.label.as_str()).collect::<Vec<_>>())
				.finish(),
			Self::Closed => f.write_str("Closed"),
			Self::Back => f.write_str("Back"),
			Self::ValueChanged(query) => f.debug_tuple("ValueChanged").field(query).finish(),
			Self::ActiveItemChanged(item) => f
				.debug_tuple("ActiveItemChanged")
				.field(&item.as_ref().map(|item| item.label.as_str()))
				.finish(),
			Self::ItemButtonClicked { item, button } => f
				.debug_struct("ItemButtonClicked")
				.field("item", &item.label)
				.field("button", button)
				.finish(),
		}
	}
}

/// Abstract keyboard bindings understood by the picker.
///
/// Binding physical keys to these commands is left to the rendering layer;
/// the names parse from strings so bindings can live in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerCommand {
	Next,
	Previous,
	First,
	Last,
	PageForward,
	PageBackward,
	CycleForward,
	CycleBackward,
	Toggle,
	Commit,
	Cancel,
	Back,
}

impl PickerCommand {
	pub const ALL: [PickerCommand; 12] = [
		Self::Next,
		Self::Previous,
		Self::First,
		Self::Last,
		Self::PageForward,
		Self::PageBackward,
		Self::CycleForward,
		Self::CycleBackward,
		Self::Toggle,
		Self::Commit,
		Self::Cancel,
		Self::Back,
	];

	#[must_use]
	pub fn name(self) -> &'static str {
		match self {
			Self::Next => "next",
			Self::Previous => "previous",
			Self::First => "first",
			Self::Last => "last",
			Self::PageForward => "page-forward",
			Self::PageBackward => "page-backward",
			Self::CycleForward => "cycle-forward",
			Self::CycleBackward => "cycle-backward",
			Self::Toggle => "toggle",
			Self::Commit => "commit",
			Self::Cancel => "cancel",
			Self::Back => "back",
		}
	}
}

impl fmt::Display for PickerCommand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for PickerCommand {
	type Err = PickerError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = s.trim().to_ascii_lowercase();
		let command = match normalized.as_str() {
			"next" | "down" => Self::Next,
			"previous" | "prev" | "up" => Self::Previous,
			"first" | "home" => Self::First,
			"last" | "end" => Self::Last,
			"page-forward" | "pagedown" => Self::PageForward,
			"page-backward" | "pageup" => Self::PageBackward,
			"cycle-forward" | "tab" => Self::CycleForward,
			"cycle-backward" | "backtab" => Self::CycleBackward,
			"toggle" | "space" => Self::Toggle,
			"commit" | "enter" | "accept" => Self::Commit,
			"cancel" | "esc" | "escape" => Self::Cancel,
			"back" => Self::Back,
			_ => return Err(PickerError::UnknownCommand(s.to_owned())),
		};
		Ok(command)
	}
}

impl From<PickerCommand> for PickerAction {
	fn from(command: PickerCommand) -> Self {
		match command {
			PickerCommand::Next => Self::Navigate(Movement::Next),
			PickerCommand::Previous => Self::Navigate(Movement::Previous),
			PickerCommand::First => Self::Navigate(Movement::First),
			PickerCommand::Last => Self::Navigate(Movement::Last),
			PickerCommand::PageForward => Self::Navigate(Movement::PageForward),
			PickerCommand::PageBackward => Self::Navigate(Movement::PageBackward),
			PickerCommand::CycleForward => Self::Navigate(Movement::CycleForward),
			PickerCommand::CycleBackward => Self::Navigate(Movement::CycleBackward),
			PickerCommand::Toggle => Self::ToggleActive,
			PickerCommand::Commit => Self::Commit,
			PickerCommand::Cancel => Self::Cancel,
			PickerCommand::Back => Self::Back,
		}
	}
}
