//! Per-session picker options supplied by the host.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default quiet period before a provider is queried.
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

/// Message shown when no selectable rows remain and nothing is loading.
pub const DEFAULT_NO_RESULTS_MESSAGE: &str = "No matching results";

/// Behavioural and presentational options for one picker session.
///
/// Presentational fields (`placeholder`, `title`, `show_back_button`) are
/// carried through untouched for the rendering layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerOptions {
	pub placeholder: Option<String>,
	pub title: Option<String>,
	pub can_select_many: bool,
	pub match_on_description: bool,
	pub match_on_detail: bool,
	pub sort_by_label: bool,
	pub debounce_ms: u64,
	pub no_results_message: Option<String>,
	pub is_wizard_step: bool,
	pub can_go_back: bool,
	pub show_back_button: bool,
	pub initial_query: String,
}

impl Default for PickerOptions {
	fn default() -> Self {
		Self {
			placeholder: None,
			title: None,
			can_select_many: false,
			match_on_description: false,
			match_on_detail: false,
			sort_by_label: false,
			debounce_ms: DEFAULT_DEBOUNCE_MS,
			no_results_message: None,
			is_wizard_step: false,
			can_go_back: false,
			show_back_button: false,
			initial_query: String::new(),
		}
	}
}

impl PickerOptions {
	#[must_use]
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	/// Whether cancel and the back binding step back in a multi-step flow.
	#[must_use]
	pub fn back_enabled(&self) -> bool {
		self.is_wizard_step && self.can_go_back
	}

	#[must_use]
	pub fn no_results_message(&self) -> &str {
		self.no_results_message
			.as_deref()
			.unwrap_or(DEFAULT_NO_RESULTS_MESSAGE)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_documents_fill_defaults() {
		let options: PickerOptions =
			serde_json::from_str(r#"{ "can_select_many": true, "title": "Files" }"#).expect("parse");
		assert!(options.can_select_many);
		assert_eq!(options.title.as_deref(), Some("Files"));
		assert_eq!(options.debounce(), Duration::from_millis(DEFAULT_DEBOUNCE_MS));
		assert_eq!(options.no_results_message(), DEFAULT_NO_RESULTS_MESSAGE);
	}

	#[test]
	fn back_requires_wizard_and_can_go_back() {
		let mut options = PickerOptions {
			is_wizard_step: true,
			..PickerOptions::default()
		};
		assert!(!options.back_enabled());
		options.can_go_back = true;
		assert!(options.back_enabled());
	}
}
