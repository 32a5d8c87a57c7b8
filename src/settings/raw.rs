use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use quickpick::PickerOptions;
use serde::Deserialize;

use super::resolved::ResolvedConfig;
use crate::cli::{CliArgs, OutputFormat};

/// Longest accepted provider debounce.
const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	picker: PickerSection,
	input: InputSection,
	output: OutputSection,
}

/// `[picker]`: session behaviour and labels.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PickerSection {
	title: Option<String>,
	placeholder: Option<String>,
	initial_query: Option<String>,
	can_select_many: Option<bool>,
	match_on_description: Option<bool>,
	match_on_detail: Option<bool>,
	sort_by_label: Option<bool>,
	is_wizard_step: Option<bool>,
	can_go_back: Option<bool>,
	show_back_button: Option<bool>,
	debounce_ms: Option<u64>,
	no_results_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct InputSection {
	path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct OutputSection {
	format: Option<OutputFormat>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values. Switch
	/// flags only ever turn a setting on.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(query) = cli.query.clone() {
			self.picker.initial_query = Some(query);
		}
		if let Some(title) = cli.title.clone() {
			self.picker.title = Some(title);
		}
		if cli.multi {
			self.picker.can_select_many = Some(true);
		}
		if cli.match_description {
			self.picker.match_on_description = Some(true);
		}
		if cli.match_detail {
			self.picker.match_on_detail = Some(true);
		}
		if cli.sort_by_label {
			self.picker.sort_by_label = Some(true);
		}
		if cli.wizard_step {
			self.picker.is_wizard_step = Some(true);
		}
		if cli.can_go_back {
			self.picker.can_go_back = Some(true);
		}
		if let Some(message) = cli.no_results_message.clone() {
			self.picker.no_results_message = Some(message);
		}
		if let Some(path) = cli.input.clone() {
			self.input.path = Some(path);
		}
		if let Some(format) = cli.output {
			self.output.format = Some(format);
		}
	}

	/// Validate and fill defaults.
	pub(super) fn resolve(self) -> Result<ResolvedConfig> {
		let defaults = PickerOptions::default();
		let picker = self.picker;

		let debounce_ms = picker.debounce_ms.unwrap_or(defaults.debounce_ms);
		ensure!(
			debounce_ms <= MAX_DEBOUNCE_MS,
			"picker.debounce_ms must be at most {MAX_DEBOUNCE_MS} (got {debounce_ms})"
		);

		let no_results_message = picker
			.no_results_message
			.map(|message| message.trim().to_string())
			.filter(|message| !message.is_empty());

		let options = PickerOptions {
			placeholder: picker.placeholder,
			title: picker.title,
			can_select_many: picker.can_select_many.unwrap_or(defaults.can_select_many),
			match_on_description: picker
				.match_on_description
				.unwrap_or(defaults.match_on_description),
			match_on_detail: picker.match_on_detail.unwrap_or(defaults.match_on_detail),
			sort_by_label: picker.sort_by_label.unwrap_or(defaults.sort_by_label),
			is_wizard_step: picker.is_wizard_step.unwrap_or(defaults.is_wizard_step),
			can_go_back: picker.can_go_back.unwrap_or(defaults.can_go_back),
			show_back_button: picker.show_back_button.unwrap_or(defaults.show_back_button),
			debounce_ms,
			no_results_message,
			initial_query: picker.initial_query.unwrap_or_default(),
		};

		let input = match self.input.path {
			Some(path) => {
				let metadata = fs::metadata(&path)
					.with_context(|| format!("failed to inspect input file {}", path.display()))?;
				ensure!(metadata.is_file(), "input {} must be a file", path.display());
				Some(path)
			}
			None => None,
		};

		Ok(ResolvedConfig {
			input,
			options,
			keys: Vec::new(),
			output: self.output.format.unwrap_or_default(),
		})
	}
}

#[cfg(test)]
mod tests {
	use clap::Parser;
	use tempfile::tempdir;

	use super::*;

	#[test]
	fn cli_overrides_take_precedence() {
		let cli = CliArgs::parse_from([
			"quickpick",
			"query",
			"--title",
			"Commands",
			"--multi",
			"--match-detail",
			"--output",
			"json",
		]);

		let mut config = RawConfig::default();
		config.picker.title = Some("Files".into());
		config.picker.match_on_description = Some(true);
		config.apply_cli_overrides(&cli);

		assert_eq!(config.picker.title.as_deref(), Some("Commands"));
		assert_eq!(config.picker.initial_query.as_deref(), Some("query"));
		assert_eq!(config.picker.can_select_many, Some(true));
		assert_eq!(config.picker.match_on_description, Some(true));
		assert_eq!(config.picker.match_on_detail, Some(true));
		assert_eq!(config.picker.sort_by_label, None);
		assert_eq!(config.output.format, Some(OutputFormat::Json));
	}

	#[test]
	fn wizard_flags_reach_picker_options() {
		let cli = CliArgs::parse_from(["quickpick", "--wizard-step", "--can-go-back"]);
		let mut config = RawConfig::default();
		config.picker.show_back_button = Some(true);
		config.apply_cli_overrides(&cli);

		let options = config.resolve().expect("resolve").options;
		assert!(options.is_wizard_step);
		assert!(options.can_go_back);
		assert!(options.show_back_button);
		assert!(options.back_enabled());
	}

	#[test]
	fn defaults_fill_unset_fields() {
		let resolved = RawConfig::default().resolve().expect("resolve");
		assert_eq!(resolved.options, PickerOptions::default());
		assert_eq!(resolved.output, OutputFormat::Plain);
		assert!(resolved.input.is_none());
	}

	#[test]
	fn excessive_debounce_is_rejected() {
		let mut config = RawConfig::default();
		config.picker.debounce_ms = Some(MAX_DEBOUNCE_MS + 1);
		let err = config.resolve().unwrap_err();
		assert!(err.to_string().contains("debounce_ms"));
	}

	#[test]
	fn input_must_be_a_file() {
		let dir = tempdir().expect("tempdir");
		let mut config = RawConfig::default();
		config.input.path = Some(dir.path().to_path_buf());
		assert!(config.resolve().is_err());
	}

	#[test]
	fn blank_no_results_message_falls_back_to_default() {
		let mut config = RawConfig::default();
		config.picker.no_results_message = Some("   ".into());
		let resolved = config.resolve().expect("resolve");
		assert_eq!(resolved.options.no_results_message, None);
	}
}
