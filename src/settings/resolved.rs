use std::io::{self, Write};
use std::path::PathBuf;

use quickpick::{PickerCommand, PickerOptions};

use crate::cli::OutputFormat;

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
	/// Candidate file; `None` reads stdin.
	pub input: Option<PathBuf>,
	pub options: PickerOptions,
	/// Commands replayed against the session after it opens.
	pub keys: Vec<PickerCommand>,
	pub output: OutputFormat,
}

impl ResolvedConfig {
	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		let mut stdout = io::stdout().lock();
		// Nothing useful can be done if stdout is gone.
		let _ = self.write_summary(&mut stdout);
	}

	fn write_summary(&self, out: &mut impl Write) -> io::Result<()> {
		let options = &self.options;
		writeln!(out, "Effective configuration:")?;
		match &self.input {
			Some(path) => writeln!(out, "  Input: {}", path.display())?,
			None => writeln!(out, "  Input: (stdin)")?,
		}
		if let Some(title) = &options.title {
			writeln!(out, "  Title: {title}")?;
		}
		if !options.initial_query.is_empty() {
			writeln!(out, "  Query: {}", options.initial_query)?;
		}
		writeln!(out, "  Multi-select: {}", bool_to_word(options.can_select_many))?;
		writeln!(
			out,
			"  Match description: {}",
			bool_to_word(options.match_on_description)
		)?;
		writeln!(out, "  Match detail: {}", bool_to_word(options.match_on_detail))?;
		writeln!(out, "  Sort by label: {}", bool_to_word(options.sort_by_label))?;
		writeln!(out, "  Wizard step: {}", bool_to_word(options.is_wizard_step))?;
		writeln!(out, "  Can go back: {}", bool_to_word(options.can_go_back))?;
		writeln!(out, "  Debounce: {}ms", options.debounce_ms)?;
		writeln!(out, "  No-results message: {}", options.no_results_message())?;
		if !self.keys.is_empty() {
			let names: Vec<&str> = self.keys.iter().map(|key| key.name()).collect();
			writeln!(out, "  Keys: {}", names.join(", "))?;
		}
		writeln!(out, "  Output: {}", self.output.as_str())
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
