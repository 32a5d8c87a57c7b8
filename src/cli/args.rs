use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, CommandFactory, FromArgMatches, Parser, ValueEnum,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use quickpick::app_dirs;
use serde::Deserialize;

/// Produce the full version banner including the config directory.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("quickpick {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");

	Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into [`CliArgs`].
pub(crate) fn parse_cli() -> CliArgs {
	let mut matches = CliArgs::command().get_matches();
	CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

#[derive(Parser, Debug)]
#[command(
	name = "quickpick",
	version,
	long_version = long_version(),
	about = "Rank candidate lines against a query and drive a picker with scripted keys",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
/// Command-line arguments accepted by the `quickpick` binary.
pub(crate) struct CliArgs {
	#[arg(value_name = "QUERY", help = "Query to rank candidates against (default: empty)")]
	pub(crate) query: Option<String>,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "QUICKPICK_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short,
		long,
		value_name = "FILE",
		help = "Read candidates from FILE, one per line (default: stdin)"
	)]
	pub(crate) input: Option<PathBuf>,
	#[arg(
		short,
		long,
		value_delimiter = ',',
		value_name = "COMMAND",
		help = "Comma-separated picker commands to replay, e.g. down,toggle,commit (default: none)"
	)]
	pub(crate) keys: Option<Vec<String>>,
	#[arg(short, long, value_name = "TITLE", help = "Picker title (default: none)")]
	pub(crate) title: Option<String>,
	#[arg(short, long, help = "Allow picking several items (default: disabled)")]
	pub(crate) multi: bool,
	#[arg(
		long = "match-description",
		help = "Also match the description column (default: disabled)"
	)]
	pub(crate) match_description: bool,
	#[arg(long = "match-detail", help = "Also match the detail column (default: disabled)")]
	pub(crate) match_detail: bool,
	#[arg(
		short = 's',
		long = "sort-by-label",
		help = "Sort by label when the query is empty (default: disabled)"
	)]
	pub(crate) sort_by_label: bool,
	#[arg(
		long = "wizard-step",
		help = "Treat the picker as one step of a multi-step flow (default: disabled)"
	)]
	pub(crate) wizard_step: bool,
	#[arg(
		long = "can-go-back",
		help = "Let cancel and the back command return to the previous step (default: disabled)"
	)]
	pub(crate) can_go_back: bool,
	#[arg(
		long = "no-results-message",
		value_name = "TEXT",
		help = "Message printed when nothing matches (default: No matching results)"
	)]
	pub(crate) no_results_message: Option<String>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-commands",
		help = "List picker commands accepted by --keys and exit (default: disabled)"
	)]
	pub(crate) list_commands: bool,
	#[arg(short, long, help = "Log debug diagnostics to stderr (default: disabled)")]
	pub(crate) verbose: bool,
	#[arg(short, long, value_enum, help = "Choose how to print the result (default: plain)")]
	pub(crate) output: Option<OutputFormat>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Output formats supported by the CLI utility.
pub(crate) enum OutputFormat {
	#[default]
	Plain,
	Json,
}

impl OutputFormat {
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			OutputFormat::Plain => "plain",
			OutputFormat::Json => "json",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn command_definition_is_consistent() {
		CliArgs::command().debug_assert();
	}

	#[test]
	fn keys_split_on_commas() {
		let cli = CliArgs::parse_from(["quickpick", "of", "--keys", "down,toggle,commit", "-m"]);
		assert_eq!(cli.query.as_deref(), Some("of"));
		assert_eq!(
			cli.keys,
			Some(vec!["down".to_string(), "toggle".into(), "commit".into()])
		);
		assert!(cli.multi);
		assert_eq!(cli.output, None);
	}
}
