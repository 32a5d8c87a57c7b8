mod cli;
mod logging;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use quickpick::PickerCommand;
use settings::ResolvedConfig;
use workflow::PickWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	logging::initialize(cli.verbose)?;

	if cli.list_commands {
		for command in PickerCommand::ALL {
			println!("{command}");
		}
		return Ok(());
	}

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	run_picker(resolved)
}

/// Run the scripted picker and print output in the configured format.
fn run_picker(settings: ResolvedConfig) -> Result<()> {
	let format = settings.output;
	let outcome = PickWorkflow::from_config(settings).run()?;

	match format {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome)?,
	}

	Ok(())
}
