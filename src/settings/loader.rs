use anyhow::{Context, Result};
use quickpick::PickerCommand;

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::build_config;
use crate::cli::CliArgs;

/// Load configuration by combining config files, environment variables and
/// CLI arguments, in increasing order of precedence.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.context("failed to deserialize configuration")?;
	raw.apply_cli_overrides(cli);

	let mut resolved = raw.resolve()?;
	resolved.keys = parse_keys(cli.keys.as_deref().unwrap_or_default())?;
	Ok(resolved)
}

fn parse_keys(names: &[String]) -> Result<Vec<PickerCommand>> {
	names
		.iter()
		.filter(|name| !name.trim().is_empty())
		.map(|name| {
			name.parse::<PickerCommand>()
				.with_context(|| format!("invalid --keys entry '{name}'"))
		})
		.collect()
}
