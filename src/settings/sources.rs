use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, Environment, File};
use quickpick::app_dirs;

use crate::cli::CliArgs;

const ENV_PREFIX: &str = "QUICKPICK";

/// Build a [`Config`] from the default file locations, `--config` files and
/// `QUICKPICK__SECTION__KEY` environment variables.
pub(super) fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(environment());

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

fn environment() -> Environment {
	Environment::with_prefix(ENV_PREFIX)
		.separator("__")
		.try_parsing(true)
}

/// Default configuration file locations, lowest precedence first.
pub(super) fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".quickpick.toml"));
		files.push(current_dir.join("quickpick.toml"));
	}

	files
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;
	use crate::settings::raw::RawConfig;

	#[test]
	fn default_files_include_current_directory_variants() {
		let files = default_config_files();
		assert!(files.iter().any(|path| path.ends_with(".quickpick.toml")));
		assert!(files.iter().any(|path| path.ends_with("quickpick.toml")));
	}

	#[test]
	fn environment_maps_nested_sections() {
		let vars = HashMap::from([
			("QUICKPICK__PICKER__CAN_SELECT_MANY".to_string(), "true".to_string()),
			("QUICKPICK__PICKER__DEBOUNCE_MS".to_string(), "40".to_string()),
			("QUICKPICK_LOG".to_string(), "debug".to_string()),
		]);
		let raw: RawConfig = Config::builder()
			.add_source(environment().source(Some(vars)))
			.build()
			.expect("build")
			.try_deserialize()
			.expect("deserialize");

		let resolved = raw.resolve().expect("resolve");
		assert!(resolved.options.can_select_many);
		assert_eq!(resolved.options.debounce_ms, 40);
	}
}
