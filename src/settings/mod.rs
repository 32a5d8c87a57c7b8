//! Configuration loading and resolution.
//!
//! `load` layers config files, environment variables and CLI flags and
//! returns the [`ResolvedConfig`] the workflow runs from.

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::ResolvedConfig;
