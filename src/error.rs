use thiserror::Error;

/// Errors surfaced by the picker library.
#[derive(Debug, Error)]
pub enum PickerError {
	/// A provider-backed session needs a tokio runtime to drive its debounce
	/// timers and provider futures.
	#[error("provider-backed pickers must be built inside a tokio runtime")]
	NoRuntime(#[source] tokio::runtime::TryCurrentError),

	/// A command name did not correspond to any picker command.
	#[error("unknown picker command '{0}'")]
	UnknownCommand(String),
}
