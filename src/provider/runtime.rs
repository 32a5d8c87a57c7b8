use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::{ItemProvider, ProviderUpdate};
use crate::error::PickerError;

/// Debounces queries into provider calls and sequences their results.
///
/// Every issued query gets a fresh, monotonically increasing request token.
/// Only the most recently issued token is considered current; results for
/// older tokens are still delivered but [`ProviderRuntime::matches_latest`]
/// rejects them, since completion order need not follow issue order.
pub struct ProviderRuntime<T> {
	handle: Handle,
	provider: Arc<dyn ItemProvider<T>>,
	debounce: Duration,
	tx: UnboundedSender<ProviderUpdate<T>>,
	rx: UnboundedReceiver<ProviderUpdate<T>>,
	/// Cancelled on shutdown; parent of every debounce token.
	root: CancellationToken,
	/// Debounce handle of the most recent request, until it fires.
	pending: Option<CancellationToken>,
	next_token: u64,
	latest: Option<u64>,
}

impl<T: Send + 'static> ProviderRuntime<T> {
	/// Create a runtime bound to the current tokio runtime.
	pub fn new(provider: Arc<dyn ItemProvider<T>>, debounce: Duration) -> Result<Self, PickerError> {
		let handle = Handle::try_current().map_err(PickerError::NoRuntime)?;
		let (tx, rx) = unbounded_channel();
		Ok(Self {
			handle,
			provider,
			debounce,
			tx,
			rx,
			root: CancellationToken::new(),
			pending: None,
			next_token: 0,
			latest: None,
		})
	}

	/// Schedule a provider call for `query` after the debounce delay,
	/// superseding any earlier request. Returns the request token.
	pub fn issue(&mut self, query: String) -> u64 {
		self.schedule(query, self.debounce)
	}

	/// Schedule a provider call for `query` without waiting for a quiet
	/// period. Used for the opening request of a session.
	pub fn issue_now(&mut self, query: String) -> u64 {
		self.schedule(query, Duration::ZERO)
	}

	fn schedule(&mut self, query: String, delay: Duration) -> u64 {
		if let Some(pending) = self.pending.take() {
			pending.cancel();
		}

		self.next_token = self.next_token.saturating_add(1);
		let token = self.next_token;
		self.latest = Some(token);

		let debounce = self.root.child_token();
		self.pending = Some(debounce.clone());
		let root = self.root.clone();
		let provider = Arc::clone(&self.provider);
		let tx = self.tx.clone();

		trace!(token, ?delay, "scheduling provider request");
		self.handle.spawn(async move {
			tokio::select! {
				_ = debounce.cancelled() => return,
				_ = tokio::time::sleep(delay) => {}
			}

			if tx.send(ProviderUpdate::Started { token }).is_err() {
				return;
			}

			let result = tokio::select! {
				_ = root.cancelled() => return,
				result = provider.provide(query) => result,
			};
			let _ = tx.send(ProviderUpdate::Resolved { token, result });
		});

		token
	}
}

impl<T> ProviderRuntime<T> {
	/// Whether `token` belongs to the most recently issued request.
	#[must_use]
	pub fn matches_latest(&self, token: u64) -> bool {
		self.latest == Some(token)
	}

	/// Token of the most recently issued request, if the runtime is live.
	#[must_use]
	pub fn latest(&self) -> Option<u64> {
		self.latest
	}

	/// Take the next delivered update without waiting.
	pub fn try_recv(&mut self) -> Result<ProviderUpdate<T>, TryRecvError> {
		self.rx.try_recv()
	}

	/// Cancel the pending debounce timer and any in-flight provider call, and
	/// drop updates that were already delivered.
	pub fn shutdown(&mut self) {
		self.root.cancel();
		self.pending = None;
		self.latest = None;
		self.rx.close();
		while self.rx.try_recv().is_ok() {}
	}

	#[must_use]
	pub fn is_shut_down(&self) -> bool {
		self.root.is_cancelled()
	}
}

impl<T> Drop for ProviderRuntime<T> {
	fn drop(&mut self) {
		self.root.cancel();
	}
}
