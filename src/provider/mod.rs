//! Asynchronous item providers and the debounced runtime that drives them.
//!
//! A provider is any async source of items for a query. The
//! [`ProviderRuntime`] owns the debounce timer and the request sequencing;
//! results travel back to the session owner as [`ProviderUpdate`] messages
//! and are applied only when their request token is still the latest one.

use std::future::Future;
use std::pin::Pin;

use crate::item::Item;

mod runtime;

pub use runtime::ProviderRuntime;

/// Boxed future returned by [`ItemProvider::provide`].
pub type ProviderFuture<T> = Pin<Box<dyn Future<Output = anyhow::Result<Vec<Item<T>>>> + Send>>;

/// Source of items for a query.
pub trait ItemProvider<T>: Send + Sync + 'static {
	/// Fetch the items for `query`.
	fn provide(&self, query: String) -> ProviderFuture<T>;
}

impl<T, F, Fut> ItemProvider<T> for F
where
	F: Fn(String) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = anyhow::Result<Vec<Item<T>>>> + Send + 'static,
{
	fn provide(&self, query: String) -> ProviderFuture<T> {
		Box::pin(self(query))
	}
}

/// Progress report for one provider request.
#[derive(Debug)]
pub enum ProviderUpdate<T> {
	/// The debounce timer fired and the provider was called.
	Started { token: u64 },
	/// The provider call finished.
	Resolved {
		token: u64,
		result: anyhow::Result<Vec<Item<T>>>,
	},
}

impl<T> ProviderUpdate<T> {
	#[must_use]
	pub fn token(&self) -> u64 {
		match self {
			Self::Started { token } | Self::Resolved { token, .. } => *token,
		}
	}
}
