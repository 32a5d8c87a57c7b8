use std::sync::Arc;

use super::{PickerSession, Source};
use crate::error::PickerError;
use crate::item::Item;
use crate::options::PickerOptions;
use crate::provider::{ItemProvider, ProviderRuntime};
use crate::ranker::{FilterOverride, RankOptions};

/// Configures and opens a [`PickerSession`].
///
/// A session is backed either by a fixed list of items or by an
/// [`ItemProvider`] that is queried as the user types.
pub struct PickerBuilder<T> {
	options: PickerOptions,
	filter_override: Option<FilterOverride<T>>,
}

impl<T> Default for PickerBuilder<T> {
	fn default() -> Self {
		Self {
			options: PickerOptions::default(),
			filter_override: None,
		}
	}
}

impl<T: Send + 'static> PickerBuilder<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_options(mut self, options: PickerOptions) -> Self {
		self.options = options;
		self
	}

	/// Replace field matching with a caller predicate. Accepted items score
	/// a flat `1` and carry no match indices.
	pub fn with_filter_override(
		mut self,
		filter: impl Fn(&Item<T>, &str) -> bool + Send + Sync + 'static,
	) -> Self {
		self.filter_override = Some(Arc::new(filter));
		self
	}

	/// Open a session over a fixed pool.
	pub fn build_static(self, items: Vec<Item<T>>) -> PickerSession<T> {
		let rank_options = self.rank_options();
		let mut session = PickerSession::new(self.options, rank_options, Source::Static);
		session.replace_pool(items);
		session.notify_active(&mut Vec::new());
		session
	}

	/// Open a session whose pool comes from `provider`.
	///
	/// The opening request for the initial query is issued immediately; later
	/// queries are debounced by [`PickerOptions::debounce_ms`]. Must be called
	/// from within a tokio runtime.
	pub fn build_dynamic(
		self,
		provider: impl ItemProvider<T>,
	) -> Result<PickerSession<T>, PickerError> {
		let mut runtime = ProviderRuntime::new(Arc::new(provider), self.options.debounce())?;
		runtime.issue_now(self.options.initial_query.clone());

		let rank_options = self.rank_options();
		let mut session = PickerSession::new(self.options, rank_options, Source::Dynamic(runtime));
		session.refresh();
		Ok(session)
	}

	fn rank_options(&self) -> RankOptions<T> {
		RankOptions {
			match_on_description: self.options.match_on_description,
			match_on_detail: self.options.match_on_detail,
			sort_by_label: self.options.sort_by_label,
			filter_override: self.filter_override.clone(),
		}
	}
}
