//! Core of a keyboard-driven item picker.
//!
//! The crate is split along the pipeline a picker runs on every keystroke:
//! [`matcher`] scores one field against the query, [`ranker`] orders a whole
//! pool, [`highlight`] turns match indices into render segments and
//! [`selection`] tracks the active row and the picked set. A
//! [`PickerSession`] ties these together with an optional asynchronous
//! [`ItemProvider`] whose results are debounced and sequenced so that only
//! the latest request ever reaches the view.
//!
//! Rendering is left to the embedder; [`PickerSession::view`] returns a
//! snapshot with everything a renderer needs.

pub mod app_dirs;
pub mod error;
pub mod highlight;
pub mod item;
pub mod matcher;
pub mod options;
pub mod provider;
pub mod ranker;
pub mod selection;
pub mod session;

pub use error::PickerError;
pub use highlight::{Segment, segments};
pub use item::{Item, ItemId, ItemKind};
pub use matcher::{FieldMatch, match_text};
pub use options::PickerOptions;
pub use provider::{ItemProvider, ProviderFuture, ProviderRuntime, ProviderUpdate};
pub use ranker::{FilterOverride, RankOptions, RankedItem, rank};
pub use selection::{Movement, PAGE_SIZE, Selection};
pub use session::{
	PickerAction, PickerBuilder, PickerCommand, PickerEvent, PickerSession, PickerView, ViewRow,
};
