//! Drive one non-interactive picker run: read candidates, open a session,
//! replay scripted commands and capture the result.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::Arc;

use anyhow::{Context, Result};
use quickpick::{
	Item, PickerAction, PickerBuilder, PickerCommand, PickerEvent, PickerSession, Segment,
};
use tracing::debug;

use crate::settings::ResolvedConfig;

/// Line prefix that marks a separator row.
const SEPARATOR_MARKER: &str = "---";

/// Candidate payload: the 1-based input line the item came from.
pub(crate) type LineNumber = usize;

/// How the scripted run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PickStatus {
	/// Keys ran out with the session still open.
	Open,
	Accepted,
	Cancelled,
	Back,
}

impl PickStatus {
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			PickStatus::Open => "open",
			PickStatus::Accepted => "accepted",
			PickStatus::Cancelled => "cancelled",
			PickStatus::Back => "back",
		}
	}
}

/// Owned copy of one ranked row.
#[derive(Clone, Debug)]
pub(crate) struct RowSnapshot {
	pub(crate) line: LineNumber,
	pub(crate) score: f64,
	pub(crate) separator: bool,
	pub(crate) active: bool,
	pub(crate) picked: bool,
	pub(crate) label: Vec<Segment>,
	pub(crate) description: Vec<Segment>,
}

/// Result of a scripted run, ready for printing.
#[derive(Clone, Debug)]
pub(crate) struct PickOutcome {
	pub(crate) status: PickStatus,
	pub(crate) query: String,
	pub(crate) rows: Vec<RowSnapshot>,
	pub(crate) selected: Vec<Arc<Item<LineNumber>>>,
	pub(crate) message: Option<String>,
}

/// Coordinates reading input and running the session.
pub(crate) struct PickWorkflow {
	config: ResolvedConfig,
}

impl PickWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Self {
		Self { config }
	}

	pub(crate) fn run(self) -> Result<PickOutcome> {
		let items = match &self.config.input {
			Some(path) => {
				let file = File::open(path)
					.with_context(|| format!("failed to open input {}", path.display()))?;
				read_items(BufReader::new(file))?
			}
			None => read_items(io::stdin().lock())?,
		};
		debug!(count = items.len(), "read candidates");

		let session = PickerBuilder::new()
			.with_options(self.config.options)
			.build_static(items);
		Ok(replay(session, &self.config.keys))
	}
}

/// Parse `label<TAB>description<TAB>detail` lines. Blank lines are skipped;
/// `---` or `--- title` lines become separators.
pub(crate) fn read_items(reader: impl BufRead) -> Result<Vec<Item<LineNumber>>> {
	let mut items = Vec::new();
	for (index, line) in reader.lines().enumerate() {
		let line = line.with_context(|| format!("failed to read input line {}", index + 1))?;
		let line_number = index + 1;
		if line.trim().is_empty() {
			continue;
		}

		if line == SEPARATOR_MARKER {
			items.push(Item::separator("", line_number));
			continue;
		}
		if let Some(title) = line.strip_prefix("--- ") {
			items.push(Item::separator(title.trim(), line_number));
			continue;
		}

		let mut fields = line.split('\t');
		let label = fields.next().unwrap_or_default();
		let mut item = Item::new(label, line_number);
		if let Some(description) = fields.next().filter(|text| !text.is_empty()) {
			item = item.with_description(description);
		}
		if let Some(detail) = fields.next().filter(|text| !text.is_empty()) {
			item = item.with_detail(detail);
		}
		items.push(item);
	}
	Ok(items)
}

/// Feed `keys` into the session until it stops accepting input.
pub(crate) fn replay(
	mut session: PickerSession<LineNumber>,
	keys: &[PickerCommand],
) -> PickOutcome {
	let mut status = PickStatus::Open;
	let mut selected = Vec::new();

	'keys: for &key in keys {
		for event in session.dispatch(PickerAction::from(key)) {
			debug!(command = %key, ?event, "picker event");
			match event {
				PickerEvent::Selected(item) => {
					status = PickStatus::Accepted;
					selected.push(item);
				}
				PickerEvent::SelectedMany(items) => {
					status = PickStatus::Accepted;
					selected = items;
				}
				PickerEvent::Closed => status = PickStatus::Cancelled,
				PickerEvent::Back => status = PickStatus::Back,
				_ => {}
			}
		}
		if status != PickStatus::Open {
			break 'keys;
		}
	}

	snapshot(&session, status, selected)
}

fn snapshot(
	session: &PickerSession<LineNumber>,
	status: PickStatus,
	selected: Vec<Arc<Item<LineNumber>>>,
) -> PickOutcome {
	let view = session.view();
	let rows = view
		.rows
		.into_iter()
		.map(|row| RowSnapshot {
			line: row.item.payload,
			score: row.ranked.score,
			separator: row.ranked.separator,
			active: row.is_active,
			picked: row.is_picked,
			label: row.label,
			description: row.description,
		})
		.collect();

	PickOutcome {
		status,
		query: view.query.to_string(),
		rows,
		selected,
		message: view.message.map(str::to_string),
	}
}
