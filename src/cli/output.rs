use anyhow::Result;
use quickpick::Segment;
use serde_json::json;
use unicode_width::UnicodeWidthStr;

use crate::workflow::{PickOutcome, PickStatus, RowSnapshot};

const MATCH_OPEN: char = '[';
const MATCH_CLOSE: char = ']';

/// Render segments with matched runs wrapped in brackets.
pub(crate) fn render_segments(segments: &[Segment]) -> String {
	let mut rendered = String::new();
	for segment in segments {
		if segment.matched {
			rendered.push(MATCH_OPEN);
			rendered.push_str(&segment.text);
			rendered.push(MATCH_CLOSE);
		} else {
			rendered.push_str(&segment.text);
		}
	}
	rendered
}

/// Format ranked rows as aligned text lines.
pub(crate) fn format_rows(rows: &[RowSnapshot]) -> Vec<String> {
	let labels: Vec<String> = rows.iter().map(|row| render_segments(&row.label)).collect();
	let width = rows
		.iter()
		.zip(&labels)
		.filter(|(row, _)| !row.separator)
		.map(|(_, label)| label.width())
		.max()
		.unwrap_or(0);

	rows.iter()
		.zip(labels)
		.map(|(row, label)| {
			if row.separator {
				return format!("--- {label}").trim_end().to_string();
			}
			let cursor = if row.active { '>' } else { ' ' };
			let mark = if row.picked { '*' } else { ' ' };
			let description = render_segments(&row.description);
			if description.is_empty() {
				return format!("{cursor}{mark} {label}");
			}
			let padding = " ".repeat(width - label.width());
			format!("{cursor}{mark} {label}{padding}  {description}")
		})
		.collect()
}

/// Print a plain-text representation of the picker outcome.
pub(crate) fn print_plain(outcome: &PickOutcome) {
	match outcome.status {
		PickStatus::Accepted => {
			for item in &outcome.selected {
				println!("{}", item.label);
			}
		}
		PickStatus::Cancelled => println!("Picker cancelled (query: '{}')", outcome.query),
		PickStatus::Back => println!("Back (query: '{}')", outcome.query),
		PickStatus::Open => {
			for line in format_rows(&outcome.rows) {
				println!("{line}");
			}
			if let Some(message) = &outcome.message {
				println!("{message}");
			}
		}
	}
}

/// Format the picker outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &PickOutcome) -> Result<String> {
	let rows: Vec<_> = outcome
		.rows
		.iter()
		.map(|row| {
			json!({
				"line": row.line,
				"score": row.score,
				"separator": row.separator,
				"active": row.active,
				"picked": row.picked,
				"label": row.label,
				"description": row.description,
			})
		})
		.collect();
	let selected: Vec<_> = outcome
		.selected
		.iter()
		.map(|item| {
			json!({
				"line": item.payload,
				"label": item.label,
				"description": item.description,
				"detail": item.detail,
			})
		})
		.collect();

	let payload = json!({
		"status": outcome.status.as_str(),
		"query": outcome.query,
		"rows": rows,
		"selected": selected,
		"message": outcome.message,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the picker outcome.
pub(crate) fn print_json(outcome: &PickOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}
