use std::time::Duration;

use tokio::time::sleep;

use super::*;
use crate::error::PickerError;
use crate::options::PickerOptions;
use crate::selection::Movement;

fn labels(session: &PickerSession<()>) -> Vec<&str> {
	session
		.ranked()
		.iter()
		.map(|entry| session.pool()[entry.index].label.as_str())
		.collect()
}

fn active_label(session: &PickerSession<()>) -> Option<&str> {
	session.active_item().map(|item| item.label.as_str())
}

fn commands() -> Vec<Item<()>> {
	vec![
		Item::labeled("Open File"),
		Item::labeled("Open Folder"),
		Item::labeled("Close Window"),
	]
}

fn multi_select() -> PickerBuilder<()> {
	PickerBuilder::new().with_options(PickerOptions {
		can_select_many: true,
		..PickerOptions::default()
	})
}

fn navigate(session: &mut PickerSession<()>, movement: Movement) -> Vec<PickerEvent<()>> {
	session.dispatch(PickerAction::Navigate(movement))
}

#[test]
fn query_filters_the_static_pool() {
	let mut session = PickerBuilder::new().build_static(commands());
	let events = session.dispatch(PickerAction::SetQuery("of".into()));

	let mut found = labels(&session);
	found.sort_unstable();
	assert_eq!(found, vec!["Open File", "Open Folder"]);
	assert!(matches!(&events[0], PickerEvent::ValueChanged(query) if query == "of"));
}

#[test]
fn opens_with_first_selectable_row_active() {
	let session = PickerBuilder::new().build_static(vec![
		Item::separator("Recent", ()),
		Item::labeled("Open File"),
	]);
	assert_eq!(session.active_index(), Some(0));
	assert_eq!(active_label(&session), Some("Open File"));
}

#[test]
fn initial_query_is_applied_on_open() {
	let session = PickerBuilder::new()
		.with_options(PickerOptions {
			initial_query: "close".into(),
			..PickerOptions::default()
		})
		.build_static(commands());
	assert_eq!(session.query(), "close");
	assert_eq!(labels(&session), vec!["Close Window"]);
}

#[test]
fn active_index_clamps_when_view_shrinks() {
	let mut session = PickerBuilder::new().build_static(vec![
		Item::labeled("alpha"),
		Item::labeled("alps"),
		Item::labeled("alto"),
		Item::labeled("beta"),
	]);
	navigate(&mut session, Movement::Last);
	assert_eq!(session.active_index(), Some(3));

	session.dispatch(PickerAction::SetQuery("al".into()));
	assert_eq!(session.selectable_len(), 3);
	assert_eq!(session.active_index(), Some(2));

	session.dispatch(PickerAction::SetQuery("zzz".into()));
	assert_eq!(session.active_index(), None);
	assert!(session.active_item().is_none());
}

#[test]
fn navigation_skips_separators() {
	let mut session = PickerBuilder::new().build_static(vec![
		Item::labeled("a"),
		Item::separator("More", ()),
		Item::labeled("b"),
	]);
	assert_eq!(session.selectable_len(), 2);
	navigate(&mut session, Movement::Next);
	assert_eq!(active_label(&session), Some("b"));
	assert_eq!(session.active_index(), Some(1));
}

#[test]
fn active_item_change_fires_only_on_change() {
	let mut session = PickerBuilder::new().build_static(commands());

	let events = navigate(&mut session, Movement::Next);
	assert!(matches!(
		&events[..],
		[PickerEvent::ActiveItemChanged(Some(item))] if item.label == "Open Folder"
	));

	navigate(&mut session, Movement::Last);
	assert!(navigate(&mut session, Movement::Next).is_empty());
}

#[test]
fn query_change_reports_new_active_item() {
	let mut session = PickerBuilder::new().build_static(commands());
	let events = session.dispatch(PickerAction::SetQuery("cw".into()));
	assert!(matches!(
		&events[..],
		[PickerEvent::ValueChanged(_), PickerEvent::ActiveItemChanged(Some(item))]
			if item.label == "Close Window"
	));

	let events = session.dispatch(PickerAction::SetQuery("zzz".into()));
	assert!(matches!(
		&events[..],
		[PickerEvent::ValueChanged(_), PickerEvent::ActiveItemChanged(None)]
	));
}

#[test]
fn unchanged_query_emits_nothing() {
	let mut session = PickerBuilder::new().build_static(commands());
	session.dispatch(PickerAction::SetQuery("of".into()));
	assert!(session.dispatch(PickerAction::SetQuery("of".into())).is_empty());
}

#[test]
fn single_select_commit_emits_active_item_and_closes() {
	let mut session = PickerBuilder::new().build_static(commands());
	navigate(&mut session, Movement::Next);

	let events = session.dispatch(PickerAction::Commit);
	assert!(matches!(&events[..], [PickerEvent::Selected(item)] if item.label == "Open Folder"));
	assert!(session.is_closed());
	assert!(navigate(&mut session, Movement::Next).is_empty());
}

#[test]
fn single_select_commit_without_active_item_is_ignored() {
	let mut session = PickerBuilder::new().build_static(commands());
	session.dispatch(PickerAction::SetQuery("zzz".into()));
	assert!(session.dispatch(PickerAction::Commit).is_empty());
	assert!(!session.is_closed());
}

#[test]
fn toggle_adds_and_removes_active_item() {
	let mut session = multi_select().build_static(commands());
	let first = session.active_item().cloned().expect("active item");

	session.dispatch(PickerAction::ToggleActive);
	assert!(session.is_picked(first.id()));
	assert_eq!(session.picked().count(), 1);

	session.dispatch(PickerAction::ToggleActive);
	assert!(!session.is_picked(first.id()));
	assert_eq!(session.picked().count(), 0);
}

#[test]
fn toggle_in_single_select_is_ignored() {
	let mut session = PickerBuilder::new().build_static(commands());
	assert!(session.dispatch(PickerAction::ToggleActive).is_empty());
	assert_eq!(session.picked().count(), 0);
}

#[test]
fn picked_items_survive_refiltering() {
	let mut session = multi_select().build_static(commands());
	session.dispatch(PickerAction::ToggleActive);
	session.dispatch(PickerAction::SetQuery("close".into()));
	session.dispatch(PickerAction::ToggleActive);

	let events = session.dispatch(PickerAction::Commit);
	match &events[..] {
		[PickerEvent::SelectedMany(items)] => {
			let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
			assert_eq!(labels, vec!["Open File", "Close Window"]);
		}
		other => panic!("unexpected events {other:?}"),
	}
	assert!(session.is_closed());
}

#[test]
fn items_flagged_picked_start_in_the_picked_set() {
	let mut session = multi_select().build_static(vec![
		Item::labeled("a").with_picked(true),
		Item::labeled("b"),
		Item::separator("sep", ()).with_picked(true),
	]);
	assert_eq!(session.picked().count(), 1);

	let events = session.dispatch(PickerAction::Commit);
	assert!(matches!(&events[..], [PickerEvent::SelectedMany(items)] if items.len() == 1));
}

#[test]
fn cancel_closes_without_selection() {
	let mut session = PickerBuilder::new().build_static(commands());
	let events = session.dispatch(PickerAction::Cancel);
	assert!(matches!(&events[..], [PickerEvent::Closed]));
	assert!(session.is_closed());
}

#[test]
fn wizard_cancel_goes_back_instead_of_closing() {
	let mut session = PickerBuilder::new()
		.with_options(PickerOptions {
			is_wizard_step: true,
			can_go_back: true,
			..PickerOptions::default()
		})
		.build_static(commands());

	let events = session.dispatch(PickerAction::Cancel);
	assert!(matches!(&events[..], [PickerEvent::Back]));
	assert!(!events.iter().any(|event| matches!(event, PickerEvent::Closed)));
	assert!(!session.is_closed());
}

#[test]
fn back_outside_wizard_is_ignored() {
	let mut session = PickerBuilder::new()
		.with_options(PickerOptions {
			is_wizard_step: true,
			..PickerOptions::default()
		})
		.build_static(commands());
	assert!(session.dispatch(PickerAction::Back).is_empty());

	let events = session.dispatch(PickerAction::Cancel);
	assert!(matches!(&events[..], [PickerEvent::Closed]));
}

#[test]
fn item_buttons_pass_through() {
	let mut session = PickerBuilder::new().build_static(vec![
		Item::labeled("Open File").with_button("remove"),
	]);

	let events = session.dispatch(PickerAction::TriggerItemButton {
		position: 0,
		button: "remove".into(),
	});
	assert!(matches!(
		&events[..],
		[PickerEvent::ItemButtonClicked { item, button }]
			if item.label == "Open File" && button == "remove"
	));

	let events = session.dispatch(PickerAction::TriggerItemButton {
		position: 0,
		button: "pin".into(),
	});
	assert!(events.is_empty());
	assert!(!session.is_closed());
}

#[test]
fn filter_override_drives_membership() {
	let mut session = PickerBuilder::new()
		.with_filter_override(|item: &Item<()>, query: &str| item.label.starts_with(query))
		.build_static(commands());
	session.dispatch(PickerAction::SetQuery("Close".into()));
	assert_eq!(labels(&session), vec!["Close Window"]);
	assert_eq!(session.ranked()[0].score, 1.0);
}

#[test]
fn view_exposes_segments_and_empty_message() {
	let mut session = multi_select()
		.with_options(PickerOptions {
			can_select_many: true,
			no_results_message: Some("Nothing here".into()),
			title: Some("Commands".into()),
			..PickerOptions::default()
		})
		.build_static(commands());
	session.dispatch(PickerAction::SetQuery("cw".into()));
	session.dispatch(PickerAction::ToggleActive);

	let view = session.view();
	assert_eq!(view.title, Some("Commands"));
	assert_eq!(view.rows.len(), 1);
	let row = &view.rows[0];
	assert!(row.is_active);
	assert!(row.is_picked);
	let matched: Vec<&str> = row
		.label
		.iter()
		.filter(|segment| segment.matched)
		.map(|segment| segment.text.as_str())
		.collect();
	assert_eq!(matched, vec!["C", "W"]);
	assert!(view.message.is_none());

	session.dispatch(PickerAction::SetQuery("zzz".into()));
	let view = session.view();
	assert!(view.rows.is_empty());
	assert_eq!(view.picked.len(), 1);
	assert_eq!(view.message, Some("Nothing here"));
}

#[test]
fn dynamic_session_requires_runtime() {
	let result = PickerBuilder::<()>::new().build_dynamic(|query: String| async move {
		Ok::<_, anyhow::Error>(vec![Item::labeled(query)])
	});
	assert!(matches!(result, Err(PickerError::NoRuntime(_))));
}

fn delayed_provider(
	query: String,
) -> impl std::future::Future<Output = anyhow::Result<Vec<Item<()>>>> + Send {
	async move {
		let delay = match query.as_str() {
			"a" => 500,
			"boom" => return Err(anyhow::anyhow!("backend unavailable")),
			_ => 10,
		};
		sleep(Duration::from_millis(delay)).await;
		Ok(vec![Item::labeled(format!("{query}-result"))])
	}
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn opening_request_populates_the_pool() {
	let mut session = PickerBuilder::new()
		.build_dynamic(delayed_provider)
		.expect("session");
	assert!(session.pool().is_empty());
	assert_eq!(session.view().message, Some(crate::options::DEFAULT_NO_RESULTS_MESSAGE));

	sleep(Duration::from_millis(50)).await;
	let events = session.pump();

	assert_eq!(labels(&session), vec!["-result"]);
	assert!(!session.is_busy());
	assert!(matches!(&events[..], [PickerEvent::ActiveItemChanged(Some(_))]));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn late_stale_result_never_replaces_newer_pool() {
	let mut session = PickerBuilder::new()
		.build_dynamic(delayed_provider)
		.expect("session");
	sleep(Duration::from_millis(50)).await;
	session.pump();

	// "a" starts at t=200 and resolves at t=700.
	session.dispatch(PickerAction::SetQuery("a".into()));
	sleep(Duration::from_millis(200)).await;
	session.pump();
	assert!(session.is_busy());

	// "ab" starts at t=400 and resolves at t=410, before "a".
	session.dispatch(PickerAction::SetQuery("ab".into()));
	sleep(Duration::from_millis(200)).await;
	session.pump();
	assert_eq!(labels(&session), vec!["ab-result"]);
	assert!(!session.is_busy());

	sleep(Duration::from_millis(400)).await;
	assert!(session.pump().is_empty());
	assert_eq!(labels(&session), vec!["ab-result"]);
	assert_eq!(session.pool().len(), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn busy_flag_tracks_the_latest_request() {
	let mut session = PickerBuilder::new()
		.build_dynamic(delayed_provider)
		.expect("session");
	sleep(Duration::from_millis(50)).await;
	session.pump();

	session.dispatch(PickerAction::SetQuery("b".into()));
	sleep(Duration::from_millis(100)).await;
	session.pump();
	assert!(!session.is_busy(), "debounce has not elapsed yet");

	sleep(Duration::from_millis(55)).await;
	session.pump();
	assert!(session.is_busy());
	assert!(session.view().message.is_none());

	sleep(Duration::from_millis(20)).await;
	session.pump();
	assert!(!session.is_busy());
	assert_eq!(labels(&session), vec!["b-result"]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn provider_failure_clears_pool() {
	let mut session = PickerBuilder::new()
		.build_dynamic(delayed_provider)
		.expect("session");
	sleep(Duration::from_millis(50)).await;
	session.pump();
	assert_eq!(session.pool().len(), 1);

	session.dispatch(PickerAction::SetQuery("boom".into()));
	sleep(Duration::from_millis(200)).await;
	let events = session.pump();

	assert!(session.pool().is_empty());
	assert!(!session.is_busy());
	assert!(!session.is_closed());
	assert!(events.is_empty(), "active item was already cleared by the query");
	assert!(session.view().message.is_some());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn closing_discards_in_flight_results() {
	let mut session = PickerBuilder::new()
		.build_dynamic(delayed_provider)
		.expect("session");
	sleep(Duration::from_millis(50)).await;
	session.pump();

	session.dispatch(PickerAction::SetQuery("a".into()));
	sleep(Duration::from_millis(200)).await;
	let events = session.dispatch(PickerAction::Close);
	assert!(matches!(&events[..], [PickerEvent::Closed]));

	sleep(Duration::from_millis(1_000)).await;
	assert!(session.pump().is_empty());
	assert_eq!(labels(&session), Vec::<&str>::new());
	assert_eq!(session.pool().len(), 1);
	assert!(!session.is_busy());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn picked_items_survive_pool_replacement() {
	let mut session = multi_select()
		.build_dynamic(delayed_provider)
		.expect("session");
	sleep(Duration::from_millis(50)).await;
	session.pump();
	session.dispatch(PickerAction::ToggleActive);

	session.dispatch(PickerAction::SetQuery("x".into()));
	sleep(Duration::from_millis(200)).await;
	session.pump();
	assert_eq!(labels(&session), vec!["x-result"]);
	session.dispatch(PickerAction::ToggleActive);

	let events = session.dispatch(PickerAction::Commit);
	match &events[..] {
		[PickerEvent::SelectedMany(items)] => {
			let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
			assert_eq!(labels, vec!["-result", "x-result"]);
		}
		other => panic!("unexpected events {other:?}"),
	}
}
