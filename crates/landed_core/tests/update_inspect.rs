mod common;

use std::path::PathBuf;

use common::*;
use landed_core::{update, AnalysisState, Effect, ExportStatus, ListingKey, Msg};
use pretty_assertions::assert_eq;

fn open(state: landed_core::AppState, key: ListingKey) -> (landed_core::AppState, u64) {
    let (state, effects) = update(state, Msg::ListingOpened(key));
    let request_id = match effects.as_slice() {
        [Effect::Analyze { request_id, .. }] => *request_id,
        other => panic!("expected one analyze effect, got {other:?}"),
    };
    (state, request_id)
}

#[test]
fn opening_a_listing_requests_analysis_of_its_text() {
    init_logging();
    let state = loaded(batch(&["a", "b"]));

    let (state, effects) = update(state, Msg::ListingOpened(ListingKey::new("b", 1)));

    assert_eq!(
        effects,
        vec![Effect::Analyze {
            request_id: 2,
            key: ListingKey::new("b", 1),
            title: "Job b".to_string(),
            description: "Description of b".to_string(),
        }]
    );
    let view = state.view();
    let inspector = view.inspector.expect("inspector open");
    assert_eq!(inspector.title, "Job b");
    assert_eq!(inspector.analysis, None);
}

#[test]
fn completed_analysis_is_shown_for_the_open_listing() {
    init_logging();
    let state = loaded(batch(&["a"]));
    let key = ListingKey::new("a", 1);
    let (state, request_id) = open(state, key.clone());

    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id,
            key: key.clone(),
            text: "Great role.".to_string(),
        },
    );

    assert_eq!(
        state.analysis(),
        Some((&key, &AnalysisState::Ready("Great role.".to_string())))
    );
    assert_eq!(
        state.view().inspector.unwrap().analysis.as_deref(),
        Some("Great role.")
    );
}

#[test]
fn analysis_for_a_previously_open_listing_is_discarded() {
    init_logging();
    let state = loaded(batch(&["a", "b"]));
    let (state, first) = open(state, ListingKey::new("a", 1));
    let (state, _second) = open(state, ListingKey::new("b", 1));

    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id: first,
            key: ListingKey::new("a", 1),
            text: "About a".to_string(),
        },
    );

    assert_eq!(
        state.analysis(),
        Some((&ListingKey::new("b", 1), &AnalysisState::Pending))
    );
}

#[test]
fn reopening_the_same_listing_ignores_the_earlier_request() {
    init_logging();
    let state = loaded(batch(&["a"]));
    let key = ListingKey::new("a", 1);
    let (state, first) = open(state, key.clone());
    let (state, _) = update(state, Msg::ListingClosed);
    let (state, _second) = open(state, key.clone());

    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id: first,
            key: key.clone(),
            text: "old".to_string(),
        },
    );
    assert_eq!(state.analysis(), Some((&key, &AnalysisState::Pending)));
}

#[test]
fn analysis_after_close_is_discarded() {
    init_logging();
    let state = loaded(batch(&["a"]));
    let key = ListingKey::new("a", 1);
    let (state, request_id) = open(state, key.clone());
    let (mut state, _) = update(state, Msg::ListingClosed);
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id,
            key,
            text: "late".to_string(),
        },
    );
    assert_eq!(state.analysis(), None);
    assert!(!state.consume_dirty());
}

#[test]
fn unknown_listing_key_is_ignored() {
    init_logging();
    let state = loaded(batch(&["a"]));
    let (state, effects) = update(state, Msg::ListingOpened(ListingKey::new("a", 2)));

    assert!(effects.is_empty());
    assert!(state.view().inspector.is_none());
}

#[test]
fn open_listing_survives_a_new_search() {
    init_logging();
    let state = loaded(batch(&["a"]));
    let key = ListingKey::new("a", 1);
    let (state, request_id) = open(state, key.clone());
    let (state, _) = submit(state, "nurse", "");

    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id,
            key: key.clone(),
            text: "still open".to_string(),
        },
    );
    assert_eq!(state.listing_count(), 0);
    assert_eq!(
        state.view().inspector.unwrap().analysis.as_deref(),
        Some("still open")
    );
}

#[test]
fn export_emits_only_the_filtered_listings() {
    init_logging();
    let state = loaded(vec![
        listing("1", "IT Jobs", Some(40_000.0), None),
        listing("2", "Teaching Jobs", None, None),
    ]);
    let (state, _) = update(state, Msg::CategorySelected("IT Jobs".to_string()));

    let (_state, effects) = update(state, Msg::ExportClicked);

    assert_eq!(
        effects,
        vec![Effect::ExportCsv {
            listings: vec![listing("1", "IT Jobs", Some(40_000.0), None)],
        }]
    );
}

#[test]
fn export_with_nothing_visible_emits_no_effect() {
    init_logging();
    let (_state, effects) = update(landed_core::AppState::new(), Msg::ExportClicked);
    assert!(effects.is_empty());

    let state = {
        let loaded = loaded(batch(&["a"]));
        update(loaded, Msg::MinSalaryChanged(99_000.0)).0
    };
    let (_state, effects) = update(state, Msg::ExportClicked);
    assert!(effects.is_empty());
}

#[test]
fn export_outcome_is_reported_in_view() {
    init_logging();
    let path = PathBuf::from("out/getlanded_jobs.csv");
    let (state, _) = update(
        landed_core::AppState::new(),
        Msg::ExportFinished(Ok(path.clone())),
    );
    assert_eq!(state.view().export, Some(ExportStatus::Written(path)));

    let (state, _) = update(state, Msg::ExportFinished(Err("disk full".to_string())));
    assert_eq!(
        state.view().export,
        Some(ExportStatus::Failed("disk full".to_string()))
    );
}
