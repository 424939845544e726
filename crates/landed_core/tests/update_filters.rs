mod common;

use common::*;
use landed_core::{update, CategoryFilter, FilterState, Msg, Phase};
use pretty_assertions::assert_eq;

fn mixed_listings() -> Vec<landed_core::Listing> {
    vec![
        listing("1", "IT Jobs", Some(40_000.0), None),
        listing("2", "Teaching Jobs", None, Some(30_000.0)),
        listing("3", "IT Jobs", Some(25_000.0), Some(50_000.0)),
        listing("4", "Healthcare & Nursing Jobs", None, None),
    ]
}

fn ids(listings: Vec<&landed_core::Listing>) -> Vec<String> {
    listings.into_iter().map(|l| l.id.clone()).collect()
}

#[test]
fn unfiltered_view_returns_every_listing_in_order() {
    init_logging();
    let state = loaded(mixed_listings());

    let view = state.filtered_view(&FilterState::default());
    assert_eq!(ids(view), vec!["1", "2", "3", "4"]);
    assert_eq!(state.filtered_listings().len(), 4);
}

#[test]
fn salary_filter_uses_either_end_of_range() {
    init_logging();
    let state = loaded(mixed_listings());

    let (state, _) = update(state, Msg::MinSalaryChanged(35_000.0));
    assert_eq!(ids(state.filtered_listings()), vec!["1", "3"]);

    let (state, _) = update(state, Msg::MinSalaryChanged(45_000.0));
    assert_eq!(ids(state.filtered_listings()), vec!["3"]);
}

#[test]
fn negative_or_nan_salary_disables_the_filter() {
    init_logging();
    let state = loaded(mixed_listings());

    let (state, _) = update(state, Msg::MinSalaryChanged(-5.0));
    assert_eq!(state.filters().min_salary, 0.0);
    let (state, _) = update(state, Msg::MinSalaryChanged(f64::NAN));
    assert_eq!(state.filters().min_salary, 0.0);
    assert_eq!(state.filtered_listings().len(), 4);
}

#[test]
fn categories_are_derived_from_loaded_listings() {
    init_logging();
    let state = loaded(mixed_listings());

    assert_eq!(
        state.view().categories,
        vec![
            "All",
            "Healthcare & Nursing Jobs",
            "IT Jobs",
            "Teaching Jobs"
        ]
    );

    let (state, effects) = load_more(state);
    let state = complete(
        state,
        search_request_id(&effects),
        vec![listing("5", "Admin Jobs", None, None)],
    );
    assert_eq!(state.categories()[1], CategoryFilter::Exact("Admin Jobs".to_string()));
}

#[test]
fn selecting_a_category_narrows_the_view() {
    init_logging();
    let state = loaded(mixed_listings());

    let (mut state, effects) = update(state, Msg::CategorySelected("IT Jobs".to_string()));
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert_eq!(ids(state.filtered_listings()), vec!["1", "3"]);
    assert_eq!(state.view().selected_category, "IT Jobs");

    let (state, _) = update(state, Msg::MinSalaryChanged(45_000.0));
    assert_eq!(ids(state.filtered_listings()), vec!["3"]);
}

#[test]
fn unknown_category_falls_back_to_all() {
    init_logging();
    let state = loaded(mixed_listings());

    let (state, _) = update(state, Msg::CategorySelected("IT Jobs".to_string()));
    let (state, _) = update(state, Msg::CategorySelected("Space Pirate Jobs".to_string()));
    assert_eq!(state.filters().category, CategoryFilter::All);

    let (state, _) = update(state, Msg::CategorySelected("All".to_string()));
    assert_eq!(state.filters().category, CategoryFilter::All);
}

#[test]
fn clearing_filters_leaves_listings_and_phase_alone() {
    init_logging();
    let state = loaded(mixed_listings());
    let (state, _) = update(state, Msg::CategorySelected("Teaching Jobs".to_string()));
    let (state, _) = update(state, Msg::MinSalaryChanged(10_000.0));
    let (state, _) = load_more(state);

    let (state, effects) = update(state, Msg::FiltersCleared);

    assert!(effects.is_empty());
    assert_eq!(state.filters(), &FilterState::default());
    assert_eq!(state.listing_count(), 4);
    assert_eq!(state.phase(), Phase::LoadingMore);
}

#[test]
fn new_search_resets_filters() {
    init_logging();
    let state = loaded(mixed_listings());
    let (state, _) = update(state, Msg::CategorySelected("IT Jobs".to_string()));
    let (state, _) = update(state, Msg::MinSalaryChanged(30_000.0));

    let (state, _) = submit(state, "nurse", "");

    assert_eq!(state.filters(), &FilterState::default());
    assert!(!state.view().filters_active);
}

#[test]
fn empty_filter_hint_shows_only_when_filters_hide_everything() {
    init_logging();
    let state = loaded(mixed_listings());
    assert!(!state.view().show_empty_filter_hint);

    let (state, _) = update(state, Msg::MinSalaryChanged(1_000_000.0));
    let view = state.view();
    assert!(view.listings.is_empty());
    assert!(view.show_empty_filter_hint);
    assert_eq!(view.loaded_count, 4);
}

#[test]
fn filtered_view_outlives_a_temporary_filter() {
    init_logging();
    let state = loaded(mixed_listings());

    let view = {
        let filters = FilterState {
            category: CategoryFilter::Exact("IT Jobs".to_string()),
            min_salary: 0.0,
        };
        state.filtered_view(&filters)
    };
    assert_eq!(ids(view), vec!["1", "3"]);
}

#[test]
fn selected_category_stays_valid_across_load_more() {
    init_logging();
    let state = loaded(mixed_listings());
    let (state, _) = update(state, Msg::CategorySelected("Teaching Jobs".to_string()));

    let (state, effects) = load_more(state);
    let state = complete(
        state,
        search_request_id(&effects),
        vec![listing("5", "IT Jobs", None, None)],
    );
    assert_eq!(
        state.filters().category,
        CategoryFilter::Exact("Teaching Jobs".to_string())
    );
    assert!(state.categories().contains(&state.filters().category));

    let (state, effects) = load_more(state);
    let state = fail(
        state,
        search_request_id(&effects),
        landed_core::SearchFailure::default(),
    );
    assert_eq!(
        state.filters().category,
        CategoryFilter::Exact("Teaching Jobs".to_string())
    );
    assert_eq!(ids(state.filtered_listings()), vec!["2"]);
}
