#![allow(dead_code)]

use std::sync::Once;

use landed_core::{update, AppState, Effect, Listing, Msg, RequestId, SearchBatch, SearchFailure};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub fn listing(id: &str, category: &str, salary_min: Option<f64>, salary_max: Option<f64>) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Job {id}"),
        company: "Acme Ltd".to_string(),
        location: "London".to_string(),
        description: format!("Description of {id}"),
        salary_min,
        salary_max,
        url: format!("https://www.adzuna.co.uk/jobs/details/{id}"),
        created: "2024-03-15T12:00:00Z".to_string(),
        category: category.to_string(),
    }
}

pub fn batch(ids: &[&str]) -> Vec<Listing> {
    ids.iter()
        .map(|id| listing(id, "IT Jobs", None, None))
        .collect()
}

/// Submits a search and returns the request id carried by the emitted effect.
pub fn submit(state: AppState, keyword: &str, location: &str) -> (AppState, RequestId) {
    let (state, effects) = update(
        state,
        Msg::SearchSubmitted {
            keyword: keyword.to_string(),
            location: location.to_string(),
        },
    );
    (state, search_request_id(&effects))
}

pub fn load_more(state: AppState) -> (AppState, Vec<Effect>) {
    update(state, Msg::LoadMoreClicked)
}

pub fn complete(state: AppState, request_id: RequestId, listings: Vec<Listing>) -> AppState {
    let (state, effects) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(SearchBatch::new(listings)),
        },
    );
    assert!(effects.is_empty());
    state
}

pub fn fail(state: AppState, request_id: RequestId, failure: SearchFailure) -> AppState {
    update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Err(failure),
        },
    )
    .0
}

pub fn search_request_id(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Search { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("search effect")
}

/// State with `listings` loaded as page 1 of a "rust" search.
pub fn loaded(listings: Vec<Listing>) -> AppState {
    let (state, request_id) = submit(AppState::new(), "rust", "London");
    complete(state, request_id, listings)
}
