//! GetLanded core: pure search/pagination state machine and view-model helpers.
mod effect;
mod filter;
mod listing;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use filter::{distinct_categories, matches, CategoryFilter, FilterState};
pub use listing::{Listing, ListingKey, Query, SearchBatch, SearchFailure, TOP_JOBS_LOCATION};
pub use msg::Msg;
pub use state::{
    AnalysisState, AppState, Notice, Phase, RequestId, GENERIC_SEARCH_FAILURE, NO_RESULTS_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, ExportStatus, InspectorView, ListingCardView};
