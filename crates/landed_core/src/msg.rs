use std::path::PathBuf;

use crate::{ListingKey, RequestId, SearchBatch, SearchFailure};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User submitted the search form. Starts a fresh search.
    SearchSubmitted { keyword: String, location: String },
    /// User asked for the "top jobs this week" preset.
    TopJobsRequested,
    /// User asked for the next page of the current query.
    LoadMoreClicked,
    /// Search provider answered a request issued by `Effect::Search`.
    SearchCompleted {
        request_id: RequestId,
        result: Result<SearchBatch, SearchFailure>,
    },
    /// User picked a category; "All" or an unknown label clears the filter.
    CategorySelected(String),
    /// User edited the minimum salary box.
    MinSalaryChanged(f64),
    /// User clicked Clear Filters.
    FiltersCleared,
    /// User opened a listing for detail and analysis.
    ListingOpened(ListingKey),
    /// User closed the detail view.
    ListingClosed,
    /// Insight client answered a request issued by `Effect::Analyze`.
    AnalysisCompleted {
        request_id: RequestId,
        key: ListingKey,
        text: String,
    },
    /// User clicked Export Dataset.
    ExportClicked,
    /// Export effect finished.
    ExportFinished(Result<PathBuf, String>),
    /// Fallback for placeholder wiring.
    NoOp,
}
