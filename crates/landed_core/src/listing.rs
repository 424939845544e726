/// Location used by the "top jobs this week" preset.
pub const TOP_JOBS_LOCATION: &str = "United Kingdom";

/// Canonical job posting, already stripped of markup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Listing {
    /// Opaque provider id. Not unique across pages.
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub url: String,
    /// ISO-8601 timestamp as reported by the provider.
    pub created: String,
    pub category: String,
}

/// Key minted by the controller for each loaded listing: provider id plus the
/// page it arrived on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListingKey {
    pub id: String,
    pub page: u32,
}

impl ListingKey {
    pub fn new(id: impl Into<String>, page: u32) -> Self {
        Self {
            id: id.into(),
            page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub keyword: String,
    pub location: String,
}

impl Query {
    pub fn new(keyword: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().trim().to_string(),
            location: location.into().trim().to_string(),
        }
    }

    /// Unconstrained keyword across the whole country.
    pub fn top_jobs() -> Self {
        Self::new("", TOP_JOBS_LOCATION)
    }
}

/// One page of results as returned by a search provider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchBatch {
    pub listings: Vec<Listing>,
    /// Total number of matches the provider reports for the query, if any.
    pub total_count: Option<u64>,
}

impl SearchBatch {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            total_count: None,
        }
    }
}

/// Failed search as seen by the core. `message` is the human readable text
/// supplied by the provider, when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFailure {
    pub message: Option<String>,
}

impl SearchFailure {
    pub fn with_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: (!message.trim().is_empty()).then_some(message),
        }
    }
}
