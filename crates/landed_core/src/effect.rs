use crate::{Listing, ListingKey, Query, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch `page` of `query`. The answer must come back as
    /// `Msg::SearchCompleted` carrying the same `request_id`.
    Search {
        request_id: RequestId,
        query: Query,
        page: u32,
    },
    /// Ask the insight client about one listing.
    Analyze {
        request_id: RequestId,
        key: ListingKey,
        title: String,
        description: String,
    },
    /// Write the given listings as CSV.
    ExportCsv { listings: Vec<Listing> },
}
