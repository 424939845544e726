use std::path::PathBuf;

use engine_logging::{engine_debug, engine_info};

use crate::filter::{distinct_categories, matches, CategoryFilter, FilterState};
use crate::view_model::{salary_label, AppViewModel, ExportStatus, InspectorView, ListingCardView};
use crate::{Effect, Listing, ListingKey, Query, SearchBatch, SearchFailure};

/// Monotonic tag carried by every outbound request.
pub type RequestId = u64;

pub const NO_RESULTS_MESSAGE: &str =
    "We couldn't find any jobs matching that. Try broader keywords.";
pub const GENERIC_SEARCH_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    LoadingInitial,
    LoadingMore,
}

/// User-facing outcome of the last search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Provider answered, but a new search matched nothing.
    NoResults(String),
    /// Provider or transport failure.
    SearchFailed(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::NoResults(message) | Notice::SearchFailed(message) => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisState {
    Pending,
    Ready(String),
}

#[derive(Debug, Clone, PartialEq)]
struct LoadedListing {
    key: ListingKey,
    listing: Listing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    page: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct Inspection {
    key: ListingKey,
    listing: Listing,
    request_id: RequestId,
    analysis: AnalysisState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    listings: Vec<LoadedListing>,
    page: u32,
    phase: Phase,
    last_error: Option<Notice>,
    last_query: Option<Query>,
    in_flight: Option<InFlight>,
    next_request_id: RequestId,
    total_count: Option<u64>,
    has_searched: bool,
    filters: FilterState,
    inspection: Option<Inspection>,
    export_status: Option<ExportStatus>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            listings: Vec::new(),
            page: 1,
            phase: Phase::Idle,
            last_error: None,
            last_query: None,
            in_flight: None,
            next_request_id: 0,
            total_count: None,
            has_searched: false,
            filters: FilterState::default(),
            inspection: None,
            export_status: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let listings = self
            .filtered_entries(&self.filters)
            .into_iter()
            .map(|entry| ListingCardView::from_listing(entry.key.clone(), &entry.listing))
            .collect::<Vec<_>>();
        let show_empty_filter_hint = self.has_searched
            && self.phase != Phase::LoadingInitial
            && listings.is_empty()
            && self.last_error.is_none();

        AppViewModel {
            phase: self.phase,
            page: self.page,
            query: self.last_query.clone(),
            loaded_count: self.listings.len(),
            total_available: self.total_count,
            listings,
            categories: self
                .categories()
                .iter()
                .map(|category| category.label().to_string())
                .collect(),
            selected_category: self.filters.category.label().to_string(),
            min_salary: self.filters.min_salary,
            filters_active: self.filters.is_active(),
            notice: self.last_error.clone(),
            can_load_more: self.can_load_more(),
            show_empty_filter_hint,
            inspector: self.inspection.as_ref().map(|inspection| InspectorView {
                key: inspection.key.clone(),
                title: inspection.listing.title.clone(),
                company: inspection.listing.company.clone(),
                location: inspection.listing.location.clone(),
                category: inspection.listing.category.clone(),
                salary: salary_label(inspection.listing.salary_min, inspection.listing.salary_max),
                description: inspection.listing.description.clone(),
                url: inspection.listing.url.clone(),
                analysis: match &inspection.analysis {
                    AnalysisState::Pending => None,
                    AnalysisState::Ready(text) => Some(text.clone()),
                },
            }),
            export: self.export_status.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn listings(&self) -> impl Iterator<Item = &Listing> {
        self.listings.iter().map(|entry| &entry.listing)
    }

    pub fn listing_count(&self) -> usize {
        self.listings.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ListingKey> {
        self.listings.iter().map(|entry| &entry.key)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&Notice> {
        self.last_error.as_ref()
    }

    pub fn last_query(&self) -> Option<&Query> {
        self.last_query.as_ref()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn analysis(&self) -> Option<(&ListingKey, &AnalysisState)> {
        self.inspection
            .as_ref()
            .map(|inspection| (&inspection.key, &inspection.analysis))
    }

    pub fn can_load_more(&self) -> bool {
        self.phase == Phase::Idle && !self.listings.is_empty()
    }

    /// Category options for the loaded listings, recomputed on every call.
    pub fn categories(&self) -> Vec<CategoryFilter> {
        distinct_categories(self.listings())
    }

    /// Listings that pass the current filters, in load order.
    pub fn filtered_listings(&self) -> Vec<&Listing> {
        self.filtered_view(&self.filters)
    }

    /// Listings that pass `filters`, in load order.
    pub fn filtered_view(&self, filters: &FilterState) -> Vec<&Listing> {
        self.filtered_entries(filters)
            .into_iter()
            .map(|entry| &entry.listing)
            .collect()
    }

    fn filtered_entries(&self, filters: &FilterState) -> Vec<&LoadedListing> {
        self.listings
            .iter()
            .filter(|entry| matches(&entry.listing, filters))
            .collect()
    }

    pub(crate) fn begin_new_search(&mut self, query: Query) -> Effect {
        let request_id = self.mint_request_id();
        if let Some(stale) = self.in_flight.replace(InFlight {
            request_id,
            page: 1,
        }) {
            engine_debug!(
                "Search {} supersedes in-flight request {}",
                request_id,
                stale.request_id
            );
        }
        engine_info!(
            "New search {} keyword_len={} location={:?}",
            request_id,
            query.keyword.len(),
            query.location
        );

        self.listings.clear();
        self.page = 1;
        self.total_count = None;
        self.phase = Phase::LoadingInitial;
        self.last_error = None;
        self.has_searched = true;
        self.filters = FilterState::default();
        self.last_query = Some(query.clone());
        self.mark_dirty();

        Effect::Search {
            request_id,
            query,
            page: 1,
        }
    }

    pub(crate) fn begin_load_more(&mut self) -> Option<Effect> {
        if !self.can_load_more() {
            engine_debug!(
                "Ignoring load-more in phase {:?} with {} listings",
                self.phase,
                self.listings.len()
            );
            return None;
        }
        let query = self.last_query.clone()?;
        let request_id = self.mint_request_id();
        let page = self.page + 1;
        self.in_flight = Some(InFlight { request_id, page });
        self.phase = Phase::LoadingMore;
        self.last_error = None;
        self.mark_dirty();

        Some(Effect::Search {
            request_id,
            query,
            page,
        })
    }

    pub(crate) fn apply_search_result(
        &mut self,
        request_id: RequestId,
        result: Result<SearchBatch, SearchFailure>,
    ) {
        let in_flight = match self.in_flight {
            Some(in_flight) if in_flight.request_id == request_id => in_flight,
            _ => {
                engine_debug!("Discarding stale search response {}", request_id);
                return;
            }
        };
        self.in_flight = None;
        let loading_more = self.phase == Phase::LoadingMore;
        self.phase = Phase::Idle;

        match result {
            Ok(batch) => {
                engine_info!(
                    "Search {} page {} returned {} listings",
                    request_id,
                    in_flight.page,
                    batch.listings.len()
                );
                if batch.total_count.is_some() {
                    self.total_count = batch.total_count;
                }
                self.append_batch(in_flight.page, batch.listings);
                if loading_more {
                    self.page = in_flight.page;
                } else if self.listings.is_empty() {
                    self.last_error = Some(Notice::NoResults(NO_RESULTS_MESSAGE.to_string()));
                }
            }
            Err(failure) => {
                let message = failure
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_SEARCH_FAILURE.to_string());
                engine_info!("Search {} failed: {}", request_id, message);
                self.last_error = Some(Notice::SearchFailed(message));
            }
        }

        self.mark_dirty();
    }

    fn append_batch(&mut self, page: u32, batch: Vec<Listing>) {
        self.listings.reserve(batch.len());
        self.listings
            .extend(batch.into_iter().map(|listing| LoadedListing {
                key: ListingKey::new(listing.id.clone(), page),
                listing,
            }));
    }

    pub(crate) fn select_category(&mut self, label: &str) {
        let wanted = label.trim();
        let next = self
            .categories()
            .into_iter()
            .find(|category| *category != CategoryFilter::All && category.label() == wanted)
            .unwrap_or(CategoryFilter::All);
        if self.filters.category != next {
            self.filters.category = next;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_min_salary(&mut self, min_salary: f64) {
        let min_salary = if min_salary.is_finite() && min_salary > 0.0 {
            min_salary
        } else {
            0.0
        };
        if self.filters.min_salary != min_salary {
            self.filters.min_salary = min_salary;
            self.mark_dirty();
        }
    }

    pub(crate) fn reset_filters(&mut self) {
        if self.filters != FilterState::default() {
            self.filters = FilterState::default();
            self.mark_dirty();
        }
    }

    pub(crate) fn open_listing(&mut self, key: ListingKey) -> Option<Effect> {
        let listing = self
            .listings
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.listing.clone())?;
        let request_id = self.mint_request_id();
        let effect = Effect::Analyze {
            request_id,
            key: key.clone(),
            title: listing.title.clone(),
            description: listing.description.clone(),
        };
        self.inspection = Some(Inspection {
            key,
            listing,
            request_id,
            analysis: AnalysisState::Pending,
        });
        self.mark_dirty();
        Some(effect)
    }

    pub(crate) fn close_listing(&mut self) {
        if self.inspection.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_analysis(&mut self, request_id: RequestId, key: &ListingKey, text: String) {
        match self.inspection.as_mut() {
            Some(inspection) if inspection.request_id == request_id && &inspection.key == key => {
                inspection.analysis = AnalysisState::Ready(text);
                self.mark_dirty();
            }
            _ => {
                engine_debug!(
                    "Discarding analysis {} for {:?}; listing no longer open",
                    request_id,
                    key
                );
            }
        }
    }

    pub(crate) fn export_effect(&self) -> Option<Effect> {
        let listings: Vec<Listing> = self.filtered_listings().into_iter().cloned().collect();
        if listings.is_empty() {
            return None;
        }
        Some(Effect::ExportCsv { listings })
    }

    pub(crate) fn record_export(&mut self, result: Result<PathBuf, String>) {
        self.export_status = Some(match result {
            Ok(path) => ExportStatus::Written(path),
            Err(message) => ExportStatus::Failed(message),
        });
        self.mark_dirty();
    }

    fn mint_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
