use std::path::PathBuf;

use crate::{Listing, ListingKey, Notice, Phase, Query};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Written(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub page: u32,
    pub query: Option<Query>,
    pub loaded_count: usize,
    pub total_available: Option<u64>,
    /// Listings passing the current filters.
    pub listings: Vec<ListingCardView>,
    pub categories: Vec<String>,
    pub selected_category: String,
    pub min_salary: f64,
    pub filters_active: bool,
    pub notice: Option<Notice>,
    pub can_load_more: bool,
    /// A search ran, nothing is loading, no error is shown and the filters hide everything.
    pub show_empty_filter_hint: bool,
    pub inspector: Option<InspectorView>,
    pub export: Option<ExportStatus>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCardView {
    pub key: ListingKey,
    pub title: String,
    pub company: String,
    pub location: String,
    pub category: String,
    pub salary: String,
    pub created: String,
}

impl ListingCardView {
    pub(crate) fn from_listing(key: ListingKey, listing: &Listing) -> Self {
        Self {
            key,
            title: listing.title.clone(),
            company: listing.company.clone(),
            location: listing.location.clone(),
            category: listing.category.clone(),
            salary: salary_label(listing.salary_min, listing.salary_max),
            created: listing.created.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectorView {
    pub key: ListingKey,
    pub title: String,
    pub company: String,
    pub location: String,
    pub category: String,
    pub salary: String,
    pub description: String,
    pub url: String,
    /// `None` while the analysis is still running.
    pub analysis: Option<String>,
}

pub(crate) fn salary_label(min: Option<f64>, max: Option<f64>) -> String {
    let min = min.filter(|value| *value > 0.0);
    let max = max.filter(|value| *value > 0.0);
    match (min, max) {
        (None, None) => "Competitive salary".to_string(),
        (Some(min), None) => format!("£{}+", group_thousands(min)),
        (None, Some(max)) => format!("Up to £{}", group_thousands(max)),
        (Some(min), Some(max)) => {
            format!("£{} - £{}", group_thousands(min), group_thousands(max))
        }
    }
}

fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.round());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
