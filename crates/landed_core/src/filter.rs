use std::collections::BTreeSet;

use crate::Listing;

/// Category selection. `All` is the sentinel shown first in category pickers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Exact(String),
}

impl CategoryFilter {
    pub const ALL_LABEL: &'static str = "All";

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => Self::ALL_LABEL,
            CategoryFilter::Exact(category) => category,
        }
    }

    fn accepts(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Exact(wanted) => wanted == category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    /// Minimum salary; `0.0` disables the salary predicate.
    pub min_salary: f64,
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        self.category != CategoryFilter::All || self.min_salary > 0.0
    }
}

/// Filter predicate for a single listing.
///
/// The salary check passes when either end of the advertised range reaches
/// the minimum, so a listing with only `salary_min` set is judged on that
/// value alone.
pub fn matches(listing: &Listing, filters: &FilterState) -> bool {
    let min = filters.min_salary;
    let salary_ok = min <= 0.0
        || listing.salary_max.is_some_and(|max| max >= min)
        || listing.salary_min.is_some_and(|low| low >= min);
    filters.category.accepts(&listing.category) && salary_ok
}

/// `All` followed by the distinct, non-empty categories in sorted order.
pub fn distinct_categories<'a>(
    listings: impl IntoIterator<Item = &'a Listing>,
) -> Vec<CategoryFilter> {
    let categories: BTreeSet<&str> = listings
        .into_iter()
        .map(|listing| listing.category.as_str())
        .filter(|category| !category.trim().is_empty())
        .collect();

    std::iter::once(CategoryFilter::All)
        .chain(
            categories
                .into_iter()
                .map(|category| CategoryFilter::Exact(category.to_string())),
        )
        .collect()
}
