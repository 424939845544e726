use std::sync::LazyLock;

use landed_core::Listing;
use regex::Regex;

use crate::RawJob;

// An opening or closing tag, or an unterminated one running to the end of text.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[^>]+(>|$)").expect("tag pattern is valid"));

/// Removes tag sequences. Entities and text between tags are left as-is.
pub fn strip_tags(text: &str) -> String {
    TAG.replace_all(text, "").into_owned()
}

/// Maps one provider record to a canonical listing.
pub fn normalize(raw: RawJob) -> Listing {
    Listing {
        id: raw.id,
        title: raw.title.as_deref().map(strip_tags).unwrap_or_default(),
        company: raw
            .company
            .and_then(|company| company.display_name)
            .unwrap_or_default(),
        location: raw
            .location
            .and_then(|location| location.display_name)
            .unwrap_or_default(),
        description: raw.description.as_deref().map(strip_tags).unwrap_or_default(),
        salary_min: raw.salary_min,
        salary_max: raw.salary_max,
        url: raw.redirect_url.unwrap_or_default(),
        created: raw.created.unwrap_or_default(),
        category: raw
            .category
            .and_then(|category| category.label)
            .unwrap_or_default(),
    }
}

/// Normalizes a batch, keeping provider order.
pub fn normalize_all(raw: Vec<RawJob>) -> Vec<Listing> {
    raw.into_iter().map(normalize).collect()
}
