use std::fmt::Write as _;

use landed_core::{AppViewModel, ExportStatus, InspectorView, Phase};

/// Renders the whole screen as plain text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", status_line(view));

    match view.phase {
        Phase::LoadingInitial => out.push_str("Searching...\n"),
        Phase::LoadingMore => out.push_str("Loading more...\n"),
        Phase::Idle => {}
    }
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "! {}", notice.message());
    }

    let _ = writeln!(
        out,
        "Category: {} | Min salary: {} | Categories: {}",
        view.selected_category,
        format_amount(view.min_salary),
        view.categories.join(", ")
    );

    for (index, card) in view.listings.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} | {} | {} | {} | {}",
            index + 1,
            card.title,
            card.company,
            card.location,
            card.salary,
            card.category
        );
    }
    if view.show_empty_filter_hint {
        let hint = if view.filters_active {
            "No jobs match your filters. Try \"clear\"."
        } else {
            "No jobs to show."
        };
        let _ = writeln!(out, "{hint}");
    }
    if view.can_load_more {
        out.push_str("Type \"more\" to load the next page.\n");
    }

    if let Some(inspector) = &view.inspector {
        render_inspector(&mut out, inspector);
    }

    match &view.export {
        Some(ExportStatus::Written(path)) => {
            let _ = writeln!(out, "Exported to {}", path.display());
        }
        Some(ExportStatus::Failed(reason)) => {
            let _ = writeln!(out, "Export failed: {reason}");
        }
        None => {}
    }
    out
}

fn status_line(view: &AppViewModel) -> String {
    let query = match &view.query {
        Some(query) if query.keyword.is_empty() => format!("Top jobs in {}", query.location),
        Some(query) if query.location.is_empty() => format!("\"{}\"", query.keyword),
        Some(query) => format!("\"{}\" in {}", query.keyword, query.location),
        None => "No search yet".to_string(),
    };
    let mut line = format!(
        "{} | page {} | showing {} of {} loaded",
        query,
        view.page,
        view.listings.len(),
        view.loaded_count
    );
    if let Some(total) = view.total_available {
        let _ = write!(line, " ({total} available)");
    }
    line
}

fn render_inspector(out: &mut String, inspector: &InspectorView) {
    let _ = writeln!(out, "---- {} ----", inspector.title);
    let _ = writeln!(
        out,
        "{} | {} | {} | {}",
        inspector.company, inspector.location, inspector.salary, inspector.category
    );
    let _ = writeln!(out, "{}", inspector.description);
    let _ = writeln!(out, "Apply: {}", inspector.url);
    match &inspector.analysis {
        Some(text) => {
            let _ = writeln!(out, "AI insights:\n{text}");
        }
        None => out.push_str("AI insights: analysing...\n"),
    }
}

fn format_amount(value: f64) -> String {
    if value > 0.0 {
        format!("£{value:.0}")
    } else {
        "any".to_string()
    }
}
