use crate::{AppState, Effect, Msg, Query};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchSubmitted { keyword, location } => {
            vec![state.begin_new_search(Query::new(keyword, location))]
        }
        Msg::TopJobsRequested => vec![state.begin_new_search(Query::top_jobs())],
        Msg::LoadMoreClicked => state.begin_load_more().into_iter().collect(),
        Msg::SearchCompleted { request_id, result } => {
            state.apply_search_result(request_id, result);
            Vec::new()
        }
        Msg::CategorySelected(label) => {
            state.select_category(&label);
            Vec::new()
        }
        Msg::MinSalaryChanged(min_salary) => {
            state.set_min_salary(min_salary);
            Vec::new()
        }
        Msg::FiltersCleared => {
            state.reset_filters();
            Vec::new()
        }
        Msg::ListingOpened(key) => state.open_listing(key).into_iter().collect(),
        Msg::ListingClosed => {
            state.close_listing();
            Vec::new()
        }
        Msg::AnalysisCompleted {
            request_id,
            key,
            text,
        } => {
            state.apply_analysis(request_id, &key, text);
            Vec::new()
        }
        Msg::ExportClicked => state.export_effect().into_iter().collect(),
        Msg::ExportFinished(result) => {
            state.record_export(result);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
