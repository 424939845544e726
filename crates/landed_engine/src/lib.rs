//! GetLanded engine: provider adapters, effect execution and export.
mod engine;
mod export;
mod insight;
mod normalize;
mod search;
mod types;

pub use engine::{ChannelEventSink, EngineConfig, EngineError, EngineHandle, EventSink};
pub use export::{
    render_csv, write_csv_export, ExportError, ExportOptions, ExportSummary, CSV_HEADER,
};
pub use insight::{
    build_prompt, GeminiGenerator, InsightClient, InsightError, InsightSettings, TextGenerator,
    MISSING_KEY_FALLBACK, UNAVAILABLE_FALLBACK,
};
pub use normalize::{normalize, normalize_all, strip_tags};
pub use search::{AdzunaClient, SearchProvider, SearchSettings, DEFAULT_RESULTS_PER_PAGE};
pub use types::{
    EngineEvent, FailureKind, RawCategory, RawCompany, RawJob, RawLocation, RawSearchResponse,
    SearchError,
};
