use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::{engine_info, engine_warn};
use landed_engine::{
    EngineConfig, ExportOptions, InsightSettings, SearchSettings, DEFAULT_RESULTS_PER_PAGE,
};
use serde::{Deserialize, Serialize};

pub(crate) const SETTINGS_FILENAME: &str = "getlanded.ron";

/// Optional `getlanded.ron` in the working directory. Every field may be
/// omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppSettings {
    pub search_base_url: String,
    pub country: String,
    pub app_id: String,
    pub app_key: String,
    pub results_per_page: u32,
    pub ai_base_url: String,
    pub ai_model: String,
    /// Overridden by the `API_KEY` environment variable.
    pub api_key: Option<String>,
    pub export_dir: PathBuf,
    pub date_format: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        let search = SearchSettings::default();
        let insight = InsightSettings::default();
        Self {
            search_base_url: search.base_url,
            country: search.country,
            app_id: search.app_id,
            app_key: search.app_key,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            ai_base_url: insight.base_url,
            ai_model: insight.model,
            api_key: None,
            export_dir: PathBuf::from("."),
            date_format: ExportOptions::default().date_format,
        }
    }
}

impl AppSettings {
    pub(crate) fn engine_config(&self, env_api_key: Option<String>) -> EngineConfig {
        let api_key = env_api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone());
        EngineConfig {
            search: SearchSettings {
                base_url: self.search_base_url.clone(),
                country: self.country.clone(),
                app_id: self.app_id.clone(),
                app_key: self.app_key.clone(),
                results_per_page: self.results_per_page.max(1),
                ..SearchSettings::default()
            },
            insight: InsightSettings {
                api_key,
                base_url: self.ai_base_url.clone(),
                model: self.ai_model.clone(),
                ..InsightSettings::default()
            },
        }
    }

    pub(crate) fn export_options(&self) -> ExportOptions {
        ExportOptions {
            date_format: self.date_format.clone(),
            ..ExportOptions::default()
        }
    }
}

/// Reads settings, falling back to defaults when the file is missing or
/// malformed.
pub(crate) fn load_settings(path: &Path) -> AppSettings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppSettings::default();
        }
        Err(err) => {
            engine_warn!("Failed to read settings from {:?}: {}", path, err);
            return AppSettings::default();
        }
    };

    match ron::from_str::<AppSettings>(&content) {
        Ok(settings) => {
            engine_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            engine_warn!("Failed to parse settings from {:?}: {}", path, err);
            AppSettings::default()
        }
    }
}
