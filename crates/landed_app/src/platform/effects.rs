use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_info, engine_warn};
use landed_core::{Effect, Msg, SearchFailure};
use landed_engine::{
    write_csv_export, ChannelEventSink, EngineError, EngineEvent, EngineHandle, ExportOptions,
};

use super::app::LoopEvent;
use super::settings::AppSettings;

/// Executes core effects: network calls go to the engine, export runs inline.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
    export_dir: PathBuf,
    export_options: ExportOptions,
    events: mpsc::Sender<LoopEvent>,
}

impl EffectRunner {
    pub(crate) fn new(
        settings: &AppSettings,
        env_api_key: Option<String>,
        events: mpsc::Sender<LoopEvent>,
    ) -> Result<Self, EngineError> {
        let (engine_tx, engine_rx) = mpsc::channel::<EngineEvent>();
        let engine = EngineHandle::new(
            settings.engine_config(env_api_key),
            Arc::new(ChannelEventSink::new(engine_tx)),
        )?;

        let forward = events.clone();
        thread::spawn(move || {
            for event in engine_rx {
                if forward.send(LoopEvent::Msg(engine_event_to_msg(event))).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            engine,
            export_dir: settings.export_dir.clone(),
            export_options: settings.export_options(),
            events,
        })
    }

    pub(crate) fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Search {
                    request_id,
                    query,
                    page,
                } => {
                    engine_info!(
                        "Search request_id={} page={} what_len={}",
                        request_id,
                        page,
                        query.keyword.len()
                    );
                    self.engine.search(request_id, query, page);
                }
                Effect::Analyze {
                    request_id,
                    key,
                    title,
                    description,
                } => {
                    self.engine.analyze(request_id, key, title, description);
                }
                Effect::ExportCsv { listings } => {
                    let result =
                        write_csv_export(&self.export_dir, &listings, &self.export_options)
                            .map(|summary| summary.output_path)
                            .map_err(|err| {
                                engine_warn!("Export failed: {}", err);
                                err.to_string()
                            });
                    let _ = self
                        .events
                        .send(LoopEvent::Msg(Msg::ExportFinished(result)));
                }
            }
        }
    }
}

pub(crate) fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchCompleted {
            request_id, result, ..
        } => Msg::SearchCompleted {
            request_id,
            result: result.map_err(|err| SearchFailure::with_message(err.message)),
        },
        EngineEvent::AnalysisCompleted {
            request_id,
            key,
            text,
        } => Msg::AnalysisCompleted {
            request_id,
            key,
            text,
        },
    }
}
