use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_debug, engine_warn};
use landed_core::{ListingKey, Query, RequestId};

use crate::insight::{InsightClient, InsightSettings};
use crate::search::{AdzunaClient, SearchProvider, SearchSettings};
use crate::{EngineEvent, SearchError};

enum EngineCommand {
    Search {
        request_id: RequestId,
        query: Query,
        page: u32,
    },
    Analyze {
        request_id: RequestId,
        key: ListingKey,
        title: String,
        description: String,
    },
}

/// Receives engine events; called from the engine's runtime threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub search: SearchSettings,
    pub insight: InsightSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("search client: {0}")]
    Search(#[from] SearchError),
    #[error("async runtime: {0}")]
    Runtime(#[from] io::Error),
}

/// Runs search and analysis requests concurrently on a background tokio
/// runtime. Every command produces exactly one event.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let search = AdzunaClient::new(config.search)?;
        let insight = InsightClient::from_settings(config.insight);
        Ok(Self::with_clients(Arc::new(search), Arc::new(insight), sink)?)
    }

    pub fn with_clients(
        search: Arc<dyn SearchProvider>,
        insight: Arc<InsightClient>,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("landed-engine")
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let search = search.clone();
                let insight = insight.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(search.as_ref(), insight.as_ref(), sink.as_ref(), command)
                        .await;
                });
            }
            engine_debug!("Engine command channel closed; shutting down runtime");
        });

        Ok(Self { cmd_tx })
    }

    pub fn search(&self, request_id: RequestId, query: Query, page: u32) {
        self.send(EngineCommand::Search {
            request_id,
            query,
            page,
        });
    }

    pub fn analyze(
        &self,
        request_id: RequestId,
        key: ListingKey,
        title: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.send(EngineCommand::Analyze {
            request_id,
            key,
            title: title.into(),
            description: description.into(),
        });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    search: &dyn SearchProvider,
    insight: &InsightClient,
    sink: &dyn EventSink,
    command: EngineCommand,
) {
    match command {
        EngineCommand::Search {
            request_id,
            query,
            page,
        } => {
            let result = search.search(&query, page).await;
            if let Err(err) = &result {
                engine_warn!("Search {} page {} failed: {}", request_id, page, err);
            }
            sink.emit(EngineEvent::SearchCompleted {
                request_id,
                page,
                result,
            });
        }
        EngineCommand::Analyze {
            request_id,
            key,
            title,
            description,
        } => {
            let text = insight.analyze(&title, &description).await;
            sink.emit(EngineEvent::AnalysisCompleted {
                request_id,
                key,
                text,
            });
        }
    }
}
