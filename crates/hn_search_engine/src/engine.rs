use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_debug, engine_info};

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{EngineEvent, FetchError, RequestId};

/// Receives engine events on whichever thread completed the request.
pub trait EventSink: Send + Sync + 'static {
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

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
    #[error("failed to spawn engine thread: {0}")]
    Thread(String),
    #[error("engine thread is no longer running")]
    Stopped,
}

enum EngineCommand {
    Search {
        request_id: RequestId,
        term: String,
        page: u32,
    },
}

/// Runs fetches on a background thread. Dropping the handle stops the thread.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings, sink: impl EventSink) -> Result<Self, EngineError> {
        let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(settings)?);
        Self::with_fetcher(fetcher, sink)
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn Fetcher>,
        sink: impl EventSink,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let sink: Arc<dyn EventSink> = Arc::new(sink);

        thread::Builder::new()
            .name("hn_search_engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let fetcher = fetcher.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(fetcher.as_ref(), command, sink.as_ref()).await;
                    });
                }
                engine_debug!("Engine command channel closed");
            })
            .map_err(|err| EngineError::Thread(err.to_string()))?;

        Ok(Self { cmd_tx })
    }

    /// Queues a search. Fails only when the engine thread has exited.
    pub fn search(
        &self,
        request_id: RequestId,
        term: impl Into<String>,
        page: u32,
    ) -> Result<(), EngineError> {
        self.cmd_tx
            .send(EngineCommand::Search {
                request_id,
                term: term.into(),
                page,
            })
            .map_err(|_| EngineError::Stopped)
    }
}

async fn handle_command(fetcher: &dyn Fetcher, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Search {
            request_id,
            term,
            page,
        } => {
            let result = fetcher.fetch_page(&term, page).await;
            match &result {
                Ok(found) => engine_info!(
                    "Request {} for {:?} page {} returned {} hits",
                    request_id,
                    term,
                    found.page,
                    found.hits.len()
                ),
                Err(err) => engine_info!("Request {} for {:?} failed: {}", request_id, term, err),
            }
            sink.emit(EngineEvent::SearchCompleted {
                request_id,
                term,
                result,
            });
        }
    }
}
