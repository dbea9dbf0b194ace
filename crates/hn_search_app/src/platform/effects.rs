use std::sync::mpsc;

use engine_logging::{engine_info, engine_warn};
use hn_search_core::{Effect, Hit, Msg, RequestId};
use hn_search_engine::{
    EngineError, EngineEvent, EngineHandle, EventSink, FetchSettings, SearchHit,
};

use super::app::LoopEvent;

/// Executes core effects on the search engine.
pub struct EffectRunner {
    engine: EngineHandle,
    loop_tx: mpsc::Sender<LoopEvent>,
}

impl EffectRunner {
    pub fn new(
        settings: FetchSettings,
        loop_tx: mpsc::Sender<LoopEvent>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(
            settings,
            MsgSink {
                loop_tx: loop_tx.clone(),
            },
        )?;
        Ok(Self { engine, loop_tx })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage {
                    request_id,
                    term,
                    page,
                } => {
                    engine_info!(
                        "FetchPage request_id={} page={} term={:?}",
                        request_id,
                        page,
                        term
                    );
                    if let Err(err) = self.engine.search(request_id, term.clone(), page) {
                        let msg = rejected_search(request_id, term, &err);
                        let _ = self.loop_tx.send(LoopEvent::Msg(msg));
                    }
                }
            }
        }
    }
}

/// Turns engine completions into core messages on the main loop channel.
struct MsgSink {
    loop_tx: mpsc::Sender<LoopEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.loop_tx.send(LoopEvent::Msg(map_event(event)));
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchCompleted {
            request_id,
            term,
            result,
        } => match result {
            Ok(found) => Msg::FetchSucceeded {
                request_id,
                term,
                hits: found.hits.into_iter().map(map_hit).collect(),
                page: found.page,
            },
            Err(err) => {
                engine_warn!("Search {} for {:?} failed: {}", request_id, term, err);
                Msg::FetchFailed {
                    request_id,
                    term,
                    message: err.kind.to_string(),
                }
            }
        },
    }
}

/// Settles a search the engine never accepted, so the request does not stay loading.
pub(crate) fn rejected_search(request_id: RequestId, term: String, err: &EngineError) -> Msg {
    engine_warn!("Search {} for {:?} not started: {}", request_id, term, err);
    Msg::FetchFailed {
        request_id,
        term,
        message: err.to_string(),
    }
}

fn map_hit(hit: SearchHit) -> Hit {
    Hit {
        object_id: hit.object_id,
        title: hit.title,
        url: hit.url,
        author: hit.author,
        num_comments: hit.num_comments,
        points: hit.points,
    }
}
