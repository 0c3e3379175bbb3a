use std::sync::Arc;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::api::{AnalysisClient, Event};
use crate::error::{AnalysisError, AnalysisResult, AppResult};
use crate::session::Session;
use crate::stream::{decode_line, LineAssembler, Utf8StreamDecoder};

/// Drives one analysis run at a time and publishes session snapshots.
///
/// Clones share the snapshot channel and the one-run-at-a-time guard, so a
/// start requested anywhere while a run is in flight is rejected as a no-op.
/// Consumers subscribe for one immutable [`Session`] snapshot per dispatch
/// cycle and never mutate shared state.
#[derive(Clone)]
pub struct AnalysisEngine {
    client: AnalysisClient,
    snapshots: watch::Sender<Session>,
    running: Arc<Mutex<()>>,
}

impl AnalysisEngine {
    /// Create an engine for the given client
    pub fn new(client: AnalysisClient) -> Self {
        let (snapshots, _) = watch::channel(Session::idle());
        Self {
            client,
            snapshots,
            running: Arc::new(Mutex::new(())),
        }
    }

    /// Subscribe to per-cycle session snapshots
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.snapshots.subscribe()
    }

    /// The current session snapshot
    pub fn session(&self) -> Session {
        self.snapshots.borrow().clone()
    }

    /// Run one analysis to its terminal state.
    ///
    /// Returns `Ok(None)` without touching any state when the input is
    /// blank or another run is already in flight. On a fatal fault the
    /// session is left failed with whatever partial state had accumulated,
    /// and the fault is returned to the caller.
    pub async fn analyze(
        &self,
        text: &str,
        cancel: CancellationToken,
    ) -> AppResult<Option<Session>> {
        if text.trim().is_empty() {
            debug!("Ignoring analysis request for blank input");
            return Ok(None);
        }

        let _guard = match self.running.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                debug!("Analysis already running, ignoring start request");
                return Ok(None);
            }
        };

        let mut session = Session::begin();
        info!(session_id = %session.id, chars = text.len(), "Analysis started");
        self.publish(&session);

        match self.drive(&mut session, text, &cancel).await {
            Ok(()) => {
                session.complete();
                info!(session_id = %session.id, claims = session.result.claims.len(), "Analysis completed");
                self.publish(&session);
                Ok(Some(session))
            }
            Err(e) => {
                error!(session_id = %session.id, error = %e, "Analysis failed");
                session.fail(e.to_string());
                self.publish(&session);
                Err(e.into())
            }
        }
    }

    /// Open the response stream and ingest it to completion.
    async fn drive(
        &self,
        session: &mut Session,
        text: &str,
        cancel: &CancellationToken,
    ) -> AnalysisResult<()> {
        let stream = tokio::select! {
            _ = cancel.cancelled() => return Err(AnalysisError::Cancelled),
            opened = self.client.stream_analyze(text) => opened?,
        };
        self.ingest(session, stream, cancel).await
    }

    /// Ingest a byte-chunk stream, dispatching each decoded event.
    ///
    /// The loop suspends only between chunks; everything between suspension
    /// points runs synchronously in arrival order. Cancellation abandons an
    /// in-flight read without dispatching it.
    async fn ingest(
        &self,
        session: &mut Session,
        stream: impl Stream<Item = AnalysisResult<Bytes>>,
        cancel: &CancellationToken,
    ) -> AnalysisResult<()> {
        tokio::pin!(stream);
        let mut utf8 = Utf8StreamDecoder::new();
        let mut assembler = LineAssembler::new();

        loop {
            let next = tokio::select! {
                _ = cancel.cancelled() => return Err(AnalysisError::Cancelled),
                next = stream.next() => next,
            };

            match next {
                Some(chunk) => {
                    let text = utf8.push(&chunk?);
                    for line in assembler.push(&text) {
                        if self.dispatch(session, &line) {
                            return Ok(());
                        }
                    }
                }
                None => {
                    // The trailing segment is still a frame when the
                    // server's last write lacks '\n'.
                    if let Some(line) = assembler.finish() {
                        self.dispatch(session, &line);
                    }
                    // End of stream without a `final` event is a normal,
                    // if premature, termination.
                    return Ok(());
                }
            }
        }
    }

    /// Decode one line and apply it; returns true on the terminal event.
    fn dispatch(&self, session: &mut Session, line: &str) -> bool {
        let Some(event) = decode_line(line) else {
            return false;
        };

        debug!(event = event.kind(), "Applying event");

        // Stage transitions reflect event arrival and must precede the
        // result merge.
        session.stages.apply(&event);
        session.result.merge(&event);

        let terminal = matches!(event, Event::Final(_));
        self.publish(session);
        terminal
    }

    fn publish(&self, session: &Session) {
        self.snapshots.send_replace(session.clone());
    }
}
