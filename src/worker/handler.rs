//! Sync worker: runs publish jobs off the UI thread.
//!
//! The panel layer never awaits network calls. It hands [`WorkerMessage`]s to
//! a [`SyncWorker`], which performs the publish on the tokio runtime and sends
//! a [`WorkerResponse`] back over a channel. A publish cannot be cancelled
//! once it has been handed over; the panel only reacts to its outcome.

use crate::domain::error::{PortfolioError, Result};
use crate::sync::RemoteSyncClient;
use crate::worker::{WorkerMessage, WorkerResponse};
use crate::Config;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Executes publish jobs with a shared [`RemoteSyncClient`].
#[derive(Debug, Clone)]
pub struct SyncWorker {
    client: RemoteSyncClient,
}

impl SyncWorker {
    /// Creates a worker around an existing client.
    #[must_use]
    pub const fn new(client: RemoteSyncClient) -> Self {
        Self { client }
    }

    /// Creates a worker whose client is built from crate configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(RemoteSyncClient::from_config(config)?))
    }

    /// Processes one message and returns the response for the panel layer.
    ///
    /// Spans created here are parented to the trace context carried by the
    /// message, when present.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!("worker_handle_message");
        if let Some(parent) = message.trace_context().and_then(|ctx| ctx.to_otel_context()) {
            span.set_parent(parent);
        }

        async move {
            match message {
                WorkerMessage::Publish { job, .. } => {
                    let collection = job.collection;
                    tracing::debug!(collection = %collection, path = %job.path, "running publish job");

                    match self
                        .client
                        .publish_with_config(job.config.as_ref(), &job.path, &job.content, &job.message)
                        .await
                    {
                        Ok(receipt) => WorkerResponse::Published {
                            collection,
                            receipt,
                        },
                        Err(e) => {
                            tracing::debug!(collection = %collection, error = %e, "publish job failed");
                            WorkerResponse::PublishFailed {
                                collection,
                                kind: e.kind(),
                                message: e.to_string(),
                            }
                        }
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Runs a message as its own tokio task and waits for the response.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Worker`] if the task panics or is cancelled
    /// before producing a response.
    pub async fn run(&self, message: WorkerMessage) -> Result<WorkerResponse> {
        let worker = self.clone();
        tokio::spawn(async move { worker.handle_message(message).await })
            .await
            .map_err(|e| PortfolioError::Worker(e.to_string()))
    }

    /// Runs a message on the current tokio runtime and sends the response on
    /// `replies`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(&self, message: WorkerMessage, replies: UnboundedSender<WorkerResponse>) -> JoinHandle<()> {
        let worker = self.clone();
        tokio::spawn(async move {
            let response = worker.handle_message(message).await;
            if replies.send(response).is_err() {
                tracing::debug!("response receiver dropped before publish finished");
            }
        })
    }
}
