//! Messages exchanged between the panel layer and the sync worker.
//!
//! Publish jobs leave the UI thread as [`WorkerMessage`]s and come back as
//! [`WorkerResponse`]s. Both are serializable so a host can ship them across a
//! thread or process boundary, and requests carry a [`TraceContext`] so the
//! worker's spans join the trace of the panel action that started them.

use crate::domain::{ErrorKind, SyncConfig};
use crate::storage::CollectionKind;
use crate::sync::PublishReceipt;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-task span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current tracing span.
    ///
    /// Returns `None` if no OpenTelemetry layer is installed or the span
    /// context is invalid.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds a remote parent context from the captured IDs.
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Everything the worker needs to publish one collection.
///
/// The sync settings are read from the store when the job is created, so a
/// job always uses the settings current at the moment the user asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishJob {
    /// Collection being published.
    pub collection: CollectionKind,
    /// Repository path to write.
    pub path: String,
    /// Commit message.
    pub message: String,
    /// Snapshot of the collection.
    pub content: serde_json::Value,
    /// Sync settings at job creation, `None` if none were stored.
    pub config: Option<SyncConfig>,
}

/// Requests sent to the sync worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Publish a collection snapshot to GitHub.
    Publish {
        /// The job to run.
        job: PublishJob,

        /// Trace context for linking spans across tasks.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Creates a `Publish` message with the current trace context.
    #[must_use]
    pub fn publish(job: PublishJob) -> Self {
        Self::Publish {
            job,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Trace context attached to the message, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Publish { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the sync worker back to the panel layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The collection was written to the repository.
    Published {
        /// Collection that was published.
        collection: CollectionKind,
        /// Details of the write.
        receipt: PublishReceipt,
    },

    /// The publish did not complete.
    PublishFailed {
        /// Collection that failed to publish.
        collection: CollectionKind,
        /// Error classification.
        kind: ErrorKind,
        /// Human-readable error message.
        message: String,
    },
}

impl WorkerResponse {
    /// Collection the response refers to.
    #[must_use]
    pub const fn collection(&self) -> CollectionKind {
        match self {
            Self::Published { collection, .. } | Self::PublishFailed { collection, .. } => {
                *collection
            }
        }
    }
}
