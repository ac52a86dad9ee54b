//! Span export to a local JSON-lines file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer provider → JsonLinesExporter → RotatingFile
//! ```
//!
//! The file lives in the configured data directory and rotates at 5 MiB,
//! keeping three numbered backups. The level comes from
//! [`Config::trace_level`](crate::Config::trace_level), default `"info"`.
//!
//! # Modules
//!
//! - `init`: subscriber installation
//! - `exporter`: OpenTelemetry span exporter producing one JSON object per span
//! - `rotating`: size-rotated line writer

mod exporter;
mod init;
mod rotating;

pub use exporter::JsonLinesExporter;
pub use init::init_tracing;
pub use rotating::RotatingFile;
