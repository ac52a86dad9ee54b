//! Subscriber setup: `tracing` macros → OpenTelemetry → JSON-lines file.

use super::exporter;
use crate::domain::error::Result;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "portfolio-sync";
const DEFAULT_LEVEL: &str = "info";

/// Installs the global tracing subscriber.
///
/// Spans at or above `config.trace_level` (default `"info"`, any
/// [`EnvFilter`] directive is accepted) are exported to
/// `<data_dir>/portfolio-sync-spans.jsonl`, rotated by size.
///
/// Returns `Ok(false)` if another subscriber was already installed, in which
/// case nothing changes.
///
/// # Errors
///
/// Returns [`crate::PortfolioError::Io`] if the data directory cannot be
/// created.
///
/// # Example
///
/// ```no_run
/// use portfolio_sync::{observability::init_tracing, Config};
///
/// let config = Config {
///     trace_level: Some("portfolio_sync=debug".to_string()),
///     ..Config::default()
/// };
/// init_tracing(&config)?;
/// # Ok::<(), portfolio_sync::PortfolioError>(())
/// ```
pub fn init_tracing(config: &Config) -> Result<bool> {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    std::fs::create_dir_all(&config.data_dir)?;

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = exporter::tracer_provider(paths::trace_file(&config.data_dir), resource);

    let installed = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level, data_dir = %config.data_dir.display(), "tracing initialized");
    }
    Ok(installed)
}
