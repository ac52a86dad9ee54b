//! Span exporter writing one flat JSON object per finished span.
//!
//! Each line looks like:
//!
//! ```json
//! {"service":"portfolio-sync","name":"publish","trace_id":"…","span_id":"…",
//!  "parent_span_id":"…","start_unix_nanos":1700000000000000000,"duration_micros":5120,
//!  "status":"unset","attributes":{"path":"src/data/blog.json"},"events":[…]}
//! ```

use super::rotating::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::KeyValue;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize)]
struct SpanRecord<'a> {
    service: &'a str,
    name: &'a str,
    trace_id: String,
    span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_span_id: Option<String>,
    start_unix_nanos: u64,
    duration_micros: u64,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    attributes: BTreeMap<String, JsonValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    events: Vec<EventRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct EventRecord<'a> {
    name: &'a str,
    unix_nanos: u64,
    attributes: BTreeMap<String, JsonValue>,
}

/// Exports finished spans as JSON lines to a [`RotatingFile`].
#[derive(Debug)]
pub struct JsonLinesExporter {
    file: RotatingFile,
    service: String,
    stopped: bool,
}

impl JsonLinesExporter {
    /// Creates an exporter writing to `file`, tagging records with the
    /// resource's `service.name`.
    pub fn new(file: RotatingFile, resource: &Resource) -> Self {
        Self {
            file,
            service: service_name(resource),
            stopped: false,
        }
    }

    fn write_span(&self, span: &SpanData) -> std::io::Result<()> {
        let (status, error) = match &span.status {
            Status::Unset => ("unset", None),
            Status::Ok => ("ok", None),
            Status::Error { description } => ("error", Some(&**description)),
        };

        let parent_span_id = (span.parent_span_id != SpanId::INVALID)
            .then(|| format!("{:016x}", span.parent_span_id));

        let duration = span
            .end_time
            .duration_since(span.start_time)
            .unwrap_or(Duration::ZERO);

        let record = SpanRecord {
            service: &self.service,
            name: &span.name,
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id,
            start_unix_nanos: unix_nanos(span.start_time),
            duration_micros: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            status,
            error,
            attributes: attribute_map(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| EventRecord {
                    name: &event.name,
                    unix_nanos: unix_nanos(event.timestamp),
                    attributes: attribute_map(&event.attributes),
                })
                .collect(),
        };

        let line = serde_json::to_string(&record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        self.file.write_line(&line)
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.stopped {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "span exporter already shut down",
            ))));
        }

        let result = batch
            .iter()
            .try_for_each(|span| self.write_span(span))
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.service = service_name(resource);
    }
}

/// Builds a tracer provider that exports every span synchronously to
/// `file_path`.
pub fn tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = JsonLinesExporter::new(RotatingFile::new(file_path), &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn service_name(resource: &Resource) -> String {
    resource
        .get(opentelemetry::Key::from_static_str("service.name"))
        .map_or_else(|| env!("CARGO_PKG_NAME").to_string(), |v| v.to_string())
}

fn unix_nanos(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
}

fn attribute_map(attributes: &[KeyValue]) -> BTreeMap<String, JsonValue> {
    attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect()
}

fn attribute_value(value: &opentelemetry::Value) -> JsonValue {
    use opentelemetry::Value;

    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::F64(f) => JsonValue::from(*f),
        Value::String(s) => JsonValue::String(s.as_str().to_string()),
        other => JsonValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Span, Tracer, TracerProvider as _};
    use tempfile::TempDir;

    #[test]
    fn attribute_values_keep_their_json_type() {
        use opentelemetry::Value;

        assert_eq!(attribute_value(&Value::Bool(true)), JsonValue::Bool(true));
        assert_eq!(attribute_value(&Value::I64(409)), serde_json::json!(409));
        assert_eq!(
            attribute_value(&Value::from("src/data/blog.json")),
            serde_json::json!("src/data/blog.json")
        );
    }

    #[test]
    fn finished_spans_become_json_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("spans.jsonl");
        let resource = Resource::new(vec![KeyValue::new("service.name", "portfolio-test")]);
        let provider = tracer_provider(path.clone(), resource);
        let tracer = provider.tracer("test");

        let mut span = tracer.start("publish");
        span.set_attribute(KeyValue::new("path", "src/data/projects.json"));
        span.set_attribute(KeyValue::new("status", 201_i64));
        span.end();

        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().unwrap();
        let record: JsonValue = serde_json::from_str(line).unwrap();

        assert_eq!(record["service"], "portfolio-test");
        assert_eq!(record["name"], "publish");
        assert_eq!(record["attributes"]["path"], "src/data/projects.json");
        assert_eq!(record["attributes"]["status"], 201);
        assert_eq!(record["trace_id"].as_str().unwrap().len(), 32);
        assert!(record.get("parent_span_id").is_none());
    }
}
