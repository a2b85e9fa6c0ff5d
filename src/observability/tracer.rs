//! OpenTelemetry tracer provider exporting spans to a rotating JSON file.

use super::file_writer::{FileWriter, RotationPolicy};
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Instrumentation scope recorded on every exported batch.
pub const SCOPE_NAME: &str = "imgfinder";

/// Span exporter writing one OTLP JSON document per batch as a single line.
struct FileSpanExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    is_shutdown: AtomicBool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let line = self.formatter.format_batch(&batch).to_string();
        let result = self
            .writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("formatter", &self.formatter)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Creates a tracer provider that exports every finished span immediately to
/// `file_path`, rotated according to `policy`.
pub fn create_tracer_provider(
    file_path: PathBuf,
    policy: RotationPolicy,
    resource: Resource,
) -> TracerProvider {
    let exporter = FileSpanExporter {
        writer: FileWriter::new(file_path, policy),
        formatter: SpanFormatter::new(resource.clone(), SCOPE_NAME),
        is_shutdown: AtomicBool::new(false),
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_are_written_as_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "imgfinder-test")]);
        let provider = create_tracer_provider(path.clone(), RotationPolicy::default(), resource);

        provider.tracer(SCOPE_NAME).in_span("fetch_page", |_cx| {});
        let _ = provider.force_flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().unwrap();
        let doc: serde_json::Value = serde_json::from_str(line).unwrap();
        let span = &doc["resourceSpans"][0]["scopeSpans"][0]["spans"][0];
        assert_eq!(span["name"], "fetch_page");
        assert_eq!(span["spanId"].as_str().unwrap().len(), 16);
    }
}
