//! Tracing initialization and subscriber setup.

use super::file_writer::RotationPolicy;
use super::tracer::{self, SCOPE_NAME};
use crate::domain::error::Result;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::{Path, PathBuf};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the span export file inside the data directory.
pub const TRACE_FILE_NAME: &str = "imgfinder-otlp.json";

/// Installs the global subscriber exporting spans to
/// `<data dir>/imgfinder/imgfinder-otlp.json`.
///
/// The filter comes from `RUST_LOG` if set, else from `config.trace_level`,
/// else `info`. Calling this more than once leaves the first subscriber in
/// place.
///
/// Returns the path of the trace file.
///
/// # Errors
///
/// Returns [`ImgFinderError::Io`](crate::domain::ImgFinderError::Io) if the
/// data directory cannot be created.
pub fn init_tracing(config: &Config) -> Result<PathBuf> {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    init_tracing_in(config, &data_dir)
}

/// Like [`init_tracing`], writing the trace file into `dir`.
///
/// # Errors
///
/// Returns an error if `dir` cannot be created.
pub fn init_tracing_in(config: &Config, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let trace_file = dir.join(TRACE_FILE_NAME);
    let provider =
        tracer::create_tracer_provider(trace_file.clone(), RotationPolicy::default(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME));
    let _ = opentelemetry::global::set_tracer_provider(provider);

    let subscriber = tracing_subscriber::registry().with(filter).with(otel_layer);
    let _ = subscriber.try_init();

    Ok(trace_file)
}

/// Flushes pending spans and shuts the global tracer provider down.
pub fn shutdown_tracing() {
    opentelemetry::global::shutdown_tracer_provider();
}
