//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Nothing is written to the terminal: the UI owns the screen. Spans land in
//! `<data dir>/imgfinder/imgfinder-otlp.json`, one OTLP JSON document per
//! line, rotated at 10 MB with 3 backups.
//!
//! # Usage
//!
//! ```rust,no_run
//! use imgfinder::observability::{init_tracing, shutdown_tracing};
//! use imgfinder::Config;
//!
//! let trace_file = init_tracing(&Config::default())?;
//! tracing::debug!(path = %trace_file.display(), "tracing active");
//! shutdown_tracing();
//! # Ok::<(), imgfinder::ImgFinderError>(())
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::{FileWriter, RotationPolicy};
pub use init::{init_tracing, init_tracing_in, shutdown_tracing, TRACE_FILE_NAME};
