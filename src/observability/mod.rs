//! OpenTelemetry tracing exported to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → OtlpFileExporter → bookfinder-otlp.json
//! ```
//!
//! Each export writes one line holding an OTLP/JSON `resourceSpans`
//! document, so the file can be replayed into any OTLP-aware viewer. The
//! file rotates at 5 MB and keeps two numbered backups.
//!
//! The level comes from the `trace_level` plugin option (default `info`) and
//! accepts any `EnvFilter` directive, e.g. `bookfinder=debug`.

mod exporter;
mod otlp;
mod rotating;

pub use exporter::OtlpFileExporter;

use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name recorded on every span.
pub const SERVICE_NAME: &str = "bookfinder";

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "bookfinder-otlp.json";

/// Installs the global subscriber.
///
/// Tracing is best effort: if the data directory cannot be created or a
/// subscriber is already installed, the plugin runs without it.
pub fn init_tracing(config: &Config) {
    if std::fs::create_dir_all(&config.data_dir).is_err() {
        return;
    }

    let resource = Resource::new([
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let exporter = OtlpFileExporter::new(config.data_dir.join(TRACE_FILE_NAME), resource.clone());

    let provider = TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build();

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
        .try_init();
}
