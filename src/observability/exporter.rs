//! `SpanExporter` writing OTLP/JSON lines to a rotating file.

use super::otlp;
use super::rotating::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;

/// Rotate once the trace file passes this size.
const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Numbered backups kept after rotation.
const BACKUPS: usize = 2;

/// Exports each batch as one OTLP/JSON line.
#[derive(Debug)]
pub struct OtlpFileExporter {
    file: RotatingFile,
    resource: Resource,
    stopped: bool,
}

impl OtlpFileExporter {
    /// Creates an exporter appending to `path`. Nothing is opened until the
    /// first export.
    #[must_use]
    pub const fn new(path: PathBuf, resource: Resource) -> Self {
        Self {
            file: RotatingFile::new(path, MAX_FILE_BYTES, BACKUPS),
            resource,
            stopped: false,
        }
    }
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped {
            Err(TraceError::from("exporter is shut down"))
        } else {
            let line = otlp::resource_spans(&self.resource, &batch).to_string();
            self.file.append_line(&line).map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}
