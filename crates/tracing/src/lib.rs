//! Tracing setup for the evlog binaries.
//!
//! A [`Tracer`] collects one boxed [`Layer`](tracing_subscriber::Layer) per sink (stdout, an
//! optional rolling log file, optional journald) and installs them on a single
//! [`Registry`](tracing_subscriber::Registry) as the global default subscriber.

mod formatter;
mod layers;

pub use formatter::LogFormat;
pub use layers::FileInfo;
pub use tracing_subscriber;

use layers::Layers;
use tracing_subscriber::{filter::Directive, layer::SubscriberExt, util::SubscriberInitExt};

/// Keeps the non-blocking file writer alive. Dropping it flushes and stops the writer thread.
pub type FileWorkerGuard = tracing_appender::non_blocking::WorkerGuard;

/// Installs a global tracing subscriber.
pub trait Tracer {
    /// Initialize the subscriber. Returns the file writer guard when file logging is enabled.
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>>;
}

/// Format, filter, and color settings for a single layer.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    /// Creates a new [`LayerInfo`].
    ///
    /// `default_directive` applies when `RUST_LOG` is unset; `filters` is a comma separated list
    /// of extra [`EnvFilter`](tracing_subscriber::EnvFilter) directives.
    pub const fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: "info".to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}

/// The evlog tracer: stdout always, journald and a log file on request.
#[derive(Debug, Clone, Default)]
pub struct EvlogTracer {
    stdout: LayerInfo,
    journald: Option<String>,
    file: Option<(LayerInfo, FileInfo)>,
}

impl EvlogTracer {
    /// A tracer with the default stdout layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stdout layer settings.
    pub fn with_stdout(mut self, config: LayerInfo) -> Self {
        self.stdout = config;
        self
    }

    /// Also log to journald, using `filter` as its directive list.
    pub fn with_journald(mut self, filter: String) -> Self {
        self.journald = Some(filter);
        self
    }

    /// Also log to a rolling file.
    pub fn with_file(mut self, config: LayerInfo, file_info: FileInfo) -> Self {
        self.file = Some((config, file_info));
        self
    }
}

impl Tracer for EvlogTracer {
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>> {
        let mut layers = Layers::new();

        let default_directive: Directive = self.stdout.default_directive.parse()?;
        layers.stdout(
            self.stdout.format,
            default_directive,
            &self.stdout.filters,
            self.stdout.color,
        )?;

        if let Some(filter) = self.journald {
            layers.journald(&filter)?;
        }

        let guard = match self.file {
            Some((config, file_info)) => {
                Some(layers.file(config.format, &config.filters, file_info)?)
            }
            None => None,
        };

        tracing_subscriber::registry().with(layers.into_inner()).try_init()?;
        Ok(guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_info_default() {
        let info = LayerInfo::default();
        assert_eq!(info.format, LogFormat::Terminal);
        assert_eq!(info.default_directive, "info");
        assert!(info.filters.is_empty());
        assert_eq!(info.color.as_deref(), Some("always"));
    }

    #[test]
    fn test_tracer_builder() {
        let tracer = EvlogTracer::new()
            .with_stdout(LayerInfo::new(LogFormat::Json, "debug".into(), "".into(), None))
            .with_journald("error".into());

        assert_eq!(tracer.stdout.format, LogFormat::Json);
        assert_eq!(tracer.journald.as_deref(), Some("error"));
        assert!(tracer.file.is_none());
    }
}
