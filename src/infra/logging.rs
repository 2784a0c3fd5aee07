//! For setting up logging.

use super::config::TelemetryConfig;
use opentelemetry_otlp::WithExportConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Flushes logs upon being dropped.
#[derive(Debug)]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
    otlp: bool,
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        if self.otlp {
            opentelemetry::global::shutdown_tracer_provider();
        }
    }
}

/// Initializes logging.
///
/// Must be called from within a tokio runtime when OTLP export is enabled.
pub fn init_logging(config: &TelemetryConfig) -> color_eyre::Result<LogGuard> {
    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,tower_http=debug,todo_store=debug".into());
    let mut guards = Vec::new();

    let (non_blocking_stdout, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(stdout_guard);
    let stdout = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_stdout)
        .with_filter(EnvFilter::new(&log_level));

    let file = match &config.log_directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::hourly(directory, "log.");
            let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);
            guards.push(file_guard);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking_file)
                .json()
                .with_filter(EnvFilter::new(&log_level));
            Some(layer)
        }
        None => None,
    };

    let opentelemetry = match &config.otlp_endpoint {
        Some(endpoint) => {
            let tracer = opentelemetry_otlp::new_pipeline()
                .tracing()
                .with_exporter(
                    opentelemetry_otlp::new_exporter()
                        .tonic()
                        .with_endpoint(endpoint),
                )
                .with_trace_config(opentelemetry_sdk::trace::config().with_resource(
                    opentelemetry_sdk::Resource::new(vec![opentelemetry::KeyValue::new(
                        "service.name",
                        env!("CARGO_PKG_NAME"),
                    )]),
                ))
                .install_batch(opentelemetry_sdk::runtime::Tokio)?;
            let layer = tracing_opentelemetry::layer()
                .with_tracer(tracer)
                .with_filter(EnvFilter::new(&log_level));
            Some(layer)
        }
        None => None,
    };

    let console_layer = if cfg!(debug_assertions) {
        Some(console_subscriber::spawn())
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(stdout)
        .with(file)
        .with(opentelemetry)
        .with(console_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(LogGuard {
        _guards: guards,
        otlp: config.otlp_endpoint.is_some(),
    })
}
