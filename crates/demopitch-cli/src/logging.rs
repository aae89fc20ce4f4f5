use anyhow::{Context, Result};
use std::sync::Once;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

// Used to ensure we only set up tracing once
static INIT: Once = Once::new();

/// Sets up the logging infrastructure for the application.
/// This includes:
/// - File-based logging with JSON formatting (DEBUG level for the library)
/// - Console output on stderr only when `verbose` is set
pub fn setup_logging(name: Option<&str>, verbose: bool) -> Result<()> {
    setup_logging_internal(name, verbose, false)
}

fn env_filter() -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    Ok(EnvFilter::new("")
        .add_directive("demopitch=debug".parse()?)
        .add_directive("demopitch_cli=info".parse()?)
        .add_directive(LevelFilter::WARN.into()))
}

fn log_filename(name: Option<&str>) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    match name {
        Some(n) => format!("{}-{}.log", timestamp, n),
        None => format!("{}.log", timestamp),
    }
}

/// Internal function that allows bypassing the Once check for testing
fn setup_logging_internal(name: Option<&str>, verbose: bool, force: bool) -> Result<()> {
    let mut result = Ok(());

    let mut setup = || {
        result = (|| {
            let log_dir = demopitch::logging::prepare_log_directory("cli", true)?;
            let file_appender = tracing_appender::rolling::RollingFileAppender::new(
                Rotation::NEVER,
                log_dir,
                log_filename(name),
            );

            let file_layer = fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(file_appender)
                .with_ansi(false)
                .json();

            let mut layers = vec![file_layer.with_filter(env_filter()?).boxed()];

            if verbose {
                let console_layer = fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .compact();
                layers.push(console_layer.with_filter(env_filter()?).boxed());
            }

            let subscriber = Registry::default().with(layers);

            if force {
                // For testing, just create and use the subscriber without setting it globally
                let _guard = subscriber.set_default();
                tracing::warn!("Test log entry from setup");
                Ok(())
            } else {
                subscriber
                    .try_init()
                    .context("Failed to set global subscriber")?;
                Ok(())
            }
        })();
    };

    if force {
        setup();
    } else {
        INIT.call_once(setup);
    }

    result
}
