use std::env;
use std::io::{self, IsTerminal};

use anyhow::Result;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with `--verbose`.
pub fn env_filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
    match directives.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None if verbose => EnvFilter::new("debug"),
        None => EnvFilter::new("info"),
    }
}

pub fn subscriber<W>(filter: EnvFilter, writer: W, ansi: bool) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .finish()
}

/// Install the global subscriber. Logs go to stderr; stdout carries the summary.
pub fn init(verbose: bool) -> Result<()> {
    let directives = env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = env_filter(verbose, directives.as_deref());
    let subscriber = subscriber(filter, io::stderr, io::stderr().is_terminal());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| anyhow::anyhow!("Failed to set tracing subscriber: {err}"))
}
