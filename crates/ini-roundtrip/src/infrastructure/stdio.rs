//! Process stream adapter.
//!
//! Binds a [`RoundTrip`] to the standard streams: stdin is read to the end,
//! stdout is buffered and flushed once the configuration has been written.
//! Diagnostics never go to stdout; logging writes to stderr.

use std::io::{self, BufWriter};

use tracing_subscriber::EnvFilter;

use crate::application::round_trip::{RoundTrip, RoundTripError, RoundTripReport};

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// The level is taken from `RUST_LOG` and defaults to [`DEFAULT_LOG_FILTER`].
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
}

/// Runs `round_trip` from stdin to stdout.
///
/// # Errors
///
/// Propagates the [`RoundTripError`] from [`RoundTrip::run`].
pub fn run(round_trip: &RoundTrip) -> Result<RoundTripReport, RoundTripError> {
    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    round_trip.run(stdin, stdout)
}
