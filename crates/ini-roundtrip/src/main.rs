//! INI round-trip entry point.
//!
//! Reads an INI configuration from stdin, parses it, and writes it back to
//! stdout in the reference dialect.  Any read, parse or write failure is
//! reported on stderr and the process exits with a non-zero status; on
//! success stdout carries only the rewritten configuration.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ init_logging()        -- tracing to stderr, RUST_LOG or "warn"
//!  └─ stdio::run()
//!       └─ RoundTrip::run() -- load everything, then write
//! ```

use anyhow::Context;
use tracing::debug;

use ini_roundtrip::application::round_trip::RoundTrip;
use ini_roundtrip::infrastructure::stdio;

fn main() -> anyhow::Result<()> {
    stdio::init_logging();

    let round_trip = RoundTrip::default();
    let report = stdio::run(&round_trip).context("INI round trip failed")?;

    debug!(?report, "done");
    Ok(())
}
