//! RoundTrip use case: load a configuration, then write it back.
//!
//! The whole input is loaded before a single byte is written, so a parse
//! failure leaves the output untouched.  Errors come back as a
//! [`RoundTripError`] that says which half of the trip failed.

use std::io::{self, Read, Write};

use ini_core::{read_from, render, Dialect, LoadError};
use thiserror::Error;
use tracing::info;

/// Error type for a round trip.
#[derive(Debug, Error)]
pub enum RoundTripError {
    /// The input could not be read or is not valid INI.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The output stream rejected the written configuration.
    #[error("failed to write configuration output: {0}")]
    Write(#[source] io::Error),
}

/// What a successful round trip produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTripReport {
    /// Number of sections, not counting the defaults section.
    pub sections: usize,
    /// Number of entries across all sections, defaults included.
    pub entries: usize,
    /// Bytes written to the output stream.
    pub bytes_written: usize,
}

/// Reads INI text and writes the parsed configuration back out.
#[derive(Debug, Clone, Default)]
pub struct RoundTrip {
    dialect: Dialect,
}

impl RoundTrip {
    /// Creates a round trip that reads and writes with `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// The dialect used for both directions.
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Loads all of `input`, then writes the configuration to `output` and
    /// flushes it.  `output` is not closed.
    ///
    /// # Errors
    ///
    /// Returns [`RoundTripError::Load`] if reading or parsing fails (nothing is
    /// written in that case) and [`RoundTripError::Write`] if `output` fails.
    pub fn run<R: Read, W: Write>(
        &self,
        input: R,
        mut output: W,
    ) -> Result<RoundTripReport, RoundTripError> {
        let config = read_from(input, &self.dialect)?;
        let text = render(&config, &self.dialect);

        output
            .write_all(text.as_bytes())
            .and_then(|()| output.flush())
            .map_err(RoundTripError::Write)?;

        let report = RoundTripReport {
            sections: config.len(),
            entries: config.entry_count(),
            bytes_written: text.len(),
        };
        info!(
            sections = report.sections,
            entries = report.entries,
            bytes = report.bytes_written,
            "round trip complete"
        );
        Ok(report)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ini_core::ParseError;
    use mockall::mock;

    mock! {
        Sink {}
        impl Write for Sink {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
            fn flush(&mut self) -> io::Result<()>;
        }
    }

    /// A reader that fails on the first read.
    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    fn run(input: &str) -> (Result<RoundTripReport, RoundTripError>, String) {
        let mut out = Vec::new();
        let result = RoundTrip::default().run(input.as_bytes(), &mut out);
        (result, String::from_utf8(out).expect("output is UTF-8"))
    }

    #[test]
    fn test_run_writes_configuration_and_reports_counts() {
        // Arrange / Act
        let (result, out) = run("[DEFAULT]\nd = 0\n[a]\nx=1\n[b]\ny=2\nz=3\n");

        // Assert
        let report = result.expect("round trip must succeed");
        assert_eq!(out, "[DEFAULT]\nd = 0\n\n[a]\nx = 1\n\n[b]\ny = 2\nz = 3\n\n");
        assert_eq!(
            report,
            RoundTripReport {
                sections: 2,
                entries: 4,
                bytes_written: out.len(),
            }
        );
    }

    #[test]
    fn test_run_on_empty_input_writes_nothing() {
        let (result, out) = run("");

        assert_eq!(result.unwrap().bytes_written, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_parse_failure_writes_nothing() {
        // Arrange: the sink must never be touched
        let mut sink = MockSink::new();
        sink.expect_write().never();
        sink.expect_flush().never();

        // Act
        let result = RoundTrip::default().run("[a]\nk=1\n[a]\n".as_bytes(), &mut sink);

        // Assert
        assert!(matches!(
            result,
            Err(RoundTripError::Load(LoadError::Parse(
                ParseError::DuplicateSection { line: 3, .. }
            )))
        ));
    }

    #[test]
    fn test_write_failure_is_reported_as_write_error() {
        let mut sink = MockSink::new();
        sink.expect_write()
            .returning(|_| Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed")));
        sink.expect_flush().never();

        let result = RoundTrip::default().run("[a]\nk=1\n".as_bytes(), &mut sink);

        match result {
            Err(RoundTripError::Write(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected a write error, got {other:?}"),
        }
    }

    #[test]
    fn test_flush_failure_is_reported_as_write_error() {
        let mut sink = MockSink::new();
        sink.expect_write().returning(|buf| Ok(buf.len()));
        sink.expect_flush()
            .times(1)
            .returning(|| Err(io::Error::new(io::ErrorKind::Other, "disk full")));

        let result = RoundTrip::default().run("[a]\nk=1\n".as_bytes(), &mut sink);

        assert!(matches!(result, Err(RoundTripError::Write(_))));
    }

    #[test]
    fn test_read_failure_is_reported_as_load_error() {
        let result = RoundTrip::default().run(BrokenReader, Vec::new());

        assert!(matches!(result, Err(RoundTripError::Load(LoadError::Io(_)))));
    }

    #[test]
    fn test_custom_dialect_is_used_for_both_directions() {
        let round_trip = RoundTrip::new(Dialect {
            assignment: "=".to_string(),
            ..Dialect::default()
        });
        let mut out = Vec::new();

        round_trip.run("[a]\nk : v\n".as_bytes(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "[a]\nk=v\n\n");
        assert_eq!(round_trip.dialect().assignment, "=");
    }

    #[test]
    fn test_error_messages_name_the_failure() {
        let (result, _) = run("orphan = 1\n");

        let message = result.unwrap_err().to_string();

        assert!(message.contains("line 1"), "got {message}");
        assert!(message.contains("orphan = 1"), "got {message}");
    }
}
