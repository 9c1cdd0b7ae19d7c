//! INI writer: [`Configuration`] to text.
//!
//! Output layout:
//!
//! ```text
//! [DEFAULT]            only when there are defaults
//! key = value
//!
//! [section]            every section, in stored order
//! key = first line
//! 	continued line     embedded newlines become indented continuation lines
//!
//! ```
//!
//! Every section block, the last one included, ends with a blank line.
//! Comments and original whitespace are not preserved.

use std::fmt;
use std::io::{self, Write};

use crate::dialect::Dialect;
use crate::domain::configuration::{Configuration, Section};

/// Formats a configuration under a dialect.
struct Rendered<'a> {
    config: &'a Configuration,
    dialect: &'a Dialect,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.config.defaults().is_empty() {
            write_section(f, self.config.defaults(), self.dialect)?;
        }
        for section in self.config.sections() {
            write_section(f, section, self.dialect)?;
        }
        Ok(())
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, section: &Section, dialect: &Dialect) -> fmt::Result {
    writeln!(f, "[{}]", section.name())?;
    for entry in section.entries() {
        write!(f, "{}{}", entry.key, dialect.assignment)?;
        for (index, line) in entry.value.split('\n').enumerate() {
            if index > 0 {
                write!(f, "\n{}", dialect.continuation_indent)?;
            }
            f.write_str(line)?;
        }
        writeln!(f)?;
    }
    writeln!(f)
}

/// Renders `config` to a string.
///
/// # Examples
///
/// ```rust
/// use ini_core::{render, Configuration, Dialect};
///
/// let mut cfg = Configuration::new();
/// cfg.add_section("a").unwrap().insert("key", "value");
/// assert_eq!(render(&cfg, &Dialect::default()), "[a]\nkey = value\n\n");
/// ```
pub fn render(config: &Configuration, dialect: &Dialect) -> String {
    Rendered { config, dialect }.to_string()
}

/// Writes `config` to `out`.  The stream is neither flushed nor closed.
///
/// # Errors
///
/// Propagates any I/O error from `out`.
pub fn write_to<W: Write>(config: &Configuration, dialect: &Dialect, mut out: W) -> io::Result<()> {
    write!(out, "{}", Rendered { config, dialect })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
