//! INI loader: text to [`Configuration`].
//!
//! Input is processed line by line.  Each line is one of:
//!
//! ```text
//! <blank>                 skipped; an open value may still continue after it
//! # comment / ; comment   skipped (column 0, or anywhere when no value is open)
//! rem comment             skipped (leading word `rem`, also `rem=...`)
//!     continued text      indented: appended to the open value as "\n" + text
//! [name]                  section header; [DEFAULT] selects the defaults
//!                         (a repeated header is a duplicate section)
//! key = value             entry; `:` works as well as `=`
//! ```
//!
//! Anything else is a [`ParseError`] carrying the 1-based line number and the
//! raw line.  Loading stops at the first error.

use std::io::Read;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::dialect::Dialect;
use crate::domain::configuration::{normalize_key, ConfigError, Configuration, Section};

/// Malformed INI syntax on a specific line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// An entry (or other non-comment text) appeared before any `[section]` header.
    #[error("line {line}: no section header before {content:?}")]
    MissingSectionHeader { line: usize, content: String },

    /// A line starting with `[` that is not a well-formed header.
    #[error("line {line}: malformed section header {content:?}")]
    MalformedSectionHeader { line: usize, content: String },

    /// A section header repeats an earlier one.
    #[error("line {line}: duplicate section {name:?} in {content:?}")]
    DuplicateSection {
        line: usize,
        name: String,
        content: String,
    },

    /// A line that is neither blank, a comment, a header nor `key = value`.
    #[error("line {line}: expected a section header or `key = value`, got {content:?}")]
    InvalidLine { line: usize, content: String },
}

impl ParseError {
    /// The 1-based line number of the offending line.
    pub fn line(&self) -> usize {
        match self {
            Self::MissingSectionHeader { line, .. }
            | Self::MalformedSectionHeader { line, .. }
            | Self::DuplicateSection { line, .. }
            | Self::InvalidLine { line, .. } => *line,
        }
    }

    /// The raw content of the offending line.
    pub fn content(&self) -> &str {
        match self {
            Self::MissingSectionHeader { content, .. }
            | Self::MalformedSectionHeader { content, .. }
            | Self::DuplicateSection { content, .. }
            | Self::InvalidLine { content, .. } => content,
        }
    }
}

/// Error type for [`read_from`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input could not be read (including input that is not valid UTF-8).
    #[error("failed to read configuration input: {0}")]
    Io(#[from] std::io::Error),

    /// The input was read but is not valid INI.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] ParseError),
}

/// Where entries currently go.
enum Target {
    Defaults,
    Named(String),
}

/// Parses INI text into a [`Configuration`].
///
/// # Errors
///
/// Returns the [`ParseError`] for the first offending line.
///
/// # Examples
///
/// ```rust
/// use ini_core::{parse_str, Dialect};
///
/// let cfg = parse_str("[a]\nKey = value ; note\n", &Dialect::default()).unwrap();
/// assert_eq!(cfg.get("a", "key"), Some("value"));
/// ```
pub fn parse_str(input: &str, dialect: &Dialect) -> Result<Configuration, ParseError> {
    let mut config = Configuration::with_default_section(dialect.default_section.clone());
    let mut target: Option<Target> = None;
    // Normalised key of the entry that indented lines continue.
    let mut open_key: Option<String> = None;
    let mut seen_defaults = false;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;

        if raw.trim().is_empty() || dialect.is_comment(raw) || dialect.is_rem_comment(raw) {
            continue;
        }

        if raw.starts_with(char::is_whitespace) {
            if let (Some(current), Some(key)) = (&target, &open_key) {
                if let Some(value) = current_section(&mut config, current).value_mut(key) {
                    value.push('\n');
                    value.push_str(raw.trim());
                }
                continue;
            }
        }

        let line = raw.trim();
        if dialect.is_comment(line) || dialect.is_rem_comment(line) {
            continue;
        }

        if line.starts_with('[') {
            let name = parse_header(line, dialect).ok_or_else(|| {
                ParseError::MalformedSectionHeader {
                    line: line_no,
                    content: raw.to_owned(),
                }
            })?;
            open_key = None;
            target = Some(open_section(
                &mut config,
                name,
                dialect,
                line_no,
                raw,
                &mut seen_defaults,
            )?);
            continue;
        }

        let Some(current) = &target else {
            return Err(ParseError::MissingSectionHeader {
                line: line_no,
                content: raw.to_owned(),
            });
        };

        let (key, value) = split_entry(line, dialect).ok_or_else(|| ParseError::InvalidLine {
            line: line_no,
            content: raw.to_owned(),
        })?;
        trace!(line = line_no, key, "entry");
        current_section(&mut config, current).insert(key, value);
        open_key = Some(normalize_key(key));
    }

    debug!(
        sections = config.len(),
        entries = config.entry_count(),
        "configuration loaded"
    );
    Ok(config)
}

/// Reads the whole of `reader` and parses it with [`parse_str`].
///
/// # Errors
///
/// Returns [`LoadError::Io`] if reading fails or the input is not UTF-8, and
/// [`LoadError::Parse`] for malformed INI.
pub fn read_from<R: Read>(mut reader: R, dialect: &Dialect) -> Result<Configuration, LoadError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    debug!(bytes = input.len(), "configuration input read");
    Ok(parse_str(&input, dialect)?)
}

/// Handles a `[name]` header and returns the new entry target.
fn open_section(
    config: &mut Configuration,
    name: &str,
    dialect: &Dialect,
    line_no: usize,
    raw: &str,
    seen_defaults: &mut bool,
) -> Result<Target, ParseError> {
    if name == dialect.default_section {
        if *seen_defaults && !dialect.allow_duplicate_sections {
            return Err(ParseError::DuplicateSection {
                line: line_no,
                name: name.to_owned(),
                content: raw.to_owned(),
            });
        }
        *seen_defaults = true;
        debug!(line = line_no, "defaults section");
        return Ok(Target::Defaults);
    }

    match config.add_section(name) {
        Ok(_) => debug!(line = line_no, section = name, "section"),
        Err(ConfigError::DuplicateSection(_)) if dialect.allow_duplicate_sections => {
            warn!(line = line_no, section = name, "merging repeated section");
        }
        Err(ConfigError::DuplicateSection(name)) => {
            return Err(ParseError::DuplicateSection {
                line: line_no,
                name,
                content: raw.to_owned(),
            });
        }
        Err(ConfigError::ReservedSectionName(_) | ConfigError::EmptySectionName) => {
            return Err(ParseError::MalformedSectionHeader {
                line: line_no,
                content: raw.to_owned(),
            });
        }
    }
    Ok(Target::Named(name.to_owned()))
}

fn current_section<'c>(config: &'c mut Configuration, target: &Target) -> &'c mut Section {
    match target {
        Target::Defaults => config.defaults_mut(),
        Target::Named(name) => config.section_or_insert(name),
    }
}

/// Extracts the trimmed name from `[name]`, allowing a trailing comment.
fn parse_header<'l>(line: &'l str, dialect: &Dialect) -> Option<&'l str> {
    let body = line.strip_prefix('[')?;
    let close = body.find(']')?;
    let name = body[..close].trim();
    let trailer = body[close + 1..].trim_start();
    if name.is_empty() || !(trailer.is_empty() || dialect.is_comment(trailer)) {
        return None;
    }
    Some(name)
}

/// Splits a trimmed `key <delim> value` line.
fn split_entry<'l>(line: &'l str, dialect: &Dialect) -> Option<(&'l str, &'l str)> {
    let split = line.find(|c: char| dialect.is_delimiter(c))?;
    let key = line[..split].trim_end();
    if key.is_empty() {
        return None;
    }
    let delimiter_len = line[split..].chars().next()?.len_utf8();
    let value = dialect.strip_inline_comment(line[split + delimiter_len..].trim());
    // An explicitly quoted empty value.
    let value = if value == "\"\"" { "" } else { value };
    Some((key, value))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
