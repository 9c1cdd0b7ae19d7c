//! `%(name)s` value interpolation.
//!
//! A value may refer to other keys of the same section (or of the defaults
//! section) with `%(name)s`.  References are expanded recursively; `%%`
//! produces a literal `%`.  Interpolation only happens on read through
//! [`Configuration::get_interpolated`]; stored and written values stay raw.
//!
//! ```rust
//! use ini_core::Configuration;
//!
//! let mut cfg = Configuration::new();
//! cfg.defaults_mut().insert("root", "/srv");
//! cfg.add_section("app").unwrap().insert("logs", "%(root)s/logs at 100%%");
//!
//! assert_eq!(cfg.get_interpolated("app", "logs").unwrap(), "/srv/logs at 100%");
//! ```

use thiserror::Error;

use crate::domain::configuration::{normalize_key, Configuration};

/// Maximum nesting of `%(name)s` references before expansion gives up.
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Errors raised while expanding a value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterpolationError {
    /// The requested option does not exist in the section or the defaults.
    #[error("no option {key:?} in section {section:?}")]
    UnknownOption { section: String, key: String },

    /// A `%(name)s` reference names a key that does not exist.
    #[error("option {key:?} in section {section:?} references missing option {reference:?}")]
    MissingReference {
        section: String,
        key: String,
        reference: String,
    },

    /// References nest deeper than [`MAX_INTERPOLATION_DEPTH`] (usually a cycle).
    #[error("option {key:?} in section {section:?} nests references deeper than {}", MAX_INTERPOLATION_DEPTH)]
    DepthExceeded { section: String, key: String },

    /// A `%` that is neither `%%` nor a complete `%(name)s`.
    #[error("option {key:?} in section {section:?} has a bad '%' at {fragment:?}")]
    Syntax {
        section: String,
        key: String,
        fragment: String,
    },
}

/// Expands `raw`, the value of `key` in `section`.
pub(crate) fn expand(
    config: &Configuration,
    section: &str,
    key: &str,
    raw: &str,
) -> Result<String, InterpolationError> {
    expand_at_depth(config, section, key, raw, 1)
}

fn expand_at_depth(
    config: &Configuration,
    section: &str,
    key: &str,
    raw: &str,
    depth: usize,
) -> Result<String, InterpolationError> {
    if depth > MAX_INTERPOLATION_DEPTH {
        return Err(InterpolationError::DepthExceeded {
            section: section.to_owned(),
            key: normalize_key(key),
        });
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("%%") {
            out.push('%');
            rest = after;
        } else if let Some(body) = tail.strip_prefix("%(") {
            let close = body
                .find(")s")
                .ok_or_else(|| syntax_error(section, key, tail))?;
            let reference = normalize_key(&body[..close]);
            let value = config.get(section, &reference).ok_or_else(|| {
                InterpolationError::MissingReference {
                    section: section.to_owned(),
                    key: normalize_key(key),
                    reference: reference.clone(),
                }
            })?;
            out.push_str(&expand_at_depth(config, section, key, value, depth + 1)?);
            rest = &body[close + 2..];
        } else {
            return Err(syntax_error(section, key, tail));
        }
    }
    out.push_str(rest);
    Ok(out)
}

fn syntax_error(section: &str, key: &str, fragment: &str) -> InterpolationError {
    InterpolationError::Syntax {
        section: section.to_owned(),
        key: normalize_key(key),
        fragment: fragment.to_owned(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
