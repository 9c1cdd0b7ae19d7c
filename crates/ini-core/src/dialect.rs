//! INI dialect settings shared by the loader and the writer.
//!
//! [`Dialect::default`] is the reference dialect: `=` and `:` delimiters,
//! `#`/`;` full-line comments, `;` inline comments, `rem` comment lines, a
//! `DEFAULT` section, duplicate section headers rejected, and `key = value`
//! output with tab-indented continuation lines.
//!
//! The struct is serde-enabled so an embedding application can keep its
//! dialect in a settings file.  Every field has a default, so a partial file
//! only overrides what it names:
//!
//! ```toml
//! delimiters = ["="]
//! allow_duplicate_sections = true
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::configuration::DEFAULT_SECTION;

/// Syntax knobs for reading and writing INI text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dialect {
    /// Characters that separate a key from its value.  The first one found wins.
    #[serde(default = "default_delimiters")]
    pub delimiters: Vec<char>,
    /// Characters that start a full-line comment.
    #[serde(default = "default_comment_prefixes")]
    pub comment_prefixes: Vec<char>,
    /// Characters that start an inline comment after a value.
    #[serde(default = "default_inline_comment_prefixes")]
    pub inline_comment_prefixes: Vec<char>,
    /// Treat lines that start with the word `rem` as comments.
    #[serde(default = "default_true")]
    pub rem_comments: bool,
    /// Name of the section that supplies defaults to every other section.
    #[serde(default = "default_section")]
    pub default_section: String,
    /// Merge a repeated section header into the earlier section instead of failing.
    #[serde(default)]
    pub allow_duplicate_sections: bool,
    /// Separator the writer puts between key and value.
    #[serde(default = "default_assignment")]
    pub assignment: String,
    /// Prefix the writer puts in front of each continuation line.
    #[serde(default = "default_continuation_indent")]
    pub continuation_indent: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_delimiters() -> Vec<char> {
    vec!['=', ':']
}
fn default_comment_prefixes() -> Vec<char> {
    vec!['#', ';']
}
fn default_inline_comment_prefixes() -> Vec<char> {
    vec![';']
}
fn default_true() -> bool {
    true
}
fn default_section() -> String {
    DEFAULT_SECTION.to_string()
}
fn default_assignment() -> String {
    " = ".to_string()
}
fn default_continuation_indent() -> String {
    "\t".to_string()
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiters: default_delimiters(),
            comment_prefixes: default_comment_prefixes(),
            inline_comment_prefixes: default_inline_comment_prefixes(),
            rem_comments: default_true(),
            default_section: default_section(),
            allow_duplicate_sections: false,
            assignment: default_assignment(),
            continuation_indent: default_continuation_indent(),
        }
    }
}

// ── Line predicates ───────────────────────────────────────────────────────────

impl Dialect {
    /// Returns `true` if `c` separates a key from its value.
    pub fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(&c)
    }

    /// Returns `true` if `text` begins with a full-line comment prefix.
    pub fn is_comment(&self, text: &str) -> bool {
        text.starts_with(|c: char| self.comment_prefixes.contains(&c))
    }

    /// Returns `true` for a `rem` comment line.
    ///
    /// The line must start with `rem` in any case, ended by whitespace, a
    /// delimiter or the end of the line.  `remote = x` is an entry, while
    /// `REM note`, `rem = 1` and `REM=1` are comments, so `rem` can never be
    /// loaded as a key.  Indented text qualifies only once the loader has
    /// trimmed it.
    pub fn is_rem_comment(&self, text: &str) -> bool {
        if !self.rem_comments || !text.starts_with(['r', 'R']) {
            return false;
        }
        let word_end = text
            .find(|c: char| c.is_whitespace() || self.is_delimiter(c))
            .unwrap_or(text.len());
        text[..word_end].eq_ignore_ascii_case("rem")
    }

    /// Cuts an inline comment off a trimmed value.
    ///
    /// Only the first inline prefix is considered, and it only starts a comment
    /// when whitespace precedes it: `a ; b` becomes `a`, `a;b` stays as is.
    pub fn strip_inline_comment<'v>(&self, value: &'v str) -> &'v str {
        match value
            .char_indices()
            .find(|(_, c)| self.inline_comment_prefixes.contains(c))
        {
            Some((pos, _)) if value[..pos].ends_with(char::is_whitespace) => value[..pos].trim_end(),
            _ => value,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
