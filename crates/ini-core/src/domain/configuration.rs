//! Configuration domain entity.
//!
//! A [`Configuration`] holds named [`Section`]s in the order they were first
//! added, plus one *defaults* section (named `DEFAULT` unless overridden)
//! whose entries act as fallbacks for every other section.
//!
//! Keys are case-insensitive: they are normalised to lowercase both when they
//! are inserted and when they are looked up.  Section names are
//! case-sensitive.

use indexmap::map::Entry as MapEntry;
use indexmap::IndexMap;
use thiserror::Error;

use crate::domain::interpolation::{self, InterpolationError};

/// Name of the section whose entries are visible from every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Errors that can occur when adding sections to a [`Configuration`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A section with the same name already exists.
    #[error("section already exists: {0:?}")]
    DuplicateSection(String),

    /// The name belongs to the defaults section, which always exists.
    #[error("section name is reserved for defaults: {0:?}")]
    ReservedSectionName(String),

    /// Section names must contain at least one character.
    #[error("section name must not be empty")]
    EmptySectionName,
}

/// Normalises a key the way every lookup and insert does.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

/// A borrowed key/value pair yielded by [`Section::entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// The normalised (lowercase) key.
    pub key: &'a str,
    /// The raw value.  May be empty and may contain `\n` for folded values.
    pub value: &'a str,
}

/// A named, ordered group of key/value entries.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    entries: IndexMap<String, String>,
}

impl Section {
    /// Creates an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: IndexMap::new(),
        }
    }

    /// The section name as it appeared in its header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets `key` to `value`, returning the previous value if there was one.
    ///
    /// A key that already exists keeps its original position.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> Option<String> {
        self.entries.insert(normalize_key(key), value.into())
    }

    /// Returns the value stored under `key` (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&normalize_key(key)).map(String::as_str)
    }

    /// Returns `true` if `key` (case-insensitive) is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize_key(key))
    }

    /// Iterates over the entries in insertion order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = Entry<'_>> + '_ {
        self.entries.iter().map(|(key, value)| Entry {
            key: key.as_str(),
            value: value.as_str(),
        })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the section holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mutable access to a value by its already-normalised key.
    pub(crate) fn value_mut(&mut self, normalized_key: &str) -> Option<&mut String> {
        self.entries.get_mut(normalized_key)
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality ignores order; sections compare in order.
        self.name == other.name && self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for Section {}

/// An ordered INI configuration.
#[derive(Debug, Clone)]
pub struct Configuration {
    defaults: Section,
    sections: IndexMap<String, Section>,
}

impl Configuration {
    /// Creates an empty configuration whose defaults section is `DEFAULT`.
    pub fn new() -> Self {
        Self::with_default_section(DEFAULT_SECTION)
    }

    /// Creates an empty configuration with a custom defaults section name.
    pub fn with_default_section(name: impl Into<String>) -> Self {
        Self {
            defaults: Section::new(name),
            sections: IndexMap::new(),
        }
    }

    /// Name of the defaults section.
    pub fn default_section_name(&self) -> &str {
        self.defaults.name()
    }

    /// Appends a new, empty section and returns it for population.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptySectionName`] for `""`.
    /// - [`ConfigError::ReservedSectionName`] for the defaults section name.
    /// - [`ConfigError::DuplicateSection`] if the name is already present.
    pub fn add_section(&mut self, name: &str) -> Result<&mut Section, ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::EmptySectionName);
        }
        if name == self.defaults.name() {
            return Err(ConfigError::ReservedSectionName(name.to_owned()));
        }
        match self.sections.entry(name.to_owned()) {
            MapEntry::Occupied(_) => Err(ConfigError::DuplicateSection(name.to_owned())),
            MapEntry::Vacant(slot) => Ok(slot.insert(Section::new(name))),
        }
    }

    /// Returns the named section, creating it at the end if it is missing.
    pub(crate) fn section_or_insert(&mut self, name: &str) -> &mut Section {
        self.sections
            .entry(name.to_owned())
            .or_insert_with(|| Section::new(name))
    }

    /// Looks up a section by name.  The defaults section is not returned here.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Mutable variant of [`Configuration::section`].
    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    /// Returns `true` if a (non-default) section with this name exists.
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Iterates over the sections in order of first appearance.
    pub fn sections(&self) -> impl ExactSizeIterator<Item = &Section> + '_ {
        self.sections.values()
    }

    /// Iterates over the section names in order of first appearance.
    pub fn section_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.sections.keys().map(String::as_str)
    }

    /// The defaults section.
    pub fn defaults(&self) -> &Section {
        &self.defaults
    }

    /// Mutable access to the defaults section.
    pub fn defaults_mut(&mut self) -> &mut Section {
        &mut self.defaults
    }

    /// Number of sections, not counting the defaults section.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` when there are no sections and no defaults.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.defaults.is_empty()
    }

    /// Total number of entries across all sections, defaults included.
    pub fn entry_count(&self) -> usize {
        self.defaults.len() + self.sections.values().map(Section::len).sum::<usize>()
    }

    /// Raw lookup of `key` in `section`, falling back to the defaults.
    ///
    /// `section` may name the defaults section itself.  Returns `None` if the
    /// section does not exist or neither it nor the defaults hold the key.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let own = if section == self.defaults.name() {
            None
        } else {
            Some(self.sections.get(section)?)
        };
        own.and_then(|s| s.get(key))
            .or_else(|| self.defaults.get(key))
    }

    /// Returns `true` if [`Configuration::get`] would find a value.
    pub fn has_option(&self, section: &str, key: &str) -> bool {
        self.get(section, key).is_some()
    }

    /// Looks up `key` and expands `%(name)s` references in its value.
    ///
    /// # Errors
    ///
    /// See [`InterpolationError`].
    pub fn get_interpolated(&self, section: &str, key: &str) -> Result<String, InterpolationError> {
        let raw = self
            .get(section, key)
            .ok_or_else(|| InterpolationError::UnknownOption {
                section: section.to_owned(),
                key: normalize_key(key),
            })?;
        interpolation::expand(self, section, key, raw)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.defaults == other.defaults && self.sections.values().eq(other.sections.values())
    }
}

impl Eq for Configuration {}

// ── Tests ─────────────────────────────────────────────────────────────────────
