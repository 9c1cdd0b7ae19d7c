//! Domain model for INI configurations.
//!
//! Nothing in here knows about text.  The loader in [`crate::codec`] builds
//! these types from input lines and the writer walks them to produce output.

/// Sections, entries and the defaults section.
pub mod configuration;

/// `%(name)s` expansion on top of [`configuration::Configuration::get`].
pub mod interpolation;
