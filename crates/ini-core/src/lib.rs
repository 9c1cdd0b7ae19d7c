//! # ini-core
//!
//! Ordered INI configuration model together with a loader and a writer for
//! the classic `ConfigParser` dialect.
//!
//! The crate has no process or stdio concerns: it turns text into a
//! [`Configuration`] and a [`Configuration`] back into text.
//!
//! # Architecture overview
//!
//! - **`domain`** – The in-memory model.  A [`Configuration`] is an ordered
//!   collection of [`Section`]s plus a *defaults* section whose entries are
//!   visible from every other section.  Keys are case-insensitive.
//!
//! - **`dialect`** – The knobs of the INI syntax (delimiters, comment markers,
//!   the defaults section name, writer formatting).  [`Dialect::default`] is
//!   the reference dialect.
//!
//! - **`codec`** – The loader ([`parse_str`], [`read_from`]) and the writer
//!   ([`render`], [`write_to`]).  Loading then writing a configuration and
//!   loading the result again yields an equal [`Configuration`].

pub mod codec;
pub mod dialect;
pub mod domain;

pub use codec::reader::{parse_str, read_from, LoadError, ParseError};
pub use codec::writer::{render, write_to};
pub use dialect::Dialect;
pub use domain::configuration::{ConfigError, Configuration, Entry, Section, DEFAULT_SECTION};
pub use domain::interpolation::{InterpolationError, MAX_INTERPOLATION_DEPTH};
