//! Text codec: INI text to [`crate::Configuration`] and back.

pub mod reader;
pub mod writer;

pub use reader::{parse_str, read_from, LoadError, ParseError};
pub use writer::{render, write_to};
