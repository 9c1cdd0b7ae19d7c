//! Application layer use cases.
//!
//! - **`round_trip`** – Loads a configuration from any reader and writes it
//!   back to any writer.  It knows nothing about stdin or stdout; the
//!   infrastructure layer binds it to the process streams.

pub mod round_trip;
