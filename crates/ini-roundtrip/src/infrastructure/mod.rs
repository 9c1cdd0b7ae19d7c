//! Infrastructure layer: binds the use cases to the process.
//!
//! **Dependency rule**: this layer may depend on `application` and `ini_core`,
//! but MUST NOT be imported by the `application` layer.

pub mod stdio;
