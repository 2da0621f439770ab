// src/errors.rs

//! Crate-wide error aliases.
//!
//! Currently a thin wrapper around `anyhow`; this module is the single place
//! to introduce more structured error types later.

pub use anyhow::{Error, Result};
