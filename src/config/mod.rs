//! Configuration module for huecurve
//!
//! Provides types, discovery and parsing for `huecurve.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
