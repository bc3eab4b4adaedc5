//! Huecurve - Library for curve-based color palette generation
//!
//! This library provides functionality to:
//! - Generate palettes by sampling hue, saturation and lightness along cubic-bezier curves
//! - Match reference colors to their closest generated swatch
//! - Manage an editable set of palette definitions
//! - Encode the editing state into compact, shareable URLs

pub mod cli;
pub mod codec;
pub mod color;
pub mod config;
pub mod easing;
pub mod export;
pub mod generator;
pub mod matcher;
pub mod models;
pub mod palette_set;
pub mod session;
