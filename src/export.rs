//! Export document for generated palettes
//!
//! The document consumed by external templating looks like:
//!
//! ```json
//! {
//!   "color-1": { "100": "#fdf2ef", "200": "#fbe0d8" },
//!   "color-2": { "100": "#effcf4" }
//! }
//! ```
//!
//! Palettes are numbered from 1 and keys keep generation order.

use serde_json::{Map, Value};

use crate::models::Swatch;

/// Build the `{ "color-N": { id: hex } }` document.
pub fn group_palettes_by_name(palettes: &[Vec<Swatch>]) -> Value {
    let document: Map<String, Value> = palettes
        .iter()
        .enumerate()
        .map(|(i, palette)| {
            let swatches: Map<String, Value> = palette
                .iter()
                .map(|swatch| (swatch.id.clone(), Value::String(swatch.hex.clone())))
                .collect();
            (format!("color-{}", i + 1), Value::Object(swatches))
        })
        .collect();
    Value::Object(document)
}

/// Render the export document as JSON text.
pub fn to_json(palettes: &[Vec<Swatch>], pretty: bool) -> Result<String, serde_json::Error> {
    let document = group_palettes_by_name(palettes);
    if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
}
