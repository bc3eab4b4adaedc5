//! Nearest-swatch matching for reference colors
//!
//! Reference colors come from the comma separated `refColorsRaw` setting.
//! Each one is matched against every swatch of every palette, and the result
//! maps the winning swatch hex to the reference hex.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::color::{format_color, is_hex_color, to_hex, Color, ColorMath, ColorSpace};
use crate::models::{ReferenceColor, Swatch};

/// Parse `refColorsRaw` into reference colors.
///
/// Tokens are split on `,` and trimmed; anything that is not a `#RGB` or
/// `#RRGGBB` hex is dropped. Hex values are normalised to `#rrggbb`.
pub fn parse_reference_colors<M: ColorMath + ?Sized>(
    raw: &str,
    space: ColorSpace,
    math: &M,
) -> Vec<ReferenceColor> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| {
            let valid = is_hex_color(token);
            if !valid && !token.is_empty() {
                debug!(token, "dropping invalid reference color");
            }
            valid
        })
        .filter_map(|token| Color::from_hex(token).ok())
        .map(|color| ReferenceColor {
            hex: to_hex(math, &color),
            string: format_color(math, &color, space),
            color,
        })
        .collect()
}

/// Find the swatch closest to `reference` across all palettes.
///
/// Ties go to the first swatch reaching the minimum distance.
pub fn nearest_swatch<'a, M: ColorMath + ?Sized>(
    reference: &Color,
    palettes: &'a [Vec<Swatch>],
    math: &M,
) -> Option<(&'a Swatch, f64)> {
    let mut best: Option<(&Swatch, f64)> = None;
    for swatch in palettes.iter().flatten() {
        let distance = math.distance(reference, &swatch.color);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((swatch, distance)),
        }
    }
    best
}

/// Map each winning swatch hex to the reference hex that chose it.
///
/// References are deduplicated by hex, first occurrence first. When two
/// references land on the same swatch, the one processed later owns the entry.
pub fn nearest_reference_colors<M: ColorMath + ?Sized>(
    references: &[ReferenceColor],
    palettes: &[Vec<Swatch>],
    math: &M,
) -> HashMap<String, String> {
    let mut seen = HashSet::new();
    let mut matches = HashMap::new();

    for reference in references {
        if !seen.insert(reference.hex.as_str()) {
            continue;
        }
        if let Some((swatch, distance)) = nearest_swatch(&reference.color, palettes, math) {
            debug!(reference = %reference.hex, swatch = %swatch.hex, distance, "matched reference color");
            matches.insert(swatch.hex.clone(), reference.hex.clone());
        }
    }

    matches
}
