//! Curve-driven palette generation
//!
//! Each palette definition becomes `steps` swatches. For a channel running
//! from `start` to `end`, step `i` (1-based) takes the value
//!
//! ```text
//! unit = (end - start) / steps
//! value_i = start + ease(i / steps) * i * unit
//! ```
//!
//! The eased fraction is multiplied by the raw step index, which compounds
//! toward the end of the range; the last step always lands on `end`.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::color::{format_color, to_hex, to_rgb_string, Color, ColorMath, ColorSpace};
use crate::easing::{resolve, CubicBezier, EaseError};
use crate::models::{
    ChannelCurve, GroupedSwatch, PaletteDefinition, PaletteParameterSet, Settings, Swatch,
    DEFAULT_SATURATION_RATE,
};

/// Error type for palette generation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// A channel carries a malformed easing spec
    #[error("palette {palette}, {channel} channel: {source}")]
    Ease {
        palette: usize,
        channel: &'static str,
        #[source]
        source: EaseError,
    },
}

/// Value of a channel at 1-based `step` out of `steps`.
pub fn step_value(start: f64, end: f64, ease: &CubicBezier, step: usize, steps: usize) -> f64 {
    let unit = (end - start) / steps as f64;
    start + ease.ease(step as f64 / steps as f64) * step as f64 * unit
}

/// Swatch id for 1-based `step`: multiples of 100, or of 10 past nine steps.
pub fn swatch_id(step: usize, steps: usize) -> String {
    let spacing = if steps > 9 { 10 } else { 100 };
    (step * spacing).to_string()
}

/// A channel curve with its easing resolved.
struct Channel<'a> {
    curve: &'a ChannelCurve,
    ease: CubicBezier,
    end: f64,
}

impl<'a> Channel<'a> {
    fn new(curve: &'a ChannelCurve, end: f64, palette: usize, name: &'static str) -> Result<Self, GenerateError> {
        let ease = resolve(&curve.ease)
            .map_err(|source| GenerateError::Ease { palette, channel: name, source })?;
        Ok(Self { curve, ease, end })
    }

    fn value(&self, step: usize, steps: usize) -> f64 {
        step_value(self.curve.start, self.end, &self.ease, step, steps)
    }
}

/// Generate the swatches of one palette definition.
///
/// `palette` is only used to label errors.
pub fn generate_palette<M: ColorMath + ?Sized>(
    definition: &PaletteDefinition,
    palette: usize,
    steps: usize,
    space: ColorSpace,
    math: &M,
) -> Result<Vec<Swatch>, GenerateError> {
    let PaletteDefinition { hue, sat, lig } = definition;

    let wrap_hue = hue.interpolate_hue_over_360.unwrap_or(false) && hue.start > hue.end;
    let hue_end = if wrap_hue { 360.0 + hue.end } else { hue.end };
    let rate = sat.rate.unwrap_or(DEFAULT_SATURATION_RATE);

    let hue = Channel::new(hue, hue_end, palette, "hue")?;
    let sat = Channel::new(sat, sat.end, palette, "sat")?;
    let lig = Channel::new(lig, lig.end, palette, "lig")?;

    let white = Color::white();
    let black = Color::black();

    let swatches = (1..=steps)
        .map(|step| {
            let mut h = hue.value(step, steps);
            if wrap_hue {
                h = h.rem_euclid(360.0);
            }
            let s = (sat.value(step, steps) * (rate / 100.0)).min(100.0);
            let l = lig.value(step, steps);

            let color = Color::from_hsl(space, h, s, l);
            Swatch {
                id: swatch_id(step, steps),
                h,
                s,
                l,
                hex: to_hex(math, &color),
                rgb: to_rgb_string(math, &color),
                chroma: math.chroma(&color),
                luminance: math.luminance(&color),
                white_contrast: math.contrast_ratio(&color, &white),
                black_contrast: math.contrast_ratio(&color, &black),
                string: format_color(math, &color, space),
                color,
            }
        })
        .collect();

    Ok(swatches)
}

/// Generate every palette of the set, in definition order.
pub fn generate_palettes<M: ColorMath + ?Sized>(
    params: &PaletteParameterSet,
    settings: &Settings,
    math: &M,
) -> Result<Vec<Vec<Swatch>>, GenerateError> {
    params
        .params
        .iter()
        .enumerate()
        .map(|(i, definition)| generate_palette(definition, i, params.steps, settings.color_space, math))
        .collect()
}

/// Group swatches across palettes by id, ordered by numeric id.
pub fn group_by_id(palettes: &[Vec<Swatch>]) -> Vec<Vec<GroupedSwatch>> {
    let mut groups: BTreeMap<u64, Vec<GroupedSwatch>> = BTreeMap::new();
    for (palette_index, palette) in palettes.iter().enumerate() {
        for swatch in palette {
            let key = swatch.id.parse().unwrap_or(u64::MAX);
            groups.entry(key).or_default().push(GroupedSwatch {
                palette_index,
                swatch_id: swatch.id.clone(),
                swatch: swatch.clone(),
            });
        }
    }
    groups.into_values().collect()
}
