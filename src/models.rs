//! Data models for palette parameters, settings and generated swatches

use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorSpace};
use crate::easing::{EasingSpec, QUAD_IN, QUAD_OUT};

/// Default number of swatches per palette.
pub const DEFAULT_STEPS: usize = 9;
/// Saturation rate (percent) applied when a curve carries none.
pub const DEFAULT_SATURATION_RATE: f64 = 130.0;
/// Upper bound on the number of palettes in a set.
pub const MAX_NUM_OF_PALETTES: usize = 6;
/// Upper bound on swatches per palette.
pub const MAX_STEPS: usize = 100;

/// Editor ranges for curve parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Limits {
    pub hue: (f64, f64),
    pub sat: (f64, f64),
    pub lig: (f64, f64),
    pub rate: (f64, f64),
    /// Input granularity for the sliders that edit these values.
    pub resolution: f64,
}

pub const LIMITS: Limits = Limits {
    hue: (0.0, 360.0),
    sat: (0.0, 100.0),
    lig: (0.0, 100.0),
    rate: (0.0, 200.0),
    resolution: 0.25,
};

impl Limits {
    /// Describe every curve value of `def` that lies outside these ranges.
    ///
    /// Values outside the ranges still generate; the editor just cannot
    /// produce them.
    pub fn violations(&self, def: &PaletteDefinition) -> Vec<String> {
        let mut out = Vec::new();
        let channels = [("hue", &def.hue, self.hue), ("sat", &def.sat, self.sat), ("lig", &def.lig, self.lig)];
        for (name, curve, (lo, hi)) in channels {
            for (end, value) in [("start", curve.start), ("end", curve.end)] {
                if !(lo..=hi).contains(&value) {
                    out.push(format!("{}.{} = {} is outside [{}, {}]", name, end, value, lo, hi));
                }
            }
        }
        if let Some(rate) = def.sat.rate {
            let (lo, hi) = self.rate;
            if !(lo..=hi).contains(&rate) {
                out.push(format!("sat.rate = {} is outside [{}, {}]", rate, lo, hi));
            }
        }
        out
    }
}

/// Start/end values of one channel plus the easing between them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelCurve {
    pub start: f64,
    pub end: f64,
    pub ease: EasingSpec,
    /// Hue only: take the short way through 0° when `start > end`.
    #[serde(
        rename = "interpolateHueOver360",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub interpolate_hue_over_360: Option<bool>,
    /// Saturation only: rescale factor in percent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rate: Option<f64>,
}

impl ChannelCurve {
    pub fn new(start: f64, end: f64, ease: impl Into<EasingSpec>) -> Self {
        Self { start, end, ease: ease.into(), interpolate_hue_over_360: None, rate: None }
    }

    pub fn with_hue_wrap(mut self, wrap: bool) -> Self {
        self.interpolate_hue_over_360 = Some(wrap);
        self
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }
}

/// One palette: a curve per hue, saturation and lightness channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaletteDefinition {
    pub hue: ChannelCurve,
    pub sat: ChannelCurve,
    pub lig: ChannelCurve,
}

/// The palette set plus the current selection.
///
/// Missing fields in a decoded state fall back to the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PaletteParameterSet {
    pub steps: usize,
    pub palette_index: usize,
    pub swatch_index: usize,
    pub max_num_of_palettes: usize,
    pub params: Vec<PaletteDefinition>,
}

impl PaletteParameterSet {
    /// Built-in palettes with a custom step count and capacity.
    pub fn with_limits(steps: usize, max_num_of_palettes: usize) -> Self {
        let steps = steps.max(1);
        let max_num_of_palettes = max_num_of_palettes.max(1);
        let mut params = default_palettes();
        params.truncate(max_num_of_palettes);
        Self { steps, palette_index: 0, swatch_index: steps / 2, max_num_of_palettes, params }
    }

    /// The currently selected palette definition.
    pub fn selected(&self) -> Option<&PaletteDefinition> {
        self.params.get(self.palette_index)
    }
}

impl Default for PaletteParameterSet {
    fn default() -> Self {
        Self::with_limits(DEFAULT_STEPS, MAX_NUM_OF_PALETTES)
    }
}

/// The palettes a fresh session starts with.
pub fn default_palettes() -> Vec<PaletteDefinition> {
    vec![
        PaletteDefinition {
            hue: ChannelCurve::new(16.0, 27.0, QUAD_IN).with_hue_wrap(false),
            sat: ChannelCurve::new(45.0, 88.0, QUAD_OUT).with_rate(DEFAULT_SATURATION_RATE),
            lig: ChannelCurve::new(98.75, 12.0, "0.4,0.64,0.6,0.91"),
        },
        PaletteDefinition {
            hue: ChannelCurve::new(150.0, 139.0, QUAD_IN).with_hue_wrap(false),
            sat: ChannelCurve::new(44.0, 81.0, QUAD_OUT).with_rate(DEFAULT_SATURATION_RATE),
            lig: ChannelCurve::new(99.0, 12.0, "0.51,0.93,0.89,1"),
        },
        PaletteDefinition {
            hue: ChannelCurve::new(235.0, 250.0, QUAD_IN).with_hue_wrap(false),
            sat: ChannelCurve::new(44.0, 81.0, QUAD_OUT).with_rate(125.0),
            lig: ChannelCurve::new(99.0, 12.0, QUAD_OUT),
        },
    ]
}

/// Display and matching settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub overlay_contrast: bool,
    pub overlay_hex: bool,
    pub overlay_rgb: bool,
    /// Comma separated hex colors to match against the generated swatches.
    pub ref_colors_raw: String,
    pub color_space: ColorSpace,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            overlay_contrast: false,
            overlay_hex: true,
            overlay_rgb: false,
            ref_colors_raw: String::new(),
            color_space: ColorSpace::Okhsl,
        }
    }
}

/// Everything that goes into a share link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SharedState {
    pub settings: Settings,
    pub palette_params: PaletteParameterSet,
}

/// One generated color with its derived metrics.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Swatch {
    pub id: String,
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub hex: String,
    pub rgb: String,
    pub chroma: f64,
    pub luminance: f64,
    pub white_contrast: f64,
    pub black_contrast: f64,
    /// Color formatted in the active color space.
    pub string: String,
    #[serde(skip)]
    pub color: Color,
}

/// A swatch tagged with the palette it came from, for id-wise grouping.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupedSwatch {
    pub palette_index: usize,
    pub swatch_id: String,
    #[serde(flatten)]
    pub swatch: Swatch,
}

/// A validated reference color from `refColorsRaw`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReferenceColor {
    pub hex: String,
    pub string: String,
    #[serde(skip)]
    pub color: Color,
}
