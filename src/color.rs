//! Color values and the color math capability
//!
//! Generation and matching never do color math directly. They go through the
//! [`ColorMath`] trait, which converts between models and measures contrast,
//! distance, chroma and luminance. [`PaletteMath`] is the production
//! implementation on top of the `palette` crate; tests may plug in stubs.
//!
//! Hex input follows `^#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})$`.

use palette::convert::FromColorUnclamped;
use palette::white_point::D65;
use palette::{encoding, Clamp, Hsl, Hsluv, IsWithinBounds, Okhsl, Oklab, Oklch, Srgb, Xyz};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

const GAMUT_ITERATIONS: usize = 24;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3 or 6 hex chars after #)
    #[error("invalid color length {0}, expected 3 or 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// Unknown color space name
    #[error("unknown color space '{0}', expected okhsl, hsluv or hsl")]
    UnknownSpace(String),
}

/// Hue/saturation/lightness model a palette is generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    #[default]
    Okhsl,
    Hsluv,
    Hsl,
}

impl ColorSpace {
    pub const ALL: [ColorSpace; 3] = [ColorSpace::Okhsl, ColorSpace::Hsluv, ColorSpace::Hsl];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorSpace::Okhsl => "okhsl",
            ColorSpace::Hsluv => "hsluv",
            ColorSpace::Hsl => "hsl",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorSpace {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorSpace::ALL
            .into_iter()
            .find(|space| space.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ColorError::UnknownSpace(s.to_string()))
    }
}

/// Every model a [`Color`] can carry coordinates in.
///
/// Coordinate conventions:
/// - `Srgb`: red, green, blue in `[0, 1]`
/// - `Oklab`: l, a, b
/// - `Oklch`: l, chroma, hue degrees
/// - `Xyz`: D65 x, y, z with white at y = 1
/// - `Okhsl`, `Hsluv`, `Hsl`: hue degrees, saturation %, lightness %
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Space {
    Srgb,
    Oklab,
    Oklch,
    Xyz,
    Okhsl,
    Hsluv,
    Hsl,
}

impl From<ColorSpace> for Space {
    fn from(space: ColorSpace) -> Self {
        match space {
            ColorSpace::Okhsl => Space::Okhsl,
            ColorSpace::Hsluv => Space::Hsluv,
            ColorSpace::Hsl => Space::Hsl,
        }
    }
}

/// A color as coordinates in some model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub space: Space,
    pub coords: [f64; 3],
}

impl Color {
    pub fn new(space: Space, coords: [f64; 3]) -> Self {
        Self { space, coords }
    }

    /// Build a color from hue (degrees), saturation (%) and lightness (%).
    pub fn from_hsl(space: ColorSpace, h: f64, s: f64, l: f64) -> Self {
        Self::new(space.into(), [h, s, l])
    }

    pub fn srgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(Space::Srgb, [r, g, b])
    }

    pub fn white() -> Self {
        Self::srgb(1.0, 1.0, 1.0)
    }

    pub fn black() -> Self {
        Self::srgb(0.0, 0.0, 0.0)
    }

    /// Parse a `#RGB` or `#RRGGBB` hex string into an sRGB color.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let [r, g, b] = parse_hex(s)?;
        Ok(Self::srgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0))
    }
}

/// Color math capability used by generation and matching.
pub trait ColorMath {
    /// Convert a color into another model, without gamut mapping.
    fn to_model(&self, color: &Color, space: Space) -> Color;

    /// WCAG 2.1 contrast ratio between two colors, always `>= 1`.
    fn contrast_ratio(&self, a: &Color, b: &Color) -> f64;

    /// Perceptual distance between two colors.
    fn distance(&self, a: &Color, b: &Color) -> f64;

    fn chroma(&self, color: &Color) -> f64;

    /// Relative luminance (CIE Y, white = 1).
    fn luminance(&self, color: &Color) -> f64;

    /// Project a color into the displayable sRGB gamut.
    ///
    /// Not one of the five model operations. The default converts with
    /// [`to_model`](Self::to_model) and clamps each channel to `[0, 1]`
    /// (NaN becomes 0), so stub implementations get a plain clamp.
    /// [`PaletteMath`] overrides it with chroma reduction.
    fn to_srgb_gamut(&self, color: &Color) -> [f64; 3] {
        self.to_model(color, Space::Srgb).coords.map(|c| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) })
    }
}

/// `ColorMath` backed by the `palette` crate.
///
/// Distance is Euclidean in Oklab (deltaE OK), chroma is Oklch chroma and
/// gamut mapping reduces Oklch chroma at constant lightness and hue.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaletteMath;

impl PaletteMath {
    fn to_xyz(color: &Color) -> Xyz<D65, f64> {
        let [a, b, c] = color.coords;
        match color.space {
            Space::Srgb => Xyz::from_color_unclamped(Srgb::<f64>::new(a, b, c)),
            Space::Oklab => Xyz::from_color_unclamped(Oklab::<f64>::new(a, b, c)),
            Space::Oklch => Xyz::from_color_unclamped(Oklch::<f64>::new(a, b, c)),
            Space::Xyz => Xyz::<D65, f64>::new(a, b, c),
            Space::Okhsl => Xyz::from_color_unclamped(Okhsl::<f64>::new(a, b / 100.0, c / 100.0)),
            Space::Hsluv => Xyz::from_color_unclamped(Hsluv::<D65, f64>::new(a, b, c)),
            Space::Hsl => {
                Xyz::from_color_unclamped(Hsl::<encoding::Srgb, f64>::new(a, b / 100.0, c / 100.0))
            }
        }
    }

    fn from_xyz(xyz: Xyz<D65, f64>, space: Space) -> Color {
        let coords = match space {
            Space::Srgb => {
                let rgb = Srgb::<f64>::from_color_unclamped(xyz);
                [rgb.red, rgb.green, rgb.blue]
            }
            Space::Oklab => {
                let lab = Oklab::<f64>::from_color_unclamped(xyz);
                [lab.l, lab.a, lab.b]
            }
            Space::Oklch => {
                let lch = Oklch::<f64>::from_color_unclamped(xyz);
                [lch.l, lch.chroma, lch.hue.into_positive_degrees()]
            }
            Space::Xyz => [xyz.x, xyz.y, xyz.z],
            Space::Okhsl => {
                let hsl = Okhsl::<f64>::from_color_unclamped(xyz);
                [hsl.hue.into_positive_degrees(), hsl.saturation * 100.0, hsl.lightness * 100.0]
            }
            Space::Hsluv => {
                let hsluv = Hsluv::<D65, f64>::from_color_unclamped(xyz);
                [hsluv.hue.into_positive_degrees(), hsluv.saturation, hsluv.l]
            }
            Space::Hsl => {
                let hsl = Hsl::<encoding::Srgb, f64>::from_color_unclamped(xyz);
                [hsl.hue.into_positive_degrees(), hsl.saturation * 100.0, hsl.lightness * 100.0]
            }
        };
        Color::new(space, coords)
    }

    fn to_oklab(color: &Color) -> Oklab<f64> {
        Oklab::from_color_unclamped(Self::to_xyz(color))
    }
}

impl ColorMath for PaletteMath {
    fn to_model(&self, color: &Color, space: Space) -> Color {
        if color.space == space {
            return *color;
        }
        Self::from_xyz(Self::to_xyz(color), space)
    }

    fn contrast_ratio(&self, a: &Color, b: &Color) -> f64 {
        let la = self.luminance(a).max(0.0);
        let lb = self.luminance(b).max(0.0);
        let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
        (lighter + 0.05) / (darker + 0.05)
    }

    fn distance(&self, a: &Color, b: &Color) -> f64 {
        let a = Self::to_oklab(a);
        let b = Self::to_oklab(b);
        ((a.l - b.l).powi(2) + (a.a - b.a).powi(2) + (a.b - b.b).powi(2)).sqrt()
    }

    fn chroma(&self, color: &Color) -> f64 {
        Oklch::<f64>::from_color_unclamped(Self::to_xyz(color)).chroma
    }

    fn luminance(&self, color: &Color) -> f64 {
        Self::to_xyz(color).y
    }

    fn to_srgb_gamut(&self, color: &Color) -> [f64; 3] {
        let xyz = Self::to_xyz(color);
        let rgb = Srgb::<f64>::from_color_unclamped(xyz);
        if rgb.is_within_bounds() {
            return [rgb.red, rgb.green, rgb.blue];
        }

        let lch = Oklch::<f64>::from_color_unclamped(xyz);
        if lch.l.is_nan() || lch.l <= 0.0 {
            return [0.0; 3];
        }
        if lch.l >= 1.0 {
            return [1.0; 3];
        }

        let (mut lo, mut hi) = (0.0, lch.chroma);
        for _ in 0..GAMUT_ITERATIONS {
            let mid = (lo + hi) / 2.0;
            let candidate = Srgb::<f64>::from_color_unclamped(Oklch::new(lch.l, mid, lch.hue));
            if candidate.is_within_bounds() {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let mapped = Srgb::<f64>::from_color_unclamped(Oklch::new(lch.l, lo, lch.hue)).clamp();
        [mapped.red, mapped.green, mapped.blue]
    }
}

/// Format a color as a lowercase `#rrggbb` string after gamut mapping.
pub fn to_hex<M: ColorMath + ?Sized>(math: &M, color: &Color) -> String {
    let [r, g, b] = math.to_srgb_gamut(color).map(|c| (c * 255.0).round() as u8);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Format the gamut-mapped sRGB channels as floored 0-255 integers, e.g. `"255, 128, 0"`.
pub fn to_rgb_string<M: ColorMath + ?Sized>(math: &M, color: &Color) -> String {
    let [r, g, b] = math.to_srgb_gamut(color).map(|c| (c * 255.0).floor().clamp(0.0, 255.0) as u8);
    format!("{}, {}, {}", r, g, b)
}

/// Format a color in the given model, e.g. `okhsl(16.00 53.40% 96.20%)`.
pub fn format_color<M: ColorMath + ?Sized>(math: &M, color: &Color, space: ColorSpace) -> String {
    let [h, s, l] = math.to_model(color, space.into()).coords.map(|c| if c.is_nan() { 0.0 } else { c });
    format!("{}({:.2} {:.2}% {:.2}%)", space, h, s, l)
}

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})$").expect("hex pattern is a valid regex")
    })
}

/// Check a string against the accepted hex color pattern.
pub fn is_hex_color(s: &str) -> bool {
    hex_pattern().is_match(s)
}

/// Parse a hex color string (#RGB, #RRGGBB) into 8-bit channels
pub fn parse_hex(s: &str) -> Result<[u8; 3], ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    let digits: Vec<u8> = hex.chars().map(parse_hex_digit).collect::<Result<_, _>>()?;
    match digits.as_slice() {
        // #RGB -> #RRGGBB (doubled digits)
        [r, g, b] => Ok([r * 17, g * 17, b * 17]),
        [r1, r2, g1, g2, b1, b2] => Ok([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2]),
        _ => Err(ColorError::InvalidLength(digits.len())),
    }
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}
