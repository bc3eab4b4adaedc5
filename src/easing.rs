//! Easing curves for palette channel interpolation
//!
//! Every channel curve carries an easing spec. A spec is either the name of
//! one of the built-in curves (`quadIn`, `cubicOut`, ...) or a literal cubic
//! bezier string `"x1,y1,x2,y2"`. [`resolve`] turns a spec into a
//! [`CubicBezier`], which is built once per curve and then sampled for every
//! step of a palette.
//!
//! # Example
//!
//! ```
//! use huecurve::easing::{resolve, EasingSpec};
//!
//! let curve = resolve(&EasingSpec::new("quadIn")).unwrap();
//! assert!(curve.ease(0.5) < 0.5);
//! assert_eq!(curve.ease(1.0), 1.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const LINEAR: &str = "0,0,1,1";
pub const QUAD_IN: &str = "0.11,0,0.5,0";
pub const QUAD_OUT: &str = "0.5,1,0.89,1";

/// Named curves, in the order they are listed to users.
const ALIASES: &[(&str, &str)] = &[
    ("linear", LINEAR),
    ("sineIn", "0.12,0,0.39,0"),
    ("sineOut", "0.61,1,0.88,1"),
    ("sineInOut", "0.37,0,0.63,1"),
    ("quadIn", QUAD_IN),
    ("quadOut", QUAD_OUT),
    ("quadInOut", "0.45,0,0.55,1"),
    ("cubicIn", "0.32,0,0.67,0"),
    ("cubicOut", "0.33,1,0.68,1"),
    ("cubicInOut", "0.65,0,0.35,1"),
    ("quartIn", "0.5,0,0.75,0"),
    ("quartOut", "0.25,1,0.5,1"),
    ("quartInOut", "0.76,0,0.24,1"),
    ("quintIn", "0.64,0,0.78,0"),
    ("quintOut", "0.22,1,0.36,1"),
    ("quintInOut", "0.83,0,0.17,1"),
    ("expoIn", "0.7,0,0.84,0"),
    ("expoOut", "0.16,1,0.3,1"),
    ("expoInOut", "0.87,0,0.13,1"),
    ("circIn", "0.55,0,1,0.45"),
    ("circOut", "0,0.55,0.45,1"),
    ("circInOut", "0.85,0,0.15,1"),
    ("backIn", "0.36,0,0.66,-0.56"),
    ("backOut", "0.34,1.56,0.64,1"),
    ("backInOut", "0.68,-0.6,0.32,1.6"),
];

const NEWTON_ITERATIONS: usize = 8;
const SUBDIVISION_ITERATIONS: usize = 24;
const PRECISION: f64 = 1e-7;

/// Error type for malformed easing specs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EaseError {
    /// Literal did not split into four components
    #[error("easing '{spec}' has {count} components, expected 4")]
    ComponentCount { spec: String, count: usize },
    /// A component is not a decimal number
    #[error("easing '{spec}' has non-numeric component '{component}'")]
    NotANumber { spec: String, component: String },
    /// An x control point lies outside [0, 1], so the curve is not a function of progress
    #[error("easing '{spec}' has x control point {value} outside [0, 1]")]
    OutOfRange { spec: String, value: f64 },
}

/// Returns every named curve with its literal control points.
pub fn list_aliases() -> &'static [(&'static str, &'static str)] {
    ALIASES
}

/// An easing spec as stored in a channel curve.
///
/// Stored verbatim so that a shared state round-trips exactly; it is only
/// interpreted by [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EasingSpec(String);

impl EasingSpec {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    /// Looks up a named curve and returns its literal form.
    pub fn alias(name: &str) -> Option<Self> {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, literal)| Self::new(*literal))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EasingSpec {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for EasingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve an easing spec into an evaluable curve.
///
/// Aliases are looked up first; anything else is parsed as a literal.
///
/// # Errors
///
/// Returns `EaseError` if the literal does not hold exactly four numbers or
/// if an x control point falls outside `[0, 1]`.
pub fn resolve(spec: &EasingSpec) -> Result<CubicBezier, EaseError> {
    let literal = ALIASES
        .iter()
        .find(|(alias, _)| *alias == spec.as_str())
        .map(|(_, literal)| *literal)
        .unwrap_or(spec.as_str());
    literal.parse()
}

/// Cubic bezier easing with endpoints fixed at (0,0) and (1,1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Map normalized progress `t` to eased progress.
    ///
    /// Progress outside `[0, 1]` is clamped, and the endpoints are exact.
    pub fn ease(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        if self.x1 == self.y1 && self.x2 == self.y2 {
            return t;
        }

        let param = self.solve_for_x(t);
        cubic_bezier_1d(param, self.y1, self.y2)
    }

    /// Find the curve parameter whose x coordinate equals `x`.
    ///
    /// Newton-Raphson first; falls back to bisection where the slope is flat.
    fn solve_for_x(&self, x: f64) -> f64 {
        let mut guess = x;
        for _ in 0..NEWTON_ITERATIONS {
            let error = cubic_bezier_1d(guess, self.x1, self.x2) - x;
            if error.abs() < PRECISION {
                return guess;
            }
            let slope = cubic_bezier_derivative(guess, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            guess = (guess - error / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        let mut guess = x;
        for _ in 0..SUBDIVISION_ITERATIONS {
            let value = cubic_bezier_1d(guess, self.x1, self.x2);
            if (value - x).abs() < PRECISION {
                break;
            }
            if value < x {
                lo = guess;
            } else {
                hi = guess;
            }
            guess = (lo + hi) / 2.0;
        }
        guess
    }
}

impl FromStr for CubicBezier {
    type Err = EaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(EaseError::ComponentCount { spec: s.to_string(), count: parts.len() });
        }

        let mut values = [0.0; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| {
                EaseError::NotANumber { spec: s.to_string(), component: part.to_string() }
            })?;
        }

        let [x1, y1, x2, y2] = values;
        for x in [x1, x2] {
            if !(0.0..=1.0).contains(&x) {
                return Err(EaseError::OutOfRange { spec: s.to_string(), value: x });
            }
        }

        Ok(Self::new(x1, y1, x2, y2))
    }
}

/// Evaluate 1D cubic bezier at parameter t
/// Points: P0=0, P1=p1, P2=p2, P3=1
fn cubic_bezier_1d(t: f64, p1: f64, p2: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    3.0 * mt2 * t * p1 + 3.0 * mt * t2 * p2 + t3
}

/// Derivative of 1D cubic bezier
fn cubic_bezier_derivative(t: f64, p1: f64, p2: f64) -> f64 {
    let t2 = t * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    3.0 * mt2 * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t2 * (1.0 - p2)
}
