//! Owned editing session with explicit recomputation
//!
//! A [`Session`] owns the settings, the palette set and the color math. Every
//! mutator changes the owned state and then rebuilds all derived values in
//! dependency order:
//!
//! ```text
//! settings, params -> palettes -> grouped swatches, reference colors
//!                              -> nearest reference colors, share state
//! ```

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::codec::{stateful_url, CodecError};
use crate::color::{ColorMath, ColorSpace, PaletteMath};
use crate::easing::{resolve, EaseError};
use crate::export;
use crate::generator::{generate_palettes, group_by_id, GenerateError};
use crate::matcher::{nearest_reference_colors, parse_reference_colors};
use crate::models::{GroupedSwatch, PaletteParameterSet, ReferenceColor, Settings, SharedState, Swatch};

/// Error type for session recomputation
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("failed to render export: {0}")]
    Export(#[from] serde_json::Error),
}

/// Defaults a session starts from before any shared state is applied.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub base_url: String,
    pub steps: usize,
    pub max_palettes: usize,
    pub color_space: ColorSpace,
    pub pretty: bool,
}

/// Share link plus the export document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShareState {
    pub url: String,
    pub json: String,
}

/// Everything computed from settings and params.
#[derive(Debug, Clone, Default)]
pub struct Derived {
    pub palettes: Vec<Vec<Swatch>>,
    pub grouped: Vec<Vec<GroupedSwatch>>,
    pub ref_colors: Vec<ReferenceColor>,
    /// Swatch hex to reference hex.
    pub nearest: HashMap<String, String>,
    pub share: ShareState,
}

/// Overlay `section` of a decoded state onto `defaults`, field by field.
///
/// A section that is absent or does not fit the schema keeps the defaults.
fn merge_section<T: Serialize + DeserializeOwned>(defaults: T, shared: &Value, section: &str) -> T {
    let Some(overlay) = shared.get(section).and_then(Value::as_object) else {
        return defaults;
    };
    let mut merged = match serde_json::to_value(&defaults) {
        Ok(Value::Object(map)) => map,
        _ => return defaults,
    };
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    match serde_json::from_value(Value::Object(merged)) {
        Ok(value) => value,
        Err(e) => {
            warn!(section, error = %e, "ignoring shared state section");
            defaults
        }
    }
}

/// First easing in `params` that does not resolve.
fn check_eases(params: &PaletteParameterSet) -> Result<(), EaseError> {
    for def in &params.params {
        for curve in [&def.hue, &def.sat, &def.lig] {
            resolve(&curve.ease)?;
        }
    }
    Ok(())
}

/// Apply a decoded shared state on top of the session defaults.
///
/// A palette set whose easings do not all resolve is dropped in favour of
/// the defaults, so a foreign link cannot fail the session.
pub fn merge_shared_state(options: &SessionOptions, shared: &Value) -> (Settings, PaletteParameterSet) {
    let settings = Settings { color_space: options.color_space, ..Settings::default() };
    let settings = merge_section(settings, shared, "settings");

    let mut params = PaletteParameterSet::with_limits(options.steps, options.max_palettes);
    let decoded = merge_section(params.clone(), shared, "paletteParams");
    match check_eases(&decoded) {
        Ok(()) => {
            params.set(decoded);
        }
        Err(e) => warn!(error = %e, "ignoring shared palette params"),
    }

    (settings, params)
}

pub struct Session<M: ColorMath = PaletteMath> {
    settings: Settings,
    params: PaletteParameterSet,
    math: M,
    base_url: String,
    pretty: bool,
    derived: Derived,
}

impl Session<PaletteMath> {
    /// Start a session from defaults merged with a decoded shared state.
    pub fn new(options: &SessionOptions, shared: &Value) -> Result<Self, SessionError> {
        Self::with_math(PaletteMath, options, shared)
    }
}

impl<M: ColorMath> Session<M> {
    pub fn with_math(math: M, options: &SessionOptions, shared: &Value) -> Result<Self, SessionError> {
        let (settings, params) = merge_shared_state(options, shared);
        let mut session = Self {
            settings,
            params,
            math,
            base_url: options.base_url.clone(),
            pretty: options.pretty,
            derived: Derived::default(),
        };
        session.recompute()?;
        Ok(session)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn params(&self) -> &PaletteParameterSet {
        &self.params
    }

    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    pub fn math(&self) -> &M {
        &self.math
    }

    /// The state a share link carries.
    pub fn shared_state(&self) -> SharedState {
        SharedState { settings: self.settings.clone(), palette_params: self.params.clone() }
    }

    pub fn add(&mut self) -> Result<&Derived, SessionError> {
        self.params.add();
        self.recompute()
    }

    pub fn remove_by_index(&mut self, index: usize) -> Result<&Derived, SessionError> {
        self.params.remove_by_index(index);
        self.recompute()
    }

    pub fn clone_by_index(&mut self, index: usize) -> Result<&Derived, SessionError> {
        self.params.clone_by_index(index);
        self.recompute()
    }

    pub fn set_params(&mut self, params: PaletteParameterSet) -> Result<&Derived, SessionError> {
        self.params.set(params);
        self.recompute()
    }

    pub fn set_settings(&mut self, settings: Settings) -> Result<&Derived, SessionError> {
        self.settings = settings;
        self.recompute()
    }

    /// Rebuild every derived value from the owned state.
    pub fn recompute(&mut self) -> Result<&Derived, SessionError> {
        let palettes = generate_palettes(&self.params, &self.settings, &self.math)?;

        let grouped = group_by_id(&palettes);
        let ref_colors =
            parse_reference_colors(&self.settings.ref_colors_raw, self.settings.color_space, &self.math);

        let nearest = nearest_reference_colors(&ref_colors, &palettes, &self.math);
        let share = ShareState {
            url: stateful_url(&self.base_url, &self.shared_state())?,
            json: export::to_json(&palettes, self.pretty)?,
        };

        debug!(
            palettes = palettes.len(),
            steps = self.params.steps,
            references = ref_colors.len(),
            "recomputed session"
        );
        self.derived = Derived { palettes, grouped, ref_colors, nearest, share };
        Ok(&self.derived)
    }
}
