//! Mutations of the palette set
//!
//! All operations are total. When an operation would break an invariant of
//! [`PaletteParameterSet`] (at capacity, last palette, index out of range) it
//! leaves the set untouched instead of failing.

use rand::Rng;
use tracing::debug;

use crate::easing::{QUAD_IN, QUAD_OUT};
use crate::models::{
    default_palettes, ChannelCurve, PaletteDefinition, PaletteParameterSet,
    DEFAULT_SATURATION_RATE, MAX_STEPS,
};

/// Width of the hue range given to a newly added palette.
const NEW_PALETTE_HUE_RANGE: u32 = 20;

impl PaletteParameterSet {
    /// Append a palette with a random hue and select it.
    pub fn add(&mut self) -> &Self {
        self.add_with_rng(&mut rand::thread_rng())
    }

    /// [`add`](Self::add) with a caller-provided random source.
    pub fn add_with_rng<R: Rng>(&mut self, rng: &mut R) -> &Self {
        if self.params.len() >= self.max_num_of_palettes {
            debug!(count = self.params.len(), "palette set at capacity, add ignored");
            return self;
        }

        let hue = rng.gen_range(0..360 - NEW_PALETTE_HUE_RANGE) as f64;
        self.params.push(PaletteDefinition {
            hue: ChannelCurve::new(hue, hue + NEW_PALETTE_HUE_RANGE as f64, QUAD_IN),
            sat: ChannelCurve::new(60.0, 100.0, QUAD_OUT).with_rate(DEFAULT_SATURATION_RATE),
            lig: ChannelCurve::new(100.0, 5.0, QUAD_OUT),
        });
        self.palette_index = self.params.len() - 1;
        self
    }

    /// Remove the palette at `index`, keeping the selection on the same palette where possible.
    pub fn remove_by_index(&mut self, index: usize) -> &Self {
        if self.params.len() <= 1 || index >= self.params.len() {
            debug!(index, count = self.params.len(), "remove ignored");
            return self;
        }

        self.params.remove(index);
        if self.palette_index >= index {
            self.palette_index = self.palette_index.saturating_sub(1);
        }
        self
    }

    /// Insert a deep copy of the palette at `index` right after it.
    pub fn clone_by_index(&mut self, index: usize) -> &Self {
        if self.params.len() >= self.max_num_of_palettes {
            debug!(count = self.params.len(), "palette set at capacity, clone ignored");
            return self;
        }
        let Some(copy) = self.params.get(index).cloned() else {
            debug!(index, count = self.params.len(), "clone ignored");
            return self;
        };

        self.params.insert(index + 1, copy);
        self
    }

    /// Replace the whole set, clamping the selection into range.
    ///
    /// The capacity is owned by the current set and is kept. Steps are
    /// clamped into `1..=MAX_STEPS`.
    pub fn set(&mut self, mut next: PaletteParameterSet) -> &Self {
        next.max_num_of_palettes = self.max_num_of_palettes;
        if next.steps > MAX_STEPS {
            debug!(steps = next.steps, "steps clamped to {}", MAX_STEPS);
        }
        next.steps = next.steps.clamp(1, MAX_STEPS);
        if next.params.is_empty() {
            next.params = default_palettes();
        }
        next.params.truncate(next.max_num_of_palettes);
        if next.swatch_index >= next.steps {
            next.swatch_index = next.steps - 1;
        }
        if next.palette_index >= next.params.len() {
            next.palette_index = next.params.len() - 1;
        }

        *self = next;
        self
    }
}
