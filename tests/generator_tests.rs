//! Generation and matching against a stub color model
//!
//! `GreyMath` maps every color to a grey of its lightness, which makes hex
//! values, contrast and distance predictable without a real color library.

use huecurve::color::{Color, ColorMath, ColorSpace, Space};
use huecurve::easing::{EasingSpec, QUAD_IN, QUAD_OUT};
use huecurve::generator::{generate_palette, generate_palettes, group_by_id, GenerateError};
use huecurve::matcher::{nearest_reference_colors, nearest_swatch, parse_reference_colors};
use huecurve::models::{
    default_palettes, ChannelCurve, PaletteDefinition, PaletteParameterSet, ReferenceColor, Settings,
};

struct GreyMath;

impl GreyMath {
    fn lightness(color: &Color) -> f64 {
        match color.space {
            Space::Srgb => color.coords.iter().sum::<f64>() / 3.0,
            _ => color.coords[2] / 100.0,
        }
    }
}

impl ColorMath for GreyMath {
    fn to_model(&self, color: &Color, space: Space) -> Color {
        let l = Self::lightness(color);
        match space {
            Space::Srgb => Color::new(space, [l, l, l]),
            _ => Color::new(space, [0.0, 0.0, l * 100.0]),
        }
    }

    fn contrast_ratio(&self, a: &Color, b: &Color) -> f64 {
        let (la, lb) = (Self::lightness(a), Self::lightness(b));
        (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
    }

    fn distance(&self, a: &Color, b: &Color) -> f64 {
        (Self::lightness(a) - Self::lightness(b)).abs()
    }

    fn chroma(&self, _color: &Color) -> f64 {
        0.0
    }

    fn luminance(&self, color: &Color) -> f64 {
        Self::lightness(color)
    }
}

fn definition(hue: (f64, f64), lig: (f64, f64)) -> PaletteDefinition {
    PaletteDefinition {
        hue: ChannelCurve::new(hue.0, hue.1, QUAD_IN),
        sat: ChannelCurve::new(40.0, 80.0, QUAD_OUT),
        lig: ChannelCurve::new(lig.0, lig.1, "linear"),
    }
}

fn reference(hex: &str, lightness: f64) -> ReferenceColor {
    ReferenceColor {
        hex: hex.to_string(),
        string: String::new(),
        color: Color::from_hsl(ColorSpace::Okhsl, 0.0, 0.0, lightness),
    }
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_swatch_count_and_ids() {
    for steps in [1, 5, 9, 10, 16] {
        let swatches = generate_palette(&default_palettes()[0], 0, steps, ColorSpace::Okhsl, &GreyMath).unwrap();
        assert_eq!(swatches.len(), steps);
        let spacing = if steps > 9 { 10 } else { 100 };
        for (i, swatch) in swatches.iter().enumerate() {
            assert_eq!(swatch.id, ((i + 1) * spacing).to_string());
        }
    }
}

#[test]
fn test_default_gamut_mapping_clamps() {
    let bright = Color::from_hsl(ColorSpace::Okhsl, 0.0, 0.0, 150.0);
    assert_eq!(GreyMath.to_srgb_gamut(&bright), [1.0, 1.0, 1.0]);
    let dark = Color::from_hsl(ColorSpace::Okhsl, 0.0, 0.0, -20.0);
    assert_eq!(GreyMath.to_srgb_gamut(&dark), [0.0, 0.0, 0.0]);
}

#[test]
fn test_last_swatch_lands_on_end() {
    let swatches = generate_palette(&definition((30.0, 60.0), (95.0, 10.0)), 0, 7, ColorSpace::Hsl, &GreyMath).unwrap();
    let last = swatches.last().unwrap();
    assert!((last.h - 60.0).abs() < 1e-9);
    assert!((last.l - 10.0).abs() < 1e-9);
}

#[test]
fn test_lightness_follows_linear_curve() {
    // unit = -10, value_i = 100 - (i/9) * i * 10
    let swatches = generate_palette(&definition((0.0, 10.0), (100.0, 10.0)), 0, 9, ColorSpace::Okhsl, &GreyMath).unwrap();
    for (i, swatch) in swatches.iter().enumerate() {
        let step = (i + 1) as f64;
        let expected = 100.0 - step / 9.0 * step * 10.0;
        assert!((swatch.l - expected).abs() < 1e-6, "step {}: {} vs {}", step, swatch.l, expected);
    }
    assert!(swatches.windows(2).all(|w| w[1].l < w[0].l));
}

#[test]
fn test_metrics_come_from_color_math() {
    let swatches = generate_palette(&definition((0.0, 10.0), (90.0, 10.0)), 0, 3, ColorSpace::Okhsl, &GreyMath).unwrap();
    for swatch in &swatches {
        let l = swatch.l / 100.0;
        assert!((swatch.luminance - l).abs() < 1e-9);
        assert!((swatch.white_contrast - 1.05 / (l + 0.05)).abs() < 1e-9);
        assert!((swatch.black_contrast - (l + 0.05) / 0.05).abs() < 1e-9);
        assert!(swatch.white_contrast >= 1.0 && swatch.black_contrast >= 1.0);
        assert_eq!(swatch.chroma, 0.0);

        let byte = (l * 255.0).round() as u8;
        assert_eq!(swatch.hex, format!("#{:02x}{:02x}{:02x}", byte, byte, byte));
        assert!(swatch.string.starts_with("okhsl("));
    }
}

#[test]
fn test_saturation_never_exceeds_100() {
    let mut def = definition((0.0, 10.0), (90.0, 10.0));
    def.sat = ChannelCurve::new(70.0, 100.0, QUAD_OUT).with_rate(200.0);
    let swatches = generate_palette(&def, 0, 9, ColorSpace::Okhsl, &GreyMath).unwrap();
    assert!(swatches.iter().all(|s| s.s <= 100.0));
    assert_eq!(swatches.last().unwrap().s, 100.0);
}

#[test]
fn test_hue_wrap_stays_in_circle() {
    let mut def = definition((300.0, 40.0), (90.0, 10.0));
    def.hue = ChannelCurve::new(300.0, 40.0, "linear").with_hue_wrap(true);
    let swatches = generate_palette(&def, 0, 10, ColorSpace::Hsluv, &GreyMath).unwrap();
    assert!(swatches.iter().all(|s| s.h >= 0.0 && s.h < 360.0));
    assert!((swatches.last().unwrap().h - 40.0).abs() < 1e-9);
    // Crosses zero at some point along the way
    assert!(swatches.iter().any(|s| s.h > 300.0));
    assert!(swatches.iter().any(|s| s.h < 40.0));
}

#[test]
fn test_generate_palettes_keeps_order() {
    let mut params = PaletteParameterSet::with_limits(5, 6);
    params.params = vec![definition((10.0, 20.0), (90.0, 10.0)), definition((200.0, 210.0), (80.0, 20.0))];
    let palettes = generate_palettes(&params, &Settings::default(), &GreyMath).unwrap();
    assert_eq!(palettes.len(), 2);
    assert!((palettes[0][4].h - 20.0).abs() < 1e-9);
    assert!((palettes[1][4].h - 210.0).abs() < 1e-9);
}

#[test]
fn test_bad_ease_propagates() {
    let mut params = PaletteParameterSet::default();
    params.params[2].sat.ease = EasingSpec::new("a,b,c,d");
    let err = generate_palettes(&params, &Settings::default(), &GreyMath).unwrap_err();
    assert!(matches!(err, GenerateError::Ease { palette: 2, channel: "sat", .. }));
    assert!(err.to_string().starts_with("palette 2, sat channel"));
}

#[test]
fn test_group_by_id_across_palettes() {
    let mut params = PaletteParameterSet::with_limits(12, 6);
    params.params.truncate(2);
    let palettes = generate_palettes(&params, &Settings::default(), &GreyMath).unwrap();
    let grouped = group_by_id(&palettes);

    assert_eq!(grouped.len(), 12);
    for (i, group) in grouped.iter().enumerate() {
        let id = ((i + 1) * 10).to_string();
        assert_eq!(group.len(), 2);
        assert!(group.iter().all(|g| g.swatch_id == id));
        assert_eq!(group[0].palette_index, 0);
        assert_eq!(group[1].palette_index, 1);
    }
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_parse_reference_colors_filters_tokens() {
    let refs = parse_reference_colors(" #FFF, nope,#000000 ,, #12345", ColorSpace::Okhsl, &GreyMath);
    let hexes: Vec<&str> = refs.iter().map(|r| r.hex.as_str()).collect();
    assert_eq!(hexes, ["#ffffff", "#000000"]);
}

#[test]
fn test_nearest_swatch_by_lightness() {
    let palettes = vec![generate_palette(&definition((0.0, 10.0), (100.0, 10.0)), 0, 9, ColorSpace::Okhsl, &GreyMath).unwrap()];
    let target = palettes[0][3].clone();
    let (found, distance) = nearest_swatch(&target.color, &palettes, &GreyMath).unwrap();
    assert_eq!(found.id, target.id);
    assert_eq!(distance, 0.0);

    assert!(nearest_swatch(&target.color, &[], &GreyMath).is_none());
}

#[test]
fn test_nearest_reference_colors_collision_last_wins() {
    let palettes = vec![generate_palette(&definition((0.0, 10.0), (100.0, 10.0)), 0, 9, ColorSpace::Okhsl, &GreyMath).unwrap()];
    let darkest = palettes[0][8].hex.clone();

    // Both references sit below the darkest swatch
    let refs = vec![reference("#010101", 1.0), reference("#020202", 2.0), reference("#010101", 1.0)];
    let matches = nearest_reference_colors(&refs, &palettes, &GreyMath);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches.get(&darkest).map(String::as_str), Some("#020202"));
}

#[test]
fn test_nearest_reference_colors_distinct_targets() {
    let palettes = vec![generate_palette(&definition((0.0, 10.0), (100.0, 10.0)), 0, 9, ColorSpace::Okhsl, &GreyMath).unwrap()];
    let refs = vec![reference("#fefefe", 99.0), reference("#0a0a0a", 4.0)];
    let matches = nearest_reference_colors(&refs, &palettes, &GreyMath);

    assert_eq!(matches.len(), 2);
    assert_eq!(matches.get(&palettes[0][0].hex).map(String::as_str), Some("#fefefe"));
    assert_eq!(matches.get(&palettes[0][8].hex).map(String::as_str), Some("#0a0a0a"));
}
