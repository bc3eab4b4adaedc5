//! Palette commands (palettes, export, match)

use std::collections::HashSet;
use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::matcher::nearest_swatch;
use crate::models::Swatch;
use crate::session::Session;

use super::{load_settings, open_session, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the palettes command
pub fn run_palettes(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    url: Option<&str>,
    json: bool,
) -> ExitCode {
    let config = match load_settings(config_path, overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let mut session = match open_session(&config, url) {
        Ok(session) => session,
        Err(code) => return code,
    };

    // Explicit flags win over whatever the share link carried
    if let Err(code) = apply_overrides(&mut session, overrides) {
        return code;
    }

    let palettes = &session.derived().palettes;
    if json {
        let rendered = if config.output.pretty {
            serde_json::to_string_pretty(palettes)
        } else {
            serde_json::to_string(palettes)
        };
        return match rendered {
            Ok(text) => {
                println!("{}", text);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    for (i, palette) in palettes.iter().enumerate() {
        let marker = if i == session.params().palette_index { " *" } else { "" };
        println!("color-{}{}", i + 1, marker);
        for swatch in palette {
            println!("{}", format_row(swatch));
        }
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn apply_overrides(session: &mut Session, overrides: &CliOverrides) -> Result<(), ExitCode> {
    let report = |e: crate::session::SessionError| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    };
    if let Some(steps) = overrides.steps {
        if steps != session.params().steps {
            let mut params = session.params().clone();
            params.steps = steps;
            session.set_params(params).map_err(report)?;
        }
    }
    if let Some(space) = overrides.color_space {
        if space != session.settings().color_space {
            let mut settings = session.settings().clone();
            settings.color_space = space;
            session.set_settings(settings).map_err(report)?;
        }
    }
    Ok(())
}

fn format_row(swatch: &Swatch) -> String {
    format!(
        "  {:>5}  {}  {:<34}  {:>5.2}:1 white  {:>5.2}:1 black",
        swatch.id, swatch.hex, swatch.string, swatch.white_contrast, swatch.black_contrast
    )
}

/// Execute the export command
pub fn run_export(config_path: Option<&Path>, overrides: &CliOverrides, url: Option<&str>) -> ExitCode {
    let config = match load_settings(config_path, overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };
    match open_session(&config, url) {
        Ok(session) => {
            println!("{}", session.derived().share.json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(code) => code,
    }
}

/// Execute the match command
pub fn run_match(config_path: Option<&Path>, refs: &str, url: Option<&str>) -> ExitCode {
    let config = match load_settings(config_path, &CliOverrides::default()) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let mut session = match open_session(&config, url) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let mut settings = session.settings().clone();
    settings.ref_colors_raw = refs.to_string();
    if let Err(e) = session.set_settings(settings) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    let derived = session.derived();
    if derived.ref_colors.is_empty() {
        eprintln!("Error: no valid reference colors in '{}'", refs);
        eprintln!("Expected comma separated hex colors such as \"#ff0000, #0af\"");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut seen = HashSet::new();
    for reference in &derived.ref_colors {
        if !seen.insert(reference.hex.as_str()) {
            continue;
        }
        let Some((swatch, distance)) = nearest_swatch(&reference.color, &derived.palettes, session.math()) else {
            continue;
        };
        let palette = derived
            .palettes
            .iter()
            .position(|p| p.iter().any(|s| std::ptr::eq(s, swatch)))
            .map(|i| i + 1)
            .unwrap_or(0);
        let owner = derived.nearest.get(&swatch.hex).map(String::as_str);
        let shadowed = if owner == Some(reference.hex.as_str()) { "" } else { "  (claimed by another reference)" };
        println!(
            "{}  color-{}/{}  {}  {:.4}{}",
            reference.hex, palette, swatch.id, swatch.hex, distance, shadowed
        );
    }
    ExitCode::from(EXIT_SUCCESS)
}
