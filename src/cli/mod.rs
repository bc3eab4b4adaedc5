//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod eases;
mod palettes;
mod share;

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::codec;
use crate::color::ColorSpace;
use crate::config::{load_config, merge_cli_overrides, CliOverrides, HuecurveConfig};
use crate::models::MAX_STEPS;
use crate::session::Session;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "HUECURVE_LOG";

/// Huecurve - Generate color palettes from easing curves
#[derive(Parser)]
#[command(name = "huecurve")]
#[command(about = "Huecurve - Generate color palettes from hue, saturation and lightness curves")]
#[command(version)]
pub struct Cli {
    /// Path to huecurve.toml (default: discovered from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the generated swatches of every palette
    Palettes {
        /// Share link to restore the palette set from
        #[arg(long)]
        url: Option<String>,

        /// Swatches per palette
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_STEPS as u64))]
        steps: Option<u64>,

        /// Color space to generate in (okhsl, hsluv, hsl)
        #[arg(long)]
        space: Option<ColorSpace>,

        /// Output swatches as JSON
        #[arg(long)]
        json: bool,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Print the export document ({ "color-N": { id: hex } })
    Export {
        /// Share link to restore the palette set from
        #[arg(long)]
        url: Option<String>,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Print a share link for a state file, or for the defaults
    Share {
        /// JSON file holding { settings, paletteParams }
        #[arg(long)]
        state: Option<PathBuf>,

        /// Base address of the share link
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Print the state carried by a share link
    Decode {
        /// Share link or any address with an `s` query parameter
        address: String,
    },

    /// Find the closest swatch for each reference color
    Match {
        /// Comma separated hex colors, e.g. "#ff0000, #0af"
        #[arg(long)]
        refs: String,

        /// Share link to restore the palette set from
        #[arg(long)]
        url: Option<String>,
    },

    /// List easing aliases and their control points
    Eases,
}

/// Entry point for the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Palettes { url, steps, space, json, compact } => {
            let overrides = CliOverrides {
                steps: steps.map(|n| n as usize),
                color_space: space,
                pretty: compact.then_some(false),
                ..Default::default()
            };
            palettes::run_palettes(config_path, &overrides, url.as_deref(), json)
        }
        Commands::Export { url, compact } => {
            let overrides = CliOverrides { pretty: compact.then_some(false), ..Default::default() };
            palettes::run_export(config_path, &overrides, url.as_deref())
        }
        Commands::Share { state, base_url } => {
            let overrides = CliOverrides { base_url, ..Default::default() };
            share::run_share(config_path, &overrides, state.as_deref())
        }
        Commands::Decode { address } => share::run_decode(&address),
        Commands::Match { refs, url } => palettes::run_match(config_path, &refs, url.as_deref()),
        Commands::Eases => eases::run_eases(),
    }
}

/// Install the stderr log subscriber.
///
/// `--verbose` wins over `HUECURVE_LOG`; without either only warnings show.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("huecurve=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Load huecurve.toml (explicit path or discovered) and apply CLI overrides.
pub(crate) fn load_settings(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<HuecurveConfig, ExitCode> {
    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };
    merge_cli_overrides(&mut config, overrides);
    Ok(config)
}

/// Build a session from the config and an optional share link.
pub(crate) fn open_session(config: &HuecurveConfig, url: Option<&str>) -> Result<Session, ExitCode> {
    let shared = url.map(codec::state_from_url).unwrap_or_else(|| Value::Object(Default::default()));
    open_session_with(config, &shared)
}

pub(crate) fn open_session_with(config: &HuecurveConfig, shared: &Value) -> Result<Session, ExitCode> {
    Session::new(&config.session_options(), shared).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}
