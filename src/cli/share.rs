//! Share link commands (share, decode)

use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::codec::state_from_url;
use crate::config::CliOverrides;
use crate::models::LIMITS;

use super::{load_settings, open_session_with, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the share command
pub fn run_share(config_path: Option<&Path>, overrides: &CliOverrides, state: Option<&Path>) -> ExitCode {
    let config = match load_settings(config_path, overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let shared = match state {
        Some(path) => match read_state(path) {
            Ok(value) => value,
            Err(message) => {
                eprintln!("Error: {}", message);
                return ExitCode::from(EXIT_ERROR);
            }
        },
        None => Value::Object(Default::default()),
    };

    let session = match open_session_with(&config, &shared) {
        Ok(session) => session,
        Err(code) => return code,
    };

    for (i, def) in session.params().params.iter().enumerate() {
        for violation in LIMITS.violations(def) {
            eprintln!("Warning: color-{}: {}", i + 1, violation);
        }
    }

    println!("{}", session.derived().share.url);
    ExitCode::from(EXIT_SUCCESS)
}

fn read_state(path: &Path) -> Result<Value, String> {
    let contents = fs::read_to_string(path).map_err(|e| format!("Cannot read '{}': {}", path.display(), e))?;
    let value: Value =
        serde_json::from_str(&contents).map_err(|e| format!("Invalid state JSON in '{}': {}", path.display(), e))?;
    if !value.is_object() {
        return Err(format!("State in '{}' must be a JSON object", path.display()));
    }
    Ok(value)
}

/// Execute the decode command
///
/// Undecodable addresses print `{}`; the reason goes to the log.
pub fn run_decode(address: &str) -> ExitCode {
    let state = state_from_url(address);
    match serde_json::to_string_pretty(&state) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
