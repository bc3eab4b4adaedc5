//! Eases command implementation

use std::process::ExitCode;

use crate::easing::list_aliases;

use super::EXIT_SUCCESS;

/// Execute the eases command
pub fn run_eases() -> ExitCode {
    let width = list_aliases().iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, literal) in list_aliases() {
        println!("{:<width$}  {}", name, literal, width = width);
    }
    ExitCode::from(EXIT_SUCCESS)
}
