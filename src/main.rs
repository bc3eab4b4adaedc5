//! Huecurve - Command-line tool for generating palettes from easing curves

use std::process::ExitCode;

use huecurve::cli;

fn main() -> ExitCode {
    cli::run()
}
