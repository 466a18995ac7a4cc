//! ModLayout CLI entry point

use std::process::ExitCode;

fn main() -> ExitCode {
    modlayout::cli::run_cli()
}
