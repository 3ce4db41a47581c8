//! pfx - Command-line tool for particle effect value strings

use std::process::ExitCode;

use popfx::cli;

fn main() -> ExitCode {
    cli::run()
}
