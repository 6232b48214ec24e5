use std::process::ExitCode;

use clap::Parser;
use verifier_app::platform::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match platform::run_app(cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}
