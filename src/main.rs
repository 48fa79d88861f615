//! trackbridge - track and locale negotiation for the player bridge
//!
//! CLI front for replaying track-group reports captured from devices
//! through the same selection core the bridge runs on-device.
//!
//! # Usage
//!
//! ```bash
//! trackbridge inspect capture.json
//! trackbridge select capture.json --audio-id a2 --json
//! trackbridge simulate first.json second.json -p es
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use trackbridge::cli::{Cli, Command, ExitCode, Output};
use trackbridge::commands;

fn main() -> std::process::ExitCode {
    // Logs go to stderr; stdout stays JSON-parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "trackbridge=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let output = Output::new(&cli);

    let code: ExitCode = match cli.command {
        Command::Select(cmd) => commands::select_cmd(cmd, &output),
        Command::Inspect(cmd) => commands::inspect_cmd(cmd, &output),
        Command::Simulate(cmd) => commands::simulate_cmd(cmd, &output),
    };

    code.into()
}
