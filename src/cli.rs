//! CLI - Command Line Interface for trackbridge
//!
//! Offline debugging surface for track reports captured from devices.
//! Every selection decision is scriptable. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Summarize a captured track report
//! trackbridge inspect capture.json
//!
//! # Run a selection against it
//! trackbridge select capture.json --audio-id a2 --preferred-locale es
//!
//! # Replay a sequence of reports and print the emitted events
//! trackbridge simulate first.json second.json --subtitle-locale en --json
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Capture file missing or malformed
    BadCapture = 3,
    /// Selection expressed no preference
    NoMatch = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// trackbridge - track and locale negotiation for the player bridge
///
/// Works on track-group reports captured from devices as JSON files,
/// so selection behavior can be reproduced off-device.
#[derive(Parser, Debug)]
#[command(
    name = "trackbridge",
    version,
    author = "Gorka & Hermes",
    about = "Track and locale negotiation debugger for the player bridge",
    after_help = "EXAMPLES:\n\
                  trackbridge inspect capture.json            List tracks in a capture\n\
                  trackbridge select capture.json -a fr       Select with audio locale fr\n\
                  trackbridge simulate a.json b.json --json   Replay reports, print events"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a selection against a captured track report
    #[command(visible_alias = "s")]
    Select(SelectCmd),

    /// Summarize the tracks in a captured report
    #[command(visible_alias = "i")]
    Inspect(InspectCmd),

    /// Replay a sequence of reports and print the emitted events
    #[command(visible_alias = "sim")]
    Simulate(SimulateCmd),
}

// =============================================================================
// Request Flags (shared by select and simulate)
// =============================================================================

/// Caller-intent flags mirroring the bridge's load options
#[derive(Args, Debug, Default)]
pub struct RequestArgs {
    /// Explicit audio track id
    #[arg(long = "audio-id", default_value = "")]
    pub audio_track_id: String,

    /// Explicit audio locale
    #[arg(long = "audio-locale", short = 'a', default_value = "")]
    pub audio_locale: String,

    /// Explicit subtitle track id ("#disabled" forces subtitles off)
    #[arg(long = "subtitle-id", default_value = "")]
    pub subtitle_track_id: String,

    /// Explicit subtitle locale
    #[arg(long = "subtitle-locale", short = 's', default_value = "")]
    pub subtitle_locale: String,

    /// Device-preferred fallback locale
    #[arg(long = "preferred-locale", short = 'p', default_value = "")]
    pub preferred_locale: String,
}

// =============================================================================
// Select Command
// =============================================================================

/// Run the selection algorithm against one captured report
#[derive(Args, Debug)]
pub struct SelectCmd {
    /// Path to a captured track report (JSON)
    #[arg(required = true)]
    pub capture: PathBuf,

    #[command(flatten)]
    pub request: RequestArgs,
}

// =============================================================================
// Inspect Command
// =============================================================================

/// Summarize the tracks in one captured report
#[derive(Args, Debug)]
pub struct InspectCmd {
    /// Path to a captured track report (JSON)
    #[arg(required = true)]
    pub capture: PathBuf,
}

// =============================================================================
// Simulate Command
// =============================================================================

/// Replay captured reports through a full player lifecycle
#[derive(Args, Debug)]
pub struct SimulateCmd {
    /// Captured reports in arrival order; the first doubles as the
    /// ready-time snapshot
    #[arg(required = true)]
    pub captures: Vec<PathBuf>,

    #[command(flatten)]
    pub request: RequestArgs,
}

// =============================================================================
// JSON Output Envelope
// =============================================================================

/// JSON output wrapper for scripting
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            // For non-JSON, caller should handle formatting
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_select_command() {
        let cli = Cli::parse_from(["trackbridge", "select", "capture.json", "-a", "fr"]);
        if let Command::Select(cmd) = cli.command {
            assert_eq!(cmd.capture, PathBuf::from("capture.json"));
            assert_eq!(cmd.request.audio_locale, "fr");
            assert_eq!(cmd.request.audio_track_id, "");
        } else {
            panic!("Expected Select command");
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["trackbridge", "--json", "--quiet", "inspect", "c.json"]);
        assert!(cli.json);
        assert!(cli.quiet);
    }

    #[test]
    fn test_simulate_collects_captures_in_order() {
        let cli = Cli::parse_from(["trackbridge", "simulate", "a.json", "b.json", "-p", "es"]);
        if let Command::Simulate(cmd) = cli.command {
            assert_eq!(
                cmd.captures,
                vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
            );
            assert_eq!(cmd.request.preferred_locale, "es");
        } else {
            panic!("Expected Simulate command");
        }
    }

    #[test]
    fn test_disable_sentinel_passes_through() {
        let cli = Cli::parse_from([
            "trackbridge",
            "select",
            "c.json",
            "--subtitle-id",
            "#disabled",
        ]);
        if let Command::Select(cmd) = cli.command {
            assert_eq!(cmd.request.subtitle_track_id, "#disabled");
        } else {
            panic!("Expected Select command");
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::BadCapture), 3);
        assert_eq!(i32::from(ExitCode::NoMatch), 4);
    }
}
