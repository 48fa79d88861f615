//! CLI Command Handlers
//!
//! Implements all CLI commands against the player core.
//! Each handler takes CLI args and Output, returns ExitCode.

use serde::Serialize;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::bridge::LoadOptions;
use crate::cli::{ExitCode, InspectCmd, Output, RequestArgs, SelectCmd, SimulateCmd};
use crate::config::Config;
use crate::models::{SelectionRequest, SelectionResult, Track, TracksChangedEvent};
use crate::player::engine::{MediaEngine, RawTrackReport};
use crate::player::{build_catalog, select, PlaybackController};

fn read_capture(path: &Path) -> Result<RawTrackReport, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| format!("Malformed capture {}: {}", path.display(), e))
}

/// Resolve CLI flags exactly the way the bridge resolves load options,
/// config-file defaults included
fn resolve_request(args: RequestArgs) -> SelectionRequest {
    let options = LoadOptions {
        subtitle_track_id: args.subtitle_track_id,
        subtitle_locale: args.subtitle_locale,
        audio_track_id: args.audio_track_id,
        audio_locale: args.audio_locale,
        preferred_locale: args.preferred_locale,
    };
    options.into_request(&Config::load())
}

// =============================================================================
// Select Command
// =============================================================================

pub fn select_cmd(cmd: SelectCmd, output: &Output) -> ExitCode {
    let report = match read_capture(&cmd.capture) {
        Ok(report) => report,
        Err(e) => return output.error(e, ExitCode::BadCapture),
    };

    let catalog = build_catalog(&report);
    let request = resolve_request(cmd.request);
    output.info(format!(
        "Selecting over {} tracks ({})",
        catalog.len(),
        cmd.capture.display()
    ));

    let result = select(&catalog, &request);
    let noop = result.is_noop();

    if let Err(e) = output.print(&result) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }

    if noop {
        // Engine defaults stay in effect; make that visible to scripts
        ExitCode::NoMatch
    } else {
        ExitCode::Success
    }
}

// =============================================================================
// Inspect Command
// =============================================================================

/// Catalog summary for `inspect`
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub total: usize,
    pub audio: usize,
    pub text: usize,
    pub tracks: Vec<Track>,
}

pub fn inspect_cmd(cmd: InspectCmd, output: &Output) -> ExitCode {
    let report = match read_capture(&cmd.capture) {
        Ok(report) => report,
        Err(e) => return output.error(e, ExitCode::BadCapture),
    };

    let catalog = build_catalog(&report);
    for track in catalog.tracks() {
        output.info(track);
    }

    let summary = InspectOutput {
        total: catalog.len(),
        audio: catalog.audio_tracks().count(),
        text: catalog.text_tracks().count(),
        tracks: catalog.tracks().to_vec(),
    };

    if let Err(e) = output.print(&summary) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Simulate Command
// =============================================================================

/// One engine mutator invocation, recorded during replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "call", content = "lang")]
pub enum EngineCall {
    SetPreferredAudioLanguage(String),
    SetPreferredTextLanguage(String),
    DisableTextTrackSelection,
}

/// Replay engine: serves the first capture as the ready-time snapshot and
/// records every mutator call
struct ScriptedEngine {
    ready_report: RawTrackReport,
    calls: Rc<RefCell<Vec<EngineCall>>>,
}

impl MediaEngine for ScriptedEngine {
    fn current_tracks(&self) -> RawTrackReport {
        self.ready_report.clone()
    }

    fn set_preferred_audio_language(&mut self, lang: &str) {
        self.calls
            .borrow_mut()
            .push(EngineCall::SetPreferredAudioLanguage(lang.to_string()));
    }

    fn set_preferred_text_language(&mut self, lang: &str) {
        self.calls
            .borrow_mut()
            .push(EngineCall::SetPreferredTextLanguage(lang.to_string()));
    }

    fn disable_text_track_selection(&mut self) {
        self.calls
            .borrow_mut()
            .push(EngineCall::DisableTextTrackSelection);
    }
}

/// Full replay transcript for `simulate`
#[derive(Debug, Serialize)]
pub struct SimulateOutput {
    pub selection: Option<SelectionResult>,
    pub engine_calls: Vec<EngineCall>,
    pub events: Vec<TracksChangedEvent>,
}

pub fn simulate_cmd(cmd: SimulateCmd, output: &Output) -> ExitCode {
    let mut reports = Vec::with_capacity(cmd.captures.len());
    for path in &cmd.captures {
        match read_capture(path) {
            Ok(report) => reports.push(report),
            Err(e) => return output.error(e, ExitCode::BadCapture),
        }
    }
    let Some(ready_report) = reports.first().cloned() else {
        return output.error("No captures given", ExitCode::InvalidArgs);
    };

    let calls = Rc::new(RefCell::new(Vec::new()));
    let engine = ScriptedEngine {
        ready_report,
        calls: calls.clone(),
    };

    let mut controller = PlaybackController::new(engine);
    let mut events = controller.subscribe();

    let request = resolve_request(cmd.request);
    let session = controller.load(request);
    controller.notify_ready();
    let selection = controller.last_selection().cloned();
    for report in &reports {
        controller.notify_tracks_changed(session, report);
    }
    controller.release();

    let mut collected = Vec::new();
    while let Ok(event) = events.try_recv() {
        collected.push(event);
    }

    let transcript = SimulateOutput {
        selection,
        engine_calls: calls.borrow().clone(),
        events: collected,
    };

    if let Err(e) = output.print(&transcript) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}
