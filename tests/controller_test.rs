//! Playback Controller Tests
//!
//! Exercises the per-media-item state machine, the one-shot selection pass,
//! stale-callback fencing, and engine mutator application through a fake
//! engine that records every call.

use std::sync::{Arc, Mutex};

use trackbridge::models::{SelectionRequest, SubtitleStatus, DISABLED_TRACK_ID};
use trackbridge::player::engine::{MediaEngine, RawTrack, RawTrackGroup, RawTrackReport};
use trackbridge::player::{PlaybackController, PlayerPhase};
use trackbridge::TrackType;

// =============================================================================
// Fake Engine
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    AudioLang(String),
    TextLang(String),
    DisableText,
}

#[derive(Clone, Default)]
struct FakeEngine {
    report: RawTrackReport,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeEngine {
    fn with_report(report: RawTrackReport) -> Self {
        Self {
            report,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl MediaEngine for FakeEngine {
    fn current_tracks(&self) -> RawTrackReport {
        self.report.clone()
    }

    fn set_preferred_audio_language(&mut self, lang: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(Call::AudioLang(lang.to_string()));
    }

    fn set_preferred_text_language(&mut self, lang: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(Call::TextLang(lang.to_string()));
    }

    fn disable_text_track_selection(&mut self) {
        self.calls.lock().unwrap().push(Call::DisableText);
    }
}

// =============================================================================
// Report Helpers
// =============================================================================

fn raw(id: &str, lang: &str, selected: bool) -> RawTrack {
    RawTrack {
        id: Some(id.to_string()),
        language: Some(lang.to_string()),
        selected,
        ..Default::default()
    }
}

fn report(audio: Vec<RawTrack>, text: Vec<RawTrack>) -> RawTrackReport {
    RawTrackReport {
        groups: vec![
            RawTrackGroup {
                track_type: TrackType::Audio,
                tracks: audio,
            },
            RawTrackGroup {
                track_type: TrackType::Text,
                tracks: text,
            },
        ],
    }
}

// =============================================================================
// State Machine
// =============================================================================

#[test]
fn test_phases_follow_load_ready_release() {
    let mut controller = PlaybackController::new(FakeEngine::default());
    assert_eq!(controller.phase(), PlayerPhase::Uninitialized);

    controller.load(SelectionRequest::default());
    assert_eq!(controller.phase(), PlayerPhase::AwaitingFirstReady);

    controller.notify_ready();
    assert_eq!(controller.phase(), PlayerPhase::Active);

    controller.release();
    assert_eq!(controller.phase(), PlayerPhase::Uninitialized);
    assert!(controller.session().is_none());
}

#[test]
fn test_selection_runs_exactly_once_per_item() {
    let engine = FakeEngine::with_report(report(
        vec![raw("a1", "en", false), raw("a2", "fr", false)],
        vec![],
    ));
    let calls = engine.calls.clone();
    let mut controller = PlaybackController::new(engine);

    let session = controller.load(SelectionRequest {
        audio_track_id: "a2".to_string(),
        ..Default::default()
    });

    controller.notify_ready();
    assert_eq!(
        *calls.lock().unwrap(),
        vec![Call::AudioLang("fr".to_string()), Call::DisableText]
    );

    // Neither a duplicate ready nor later catalog churn re-runs selection
    controller.notify_ready();
    controller.notify_tracks_changed(session, &report(vec![raw("a2", "fr", true)], vec![]));
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[test]
fn test_ready_without_load_is_ignored() {
    let engine = FakeEngine::with_report(report(vec![raw("a1", "en", false)], vec![]));
    let calls = engine.calls.clone();
    let mut controller = PlaybackController::new(engine);

    controller.notify_ready();
    assert!(calls.lock().unwrap().is_empty());
    assert!(controller.last_selection().is_none());
}

#[test]
fn test_noop_selection_touches_no_mutators() {
    let engine = FakeEngine::with_report(report(vec![raw("a1", "en", false)], vec![]));
    let calls = engine.calls.clone();
    let mut controller = PlaybackController::new(engine);

    controller.load(SelectionRequest::default());
    controller.notify_ready();

    assert!(calls.lock().unwrap().is_empty());
    assert!(controller.last_selection().unwrap().is_noop());
}

// =============================================================================
// Mutator Application
// =============================================================================

#[test]
fn test_subtitle_selection_sets_text_language() {
    let engine = FakeEngine::with_report(report(vec![], vec![raw("s1", "es", false)]));
    let calls = engine.calls.clone();
    let mut controller = PlaybackController::new(engine);

    controller.load(SelectionRequest {
        subtitle_locale: "es".to_string(),
        ..Default::default()
    });
    controller.notify_ready();

    assert_eq!(*calls.lock().unwrap(), vec![Call::TextLang("es".to_string())]);
}

#[test]
fn test_disable_wins_over_text_language() {
    // Explicit audio + matching subtitle: the engine must see disable, not a
    // text preference that could resurrect rendering
    let engine = FakeEngine::with_report(report(
        vec![raw("a1", "fr", false)],
        vec![raw("s1", "en", false)],
    ));
    let calls = engine.calls.clone();
    let mut controller = PlaybackController::new(engine);

    controller.load(SelectionRequest {
        audio_track_id: "a1".to_string(),
        subtitle_track_id: "s1".to_string(),
        ..Default::default()
    });
    controller.notify_ready();

    let recorded = calls.lock().unwrap().clone();
    assert!(recorded.contains(&Call::AudioLang("fr".to_string())));
    assert!(recorded.contains(&Call::DisableText));
    assert!(!recorded.iter().any(|c| matches!(c, Call::TextLang(_))));
}

#[test]
fn test_forced_off_request_disables_even_without_matches() {
    let engine = FakeEngine::with_report(report(vec![], vec![]));
    let calls = engine.calls.clone();
    let mut controller = PlaybackController::new(engine);

    controller.load(SelectionRequest {
        subtitle_track_id: DISABLED_TRACK_ID.to_string(),
        ..Default::default()
    });
    controller.notify_ready();

    assert_eq!(*calls.lock().unwrap(), vec![Call::DisableText]);
}

// =============================================================================
// Callback Fencing & Events
// =============================================================================

#[test]
fn test_tracks_changed_publishes_observational_event() {
    let mut controller = PlaybackController::new(FakeEngine::default());
    let mut events = controller.subscribe();

    let session = controller.load(SelectionRequest::default());
    controller.notify_ready();
    controller.notify_tracks_changed(
        session,
        &report(vec![raw("a1", "en", true)], vec![raw("s1", "es", true)]),
    );

    let event = events.try_recv().expect("one event");
    assert_eq!(
        event.audio_track.as_ref().and_then(|t| t.id.as_deref()),
        Some("a1")
    );
    match &event.subtitle_track {
        SubtitleStatus::Track(attrs) => assert_eq!(attrs.language.as_deref(), Some("es")),
        SubtitleStatus::Disabled { .. } => panic!("expected subtitle attributes"),
    }
    assert_eq!(controller.catalog().len(), 2);
}

#[test]
fn test_event_reports_disabled_sentinel_without_text_selection() {
    let mut controller = PlaybackController::new(FakeEngine::default());
    let mut events = controller.subscribe();

    let session = controller.load(SelectionRequest::default());
    controller.notify_ready();
    controller.notify_tracks_changed(session, &report(vec![raw("a1", "en", true)], vec![]));

    let event = events.try_recv().expect("one event");
    assert!(event.subtitle_track.is_disabled());
}

#[test]
fn test_stale_session_callback_is_discarded() {
    let mut controller = PlaybackController::new(FakeEngine::default());
    let mut events = controller.subscribe();

    let old_session = controller.load(SelectionRequest::default());
    controller.notify_ready();

    // Reload mints a fresh session; the old item's callback must not land
    controller.load(SelectionRequest::default());
    controller.notify_tracks_changed(old_session, &report(vec![raw("a1", "en", true)], vec![]));

    assert!(events.try_recv().is_err());
    assert!(controller.catalog().is_empty());
}

#[test]
fn test_callback_after_release_is_discarded() {
    let mut controller = PlaybackController::new(FakeEngine::default());
    let mut events = controller.subscribe();

    let session = controller.load(SelectionRequest::default());
    controller.notify_ready();
    controller.release();
    controller.notify_tracks_changed(session, &report(vec![raw("a1", "en", true)], vec![]));

    assert!(events.try_recv().is_err());
}

#[test]
fn test_reload_rearms_selection() {
    let engine = FakeEngine::with_report(report(vec![raw("a1", "en", false)], vec![]));
    let calls = engine.calls.clone();
    let mut controller = PlaybackController::new(engine);

    controller.load(SelectionRequest {
        audio_locale: "en".to_string(),
        ..Default::default()
    });
    controller.notify_ready();
    let after_first = calls.lock().unwrap().len();

    controller.load(SelectionRequest {
        audio_locale: "en".to_string(),
        ..Default::default()
    });
    controller.notify_ready();

    assert!(calls.lock().unwrap().len() > after_first);
}
