//! Playback control
//!
//! `PlaybackController` owns the live engine handle plus the per-media-item
//! state around it: the request captured at load, the current catalog
//! snapshot, the change notifier, and the session id that fences off late
//! callbacks from a torn-down item.
//!
//! Everything here runs on the single UI-affine player task; there is no
//! locking because there is no sharing.

use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{SelectionRequest, SelectionResult, TrackCatalog, TracksChangedEvent};
use crate::player::catalog::build_catalog;
use crate::player::engine::{MediaEngine, RawTrackReport};
use crate::player::notifier::{ChangeNotifier, PlayerPhase};
use crate::player::selector::select;

pub struct PlaybackController<E: MediaEngine> {
    engine: E,
    request: SelectionRequest,
    catalog: TrackCatalog,
    notifier: ChangeNotifier,
    /// Fences callbacks to the media item they were issued under
    session: Option<Uuid>,
    last_selection: Option<SelectionResult>,
}

impl<E: MediaEngine> PlaybackController<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            request: SelectionRequest::default(),
            catalog: TrackCatalog::default(),
            notifier: ChangeNotifier::new(),
            session: None,
            last_selection: None,
        }
    }

    pub fn phase(&self) -> PlayerPhase {
        self.notifier.phase()
    }

    pub fn session(&self) -> Option<Uuid> {
        self.session
    }

    pub fn catalog(&self) -> &TrackCatalog {
        &self.catalog
    }

    pub fn request(&self) -> &SelectionRequest {
        &self.request
    }

    /// The instruction applied on the first ready transition, if any yet
    pub fn last_selection(&self) -> Option<&SelectionResult> {
        self.last_selection.as_ref()
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<TracksChangedEvent> {
        self.notifier.subscribe()
    }

    /// Capture the caller's request for a newly loaded media item.
    ///
    /// Mints the session id that subsequent callbacks must carry; anything
    /// still in flight for the previous item no longer matches and gets
    /// discarded on arrival.
    pub fn load(&mut self, request: SelectionRequest) -> Uuid {
        let session = Uuid::new_v4();
        info!(%session, ?request, "media item loaded");
        self.request = request;
        self.catalog = TrackCatalog::default();
        self.last_selection = None;
        self.session = Some(session);
        self.notifier.mark_loaded();
        session
    }

    /// First-ready hook: runs the selection pass exactly once per loaded item.
    pub fn notify_ready(&mut self) {
        if !self.notifier.on_ready() {
            return;
        }
        self.catalog = build_catalog(&self.engine.current_tracks());
        let result = select(&self.catalog, &self.request);
        info!(?result, tracks = self.catalog.len(), "applying selection");
        self.apply(&result);
        self.last_selection = Some(result);
    }

    /// Engine track-change callback: replace the catalog and publish the
    /// observational event. Stale or pre-load callbacks are discarded.
    pub fn notify_tracks_changed(&mut self, session: Uuid, report: &RawTrackReport) {
        if self.session != Some(session) {
            debug!(%session, "discarding track change for stale session");
            return;
        }
        if self.notifier.phase() == PlayerPhase::Uninitialized {
            debug!(%session, "discarding track change before load");
            return;
        }
        self.catalog = build_catalog(report);
        self.notifier.publish(&self.catalog);
    }

    /// Tear down the current media item; later callbacks for it are dropped.
    pub fn release(&mut self) {
        if let Some(session) = self.session.take() {
            info!(%session, "media item released");
        }
        self.request = SelectionRequest::default();
        self.catalog = TrackCatalog::default();
        self.last_selection = None;
        self.notifier.reset();
    }

    /// Push a selection instruction into the engine.
    ///
    /// Disabling wins over a preferred text language: when subtitles are off
    /// the engine never receives a text preference to resurrect them with.
    fn apply(&mut self, result: &SelectionResult) {
        if let Some(lang) = &result.audio_language_to_prefer {
            self.engine.set_preferred_audio_language(lang);
        }
        if result.subtitles_disabled {
            self.engine.disable_text_track_selection();
        } else if let Some(lang) = &result.subtitle_language_to_prefer {
            self.engine.set_preferred_text_language(lang);
        }
    }
}
