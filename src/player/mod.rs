//! Player core
//!
//! - Engine: the `MediaEngine` seam and raw track-group report types
//! - Catalog: raw report → immutable `TrackCatalog` snapshots
//! - Selector: the pure track/locale negotiation algorithm
//! - Notifier: phase machine and `tracksChanged` event fan-out
//! - Controller: applies selections to the engine, owns per-item state

pub mod catalog;
pub mod controller;
pub mod engine;
pub mod notifier;
pub mod selector;

pub use catalog::build_catalog;
pub use controller::PlaybackController;
pub use engine::{MediaEngine, RawTrack, RawTrackGroup, RawTrackReport};
pub use notifier::{shape_event, ChangeNotifier, PlayerPhase};
pub use selector::select;
