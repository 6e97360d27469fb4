pub mod connectors;
pub mod smoothing;

pub use connectors::{list_tracks, TrackValidator, WaypointLoader};
pub use smoothing::{load_track, resample_closed};
