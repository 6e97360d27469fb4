mod csv;
mod validator;

pub use csv::{list_tracks, WaypointLoader};
pub use validator::TrackValidator;
