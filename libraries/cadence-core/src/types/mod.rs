//! Domain types shared across Cadence crates

mod engine;
mod ids;
mod library;
mod playing;
mod source;

pub use engine::{LoadOptions, PlaybackStatus, StatusListener};
pub use ids::TrackId;
pub use library::{Album, Artist, Playlist, PlaylistTrack, Track};
pub use playing::PlayingInfo;
pub use source::{SourceKind, TrackSource};
