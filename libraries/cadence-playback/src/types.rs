//! Core types for playback management

use cadence_core::{PlayingInfo, TrackId, TrackSource};
use serde::{Deserialize, Serialize};

/// Transport state of the single sound resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// No asset loaded
    Idle,

    /// Asset loaded and playing
    Playing,

    /// Asset loaded, not playing
    Paused,
}

/// Read-only view of the controller state for UI consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub state: TransportState,

    /// Best-effort playing flag; may drift from the engine after a rejected call
    pub is_playing: bool,

    /// Current session, `None` until something has been played
    pub info: Option<PlayingInfo>,

    /// Elapsed position of the loaded track
    pub position_ms: u64,
}

impl PlaybackSnapshot {
    pub fn idle(info: Option<PlayingInfo>) -> Self {
        Self {
            state: TransportState::Idle,
            is_playing: false,
            info,
            position_ms: 0,
        }
    }

    pub fn track_id(&self) -> Option<&TrackId> {
        self.info.as_ref().and_then(|info| info.track_id())
    }

    pub fn track_idx(&self) -> Option<usize> {
        self.info.as_ref().map(PlayingInfo::track_idx)
    }
}

/// Artwork for a media card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Artwork {
    /// Single image, or none
    Single(Option<String>),

    /// Up to four member images for playlists without a cover
    Collage(Vec<Option<String>>),
}

/// Display metadata for a recently played source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaCard {
    pub source: TrackSource,
    pub href: String,
    pub title: String,
    pub subtitle: String,
    pub extra: Option<String>,
    pub artwork: Artwork,
}

/// Minimal track data for the upcoming/queue lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackExcerpt {
    pub id: TrackId,
    pub name: String,
    pub artist_name: Option<String>,
    pub artwork: Option<String>,
}

/// "1 Track" / "N Tracks"
pub fn track_count_label(count: usize) -> String {
    if count == 1 {
        "1 Track".to_string()
    } else {
        format!("{count} Tracks")
    }
}
