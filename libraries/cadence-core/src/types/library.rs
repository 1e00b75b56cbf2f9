//! Read-only library entities returned by the data store

use super::ids::TrackId;
use serde::{Deserialize, Serialize};

/// A playable track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    pub artist_name: Option<String>,
    pub album_id: Option<String>,
    pub album_name: Option<String>,
    /// Media reference handed to the sound engine
    pub uri: String,
    /// Cover of the album if any, otherwise the track's own artwork
    pub artwork: Option<String>,
    pub is_favorite: bool,
    pub duration_ms: Option<u64>,
}

/// An album with its tracks in canonical order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    pub artwork: Option<String>,
    pub track_ids: Vec<TrackId>,
}

/// An artist with every track credited to them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    pub track_ids: Vec<TrackId>,
}

/// Playlist member with enough data for collage artwork
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub track_id: TrackId,
    pub name: String,
    pub artwork: Option<String>,
}

/// A user playlist with tracks in membership order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    pub artwork: Option<String>,
    pub tracks: Vec<PlaylistTrack>,
}

impl Playlist {
    /// Track ids in membership order
    pub fn track_ids(&self) -> Vec<TrackId> {
        self.tracks.iter().map(|t| t.track_id.clone()).collect()
    }
}
