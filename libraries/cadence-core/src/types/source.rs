//! Track sources: the context a track list is played from

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of collection a track list comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Album,
    Artist,
    Playlist,
    Favorites,
    AllTracks,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Album => "album",
            SourceKind::Artist => "artist",
            SourceKind::Playlist => "playlist",
            SourceKind::Favorites => "favorites",
            SourceKind::AllTracks => "all-tracks",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "album" => Some(SourceKind::Album),
            "artist" => Some(SourceKind::Artist),
            "playlist" => Some(SourceKind::Playlist),
            "favorites" => Some(SourceKind::Favorites),
            "all-tracks" | "tracks" => Some(SourceKind::AllTracks),
            _ => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin context of a track list
///
/// Two sources are the same session when both `kind` and `reference` match.
/// `reference` is an album id, an artist name or a playlist name; it is
/// ignored by convention for `Favorites` and `AllTracks`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackSource {
    pub kind: SourceKind,
    #[serde(rename = "ref")]
    pub reference: String,
}

impl TrackSource {
    pub fn new(kind: SourceKind, reference: impl Into<String>) -> Self {
        Self {
            kind,
            reference: reference.into(),
        }
    }

    pub fn album(id: impl Into<String>) -> Self {
        Self::new(SourceKind::Album, id)
    }

    pub fn artist(name: impl Into<String>) -> Self {
        Self::new(SourceKind::Artist, name)
    }

    pub fn playlist(name: impl Into<String>) -> Self {
        Self::new(SourceKind::Playlist, name)
    }

    pub fn favorites() -> Self {
        Self::new(SourceKind::Favorites, "")
    }

    pub fn all_tracks() -> Self {
        Self::new(SourceKind::AllTracks, "")
    }
}

impl fmt::Display for TrackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reference.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}:{}", self.kind, self.reference)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_equality() {
        assert_eq!(TrackSource::album("A1"), TrackSource::album("A1"));
        assert_ne!(TrackSource::album("A1"), TrackSource::album("A2"));
        assert_ne!(TrackSource::album("X"), TrackSource::artist("X"));
    }

    #[test]
    fn serializes_with_ref_key() {
        let json = serde_json::to_value(TrackSource::new(SourceKind::AllTracks, "")).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "all-tracks", "ref": "" }));

        let parsed: TrackSource =
            serde_json::from_value(serde_json::json!({ "kind": "album", "ref": "A1" })).unwrap();
        assert_eq!(parsed, TrackSource::album("A1"));
    }

    #[test]
    fn kind_parse_round_trips_display() {
        for kind in [
            SourceKind::Album,
            SourceKind::Artist,
            SourceKind::Playlist,
            SourceKind::Favorites,
            SourceKind::AllTracks,
        ] {
            assert_eq!(SourceKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(SourceKind::parse("genre"), None);
    }
}
