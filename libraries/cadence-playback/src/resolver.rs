//! Track list resolution
//!
//! Turns a [`TrackSource`] into the ordered list of track ids it plays.

use crate::error::{PlaybackError, Result};
use cadence_core::{Library, SourceKind, TrackId, TrackSource};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Resolves track sources against the library
#[derive(Clone)]
pub struct TrackListResolver {
    library: Arc<dyn Library>,
}

impl TrackListResolver {
    pub fn new(library: Arc<dyn Library>) -> Self {
        Self { library }
    }

    /// Ordered, duplicate-free track ids for `source`
    ///
    /// # Errors
    /// `NotFound` when the referenced album, artist or playlist does not exist.
    pub async fn resolve(&self, source: &TrackSource) -> Result<Vec<TrackId>> {
        let reference = source.reference.as_str();

        let track_ids = match source.kind {
            SourceKind::Album => {
                self.library
                    .get_album(reference)
                    .await?
                    .ok_or_else(|| PlaybackError::not_found("Album", reference))?
                    .track_ids
            }
            SourceKind::Artist => {
                self.library
                    .get_artist(reference)
                    .await?
                    .ok_or_else(|| PlaybackError::not_found("Artist", reference))?
                    .track_ids
            }
            SourceKind::Playlist => self
                .library
                .get_playlist(reference)
                .await?
                .ok_or_else(|| PlaybackError::not_found("Playlist", reference))?
                .track_ids(),
            SourceKind::Favorites => self.library.favorite_track_ids().await?,
            SourceKind::AllTracks => self.library.all_track_ids().await?,
        };

        let track_ids = dedup_preserving_order(track_ids);
        debug!(source = %source, tracks = track_ids.len(), "resolved track list");
        Ok(track_ids)
    }
}

/// Drop repeated ids, keeping the first occurrence
fn dedup_preserving_order(track_ids: Vec<TrackId>) -> Vec<TrackId> {
    let mut seen = HashSet::with_capacity(track_ids.len());
    track_ids
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence() {
        let ids: Vec<TrackId> = ["a", "b", "a", "c", "b"].into_iter().map(TrackId::from).collect();
        let expected: Vec<TrackId> = ["a", "b", "c"].into_iter().map(TrackId::from).collect();
        assert_eq!(dedup_preserving_order(ids), expected);
    }
}
