//! Ad-hoc queue of upcoming tracks
//!
//! The queue is displayed and edited independently of the session track
//! list. Advancing with next/prev does not consume it.

use crate::error::{PlaybackError, Result};
use crate::types::TrackExcerpt;
use cadence_core::{Library, PlayingInfo, TrackId};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Number of session tracks shown after the current one
pub const UPCOMING_LIMIT: usize = 5;

/// User-editable list of queued tracks
#[derive(Debug, Default)]
pub struct QueueManager {
    entries: RwLock<Vec<TrackId>>,
}

impl QueueManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track to the end of the queue
    pub async fn add(&self, track_id: TrackId) {
        let mut entries = self.entries.write().await;
        debug!(track_id = %track_id, position = entries.len(), "queued track");
        entries.push(track_id);
    }

    /// Remove the entry at `index`, shifting later entries down
    ///
    /// # Errors
    /// `IndexOutOfBounds` when `index` is past the end; the queue is unchanged.
    pub async fn remove_at(&self, index: usize) -> Result<TrackId> {
        let mut entries = self.entries.write().await;
        if index >= entries.len() {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }
        Ok(entries.remove(index))
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Snapshot of the queue, in order
    pub async fn entries(&self) -> Vec<TrackId> {
        self.entries.read().await.clone()
    }

    /// Alias of [`Self::entries`] for the full queue projection
    pub async fn full(&self) -> Vec<TrackId> {
        self.entries().await
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Track currently selected in the session
    pub fn current(info: Option<&PlayingInfo>) -> Option<TrackId> {
        info.and_then(|info| info.track_id()).cloned()
    }

    /// Up to five session tracks after the current one, without wrapping
    pub fn upcoming(info: Option<&PlayingInfo>) -> Vec<TrackId> {
        info.map(|info| info.upcoming(UPCOMING_LIMIT).to_vec())
            .unwrap_or_default()
    }

    /// Load display data for `ids`, skipping ids with no backing track
    pub async fn resolve_excerpts(library: &dyn Library, ids: &[TrackId]) -> Vec<TrackExcerpt> {
        let mut excerpts = Vec::with_capacity(ids.len());
        for id in ids {
            match library.get_track(id).await {
                Ok(Some(track)) => excerpts.push(TrackExcerpt {
                    id: track.id,
                    name: track.name,
                    artist_name: track.artist_name,
                    artwork: track.artwork,
                }),
                Ok(None) => debug!(track_id = %id, "skipping queued track with no data"),
                Err(e) => warn!(track_id = %id, error = %e, "failed to load queued track"),
            }
        }
        excerpts
    }
}
