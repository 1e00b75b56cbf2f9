//! The current playback session

use super::ids::TrackId;
use super::source::TrackSource;
use crate::error::{CadenceError, Result};
use serde::{Deserialize, Serialize};

/// Playback session: where the list came from, the ordered list and the
/// selected position in it.
///
/// The selected track is always `track_list[track_idx]`, so the two can never
/// disagree. An empty list is a valid session with nothing selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPlayingInfo", into = "RawPlayingInfo")]
pub struct PlayingInfo {
    list_src: TrackSource,
    track_list: Vec<TrackId>,
    track_idx: usize,
}

/// Persisted form, validated on the way back in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlayingInfo {
    list_src: TrackSource,
    track_list: Vec<TrackId>,
    track_idx: usize,
    track_id: Option<TrackId>,
}

impl TryFrom<RawPlayingInfo> for PlayingInfo {
    type Error = CadenceError;

    fn try_from(raw: RawPlayingInfo) -> Result<Self> {
        let info = PlayingInfo::new(raw.list_src, raw.track_list, raw.track_idx)?;
        if info.track_id() != raw.track_id.as_ref() {
            return Err(CadenceError::invalid_input(
                "stored track id does not match the track at the stored index",
            ));
        }
        Ok(info)
    }
}

impl From<PlayingInfo> for RawPlayingInfo {
    fn from(info: PlayingInfo) -> Self {
        let track_id = info.track_id().cloned();
        Self {
            list_src: info.list_src,
            track_list: info.track_list,
            track_idx: info.track_idx,
            track_id,
        }
    }
}

impl PlayingInfo {
    /// Create a session positioned at `track_idx`
    ///
    /// # Errors
    /// `InvalidInput` when the index is out of range for a non-empty list,
    /// or non-zero for an empty list.
    pub fn new(list_src: TrackSource, track_list: Vec<TrackId>, track_idx: usize) -> Result<Self> {
        let in_range = if track_list.is_empty() {
            track_idx == 0
        } else {
            track_idx < track_list.len()
        };
        if !in_range {
            return Err(CadenceError::invalid_input(format!(
                "track index {} out of range for {} tracks",
                track_idx,
                track_list.len()
            )));
        }

        Ok(Self {
            list_src,
            track_list,
            track_idx,
        })
    }

    pub fn list_src(&self) -> &TrackSource {
        &self.list_src
    }

    pub fn track_list(&self) -> &[TrackId] {
        &self.track_list
    }

    pub fn track_idx(&self) -> usize {
        self.track_idx
    }

    /// Currently selected track, `None` for an empty list
    pub fn track_id(&self) -> Option<&TrackId> {
        self.track_list.get(self.track_idx)
    }

    pub fn len(&self) -> usize {
        self.track_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.track_list.is_empty()
    }

    /// Position of `track_id` in the list (linear search)
    pub fn position_of(&self, track_id: &TrackId) -> Option<usize> {
        self.track_list.iter().position(|id| id == track_id)
    }

    /// Move the selection to `idx`
    pub fn select_index(&mut self, idx: usize) -> Result<()> {
        if idx >= self.track_list.len() {
            return Err(CadenceError::invalid_input(format!(
                "track index {} out of range for {} tracks",
                idx,
                self.track_list.len()
            )));
        }
        self.track_idx = idx;
        Ok(())
    }

    /// Move the selection to `track_id`, returning its index
    pub fn select_track(&mut self, track_id: &TrackId) -> Result<usize> {
        let idx = self
            .position_of(track_id)
            .ok_or_else(|| CadenceError::not_found("Track", track_id.as_str()))?;
        self.track_idx = idx;
        Ok(idx)
    }

    /// Index after the current one, wrapping to 0
    pub fn next_index(&self) -> Option<usize> {
        if self.track_list.is_empty() {
            return None;
        }
        Some((self.track_idx + 1) % self.track_list.len())
    }

    /// Index before the current one, wrapping to the last track
    pub fn prev_index(&self) -> Option<usize> {
        if self.track_list.is_empty() {
            return None;
        }
        let len = self.track_list.len();
        Some((self.track_idx + len - 1) % len)
    }

    /// Up to `limit` tracks following the current one, without wrapping
    pub fn upcoming(&self, limit: usize) -> &[TrackId] {
        if self.track_list.is_empty() {
            return &[];
        }
        let start = self.track_idx + 1;
        let end = (start + limit).min(self.track_list.len());
        &self.track_list[start.min(end)..end]
    }
}
