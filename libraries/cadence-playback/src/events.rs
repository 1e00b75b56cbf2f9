//! Playback events
//!
//! Broadcast to every subscriber of [`crate::PlaybackController::events`].
//! Emitted when the transport state changes, when a new track is loaded,
//! when a session starts and on every position update from the engine.

use crate::types::TransportState;
use cadence_core::{TrackId, TrackSource};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new state
        state: TransportState,
    },

    /// A track was loaded into the engine
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// Index of the track in the session list
        track_idx: usize,
    },

    /// A new session replaced the previous one
    SessionStarted {
        /// Where the new track list came from
        source: TrackSource,
        /// Number of tracks in the new list
        length: usize,
    },

    /// Position update from the engine
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration, when the engine knows it
        duration_ms: Option<u64>,
    },

    /// Engine call or lookup failed; the controller kept running
    Error {
        /// Error message
        message: String,
    },
}
