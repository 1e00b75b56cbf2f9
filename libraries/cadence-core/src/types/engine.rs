//! Contract types for the sound engine adapter

use serde::{Deserialize, Serialize};

/// Options passed when loading an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Start playback as soon as the asset is loaded
    pub autoplay: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { autoplay: true }
    }
}

/// Status reported by the sound engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    /// Whether an asset is currently loaded
    pub loaded: bool,

    /// Elapsed position of the loaded asset
    pub position_ms: u64,

    /// Total duration, when known
    pub duration_ms: Option<u64>,

    /// Set once, on the update that reports the natural end of the asset
    pub just_finished: bool,
}

impl PlaybackStatus {
    /// Status of an engine with nothing loaded
    pub fn unloaded() -> Self {
        Self::default()
    }
}

/// Callback receiving status updates for the loaded asset
pub type StatusListener = Box<dyn Fn(PlaybackStatus) + Send + Sync>;
