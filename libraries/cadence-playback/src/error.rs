//! Error types for playback management

use cadence_core::CadenceError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Referenced album/artist/playlist/track does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Sound engine rejected a call
    #[error("Engine error: {0}")]
    Engine(String),

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// The controller task has stopped
    #[error("Playback controller is no longer running")]
    ControllerClosed,

    /// Storage or serialization failure from a collaborator
    #[error(transparent)]
    Core(CadenceError),
}

impl PlaybackError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<CadenceError> for PlaybackError {
    fn from(err: CadenceError) -> Self {
        match err {
            CadenceError::NotFound { entity, id } => Self::NotFound { entity, id },
            CadenceError::Engine(msg) => Self::Engine(msg),
            other => Self::Core(other),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
