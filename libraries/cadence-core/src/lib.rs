//! Cadence Core
//!
//! Platform-agnostic core types, traits, and error handling for Cadence.
//!
//! This crate provides the building blocks shared by the storage layer, the
//! playback controller and the hosts that embed them.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `TrackSource`, `PlayingInfo`, library entities
//! - **Collaborator Traits**: `Library`, `KeyValueStore`, `SoundEngine`
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::types::{PlayingInfo, TrackId, TrackSource};
//!
//! let source = TrackSource::album("A1");
//! let info = PlayingInfo::new(
//!     source.clone(),
//!     vec![TrackId::new("t1"), TrackId::new("t2")],
//!     1,
//! )
//! .unwrap();
//!
//! assert_eq!(info.track_id(), Some(&TrackId::new("t2")));
//! assert_eq!(info.list_src(), &source);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CadenceError, Result};
pub use traits::{KeyValueStore, KeyValueStoreExt, Library, SoundEngine};

pub use types::{
    // Library entities
    Album, Artist, Playlist, PlaylistTrack, Track, TrackId,
    // Session
    PlayingInfo, SourceKind, TrackSource,
    // Sound engine contract
    LoadOptions, PlaybackStatus, StatusListener,
};
