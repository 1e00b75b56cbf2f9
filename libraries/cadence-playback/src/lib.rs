//! Cadence - Playback Control
//!
//! Decides what track plays, in what order, and how user actions map onto a
//! single sound engine.
//!
//! This crate provides:
//! - Track list resolution from albums, artists, playlists, favorites and
//!   the whole library
//! - Uniform shuffle, optionally anchored on a chosen track
//! - Persisted shuffle/repeat flags
//! - A serialized playback controller (play, pause, toggle, next, prev)
//! - An ad-hoc queue with display projections
//! - Recently played sources, resolved to display cards
//!
//! # Architecture
//!
//! `cadence-playback` never touches a database or an audio device. The
//! library, key-value store and sound engine are provided through the
//! traits in `cadence-core`.
//!
//! # Example: Anchored shuffle
//!
//! ```rust
//! use cadence_core::TrackId;
//! use cadence_playback::shuffle::shuffle_anchored;
//!
//! let tracks: Vec<TrackId> = ["t1", "t2", "t3", "t4"].into_iter().map(TrackId::from).collect();
//! let shuffled = shuffle_anchored(tracks, &TrackId::new("t3"));
//!
//! assert_eq!(shuffled[0], TrackId::new("t3"));
//! assert_eq!(shuffled.len(), 4);
//! ```
//!
//! # Example: Driving the controller
//!
//! ```rust,no_run
//! use cadence_core::{KeyValueStore, Library, SoundEngine, TrackSource};
//! use cadence_playback::{Collaborators, PlaybackController, RecentHistoryStore};
//! use std::sync::Arc;
//!
//! async fn start(
//!     library: Arc<dyn Library>,
//!     store: Arc<dyn KeyValueStore>,
//!     engine: Arc<dyn SoundEngine>,
//! ) -> cadence_playback::Result<()> {
//!     let history = Arc::new(RecentHistoryStore::load(Arc::clone(&store)).await);
//!     let controller = PlaybackController::spawn(Collaborators {
//!         library,
//!         store,
//!         engine,
//!         history,
//!     })
//!     .await;
//!
//!     controller.play(None, TrackSource::album("A1")).await?;
//!     controller.next().await?;
//!
//!     let snapshot = controller.snapshot();
//!     println!("now playing {:?}", snapshot.track_id());
//!     Ok(())
//! }
//! ```

pub mod config;
mod controller;
mod error;
pub mod events;
pub mod history;
pub mod queue;
mod resolver;
pub mod shuffle;
pub mod types;

// Public exports
pub use config::{Config, ConfigStore};
pub use controller::{Collaborators, PlaybackController, PLAYING_INFO_KEY, RESTART_THRESHOLD_MS};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use history::RecentHistoryStore;
pub use queue::QueueManager;
pub use resolver::TrackListResolver;
pub use types::{Artwork, MediaCard, PlaybackSnapshot, TrackExcerpt, TransportState};
