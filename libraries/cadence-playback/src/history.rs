//! Recently played sources
//!
//! Bounded, newest-first list of the track sources sessions were started
//! from, persisted through the key-value store and resolved to display cards
//! on demand.

use crate::error::{PlaybackError, Result};
use crate::types::{track_count_label, Artwork, MediaCard};
use cadence_core::{KeyValueStore, KeyValueStoreExt, Library, SourceKind, TrackSource};
use futures::future::join_all;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const RECENTLY_PLAYED_KEY: &str = "recently-played";

/// Maximum number of remembered sources
pub const HISTORY_CAPACITY: usize = 10;

/// Title of the favorites pseudo-playlist
pub const FAVORITES_TITLE: &str = "Favorite Tracks";

/// Title of the all-tracks pseudo-playlist
pub const ALL_TRACKS_TITLE: &str = "Tracks";

const COLLAGE_SIZE: usize = 4;

/// Persisted history of played sources (most recent = front)
pub struct RecentHistoryStore {
    store: Arc<dyn KeyValueStore>,
    entries: Mutex<VecDeque<TrackSource>>,
}

impl RecentHistoryStore {
    /// Load the persisted history
    ///
    /// A missing or malformed value starts an empty history.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let stored = store
            .get_or::<Vec<TrackSource>>(RECENTLY_PLAYED_KEY, Vec::new())
            .await;
        let entries: VecDeque<TrackSource> = match stored {
            Ok(sources) => sources.into_iter().take(HISTORY_CAPACITY).collect(),
            Err(e) => {
                warn!(error = %e, "discarding unreadable recently played list");
                VecDeque::new()
            }
        };

        Self {
            store,
            entries: Mutex::new(entries),
        }
    }

    /// Record `source` as the most recently played
    ///
    /// An equal entry is moved to the front rather than duplicated.
    pub async fn push(&self, source: TrackSource) -> Result<()> {
        let snapshot = {
            let mut entries = self.entries.lock().await;
            entries.retain(|existing| existing != &source);
            entries.push_front(source);
            entries.truncate(HISTORY_CAPACITY);
            entries.iter().cloned().collect::<Vec<_>>()
        };

        self.store.set_json(RECENTLY_PLAYED_KEY, &snapshot).await?;
        Ok(())
    }

    /// Current entries, newest first
    pub async fn entries(&self) -> Vec<TrackSource> {
        self.entries.lock().await.iter().cloned().collect()
    }

    /// Resolve every entry to a media card
    ///
    /// Entries are resolved concurrently. Entries whose entity no longer
    /// exists, or whose lookup fails, are left out.
    pub async fn resolve(&self, library: &dyn Library) -> Vec<MediaCard> {
        let entries = self.entries().await;
        let results = join_all(entries.iter().map(|source| media_card(library, source))).await;

        entries
            .iter()
            .zip(results)
            .filter_map(|(source, result)| match result {
                Ok(card) => Some(card),
                Err(e) => {
                    debug!(source = %source, error = %e, "dropping recently played entry");
                    None
                }
            })
            .collect()
    }
}

/// Display card for a single source
pub async fn media_card(library: &dyn Library, source: &TrackSource) -> Result<MediaCard> {
    let reference = source.reference.as_str();

    let card = match source.kind {
        SourceKind::Album => {
            let album = library
                .get_album(reference)
                .await?
                .ok_or_else(|| PlaybackError::not_found("Album", reference))?;
            MediaCard {
                source: source.clone(),
                href: format!("/album/{reference}"),
                title: album.name,
                subtitle: album.artist_name,
                extra: Some(format!("| {}", track_count_label(album.track_ids.len()))),
                artwork: Artwork::Single(album.artwork),
            }
        }
        SourceKind::Artist => {
            let artist = library
                .get_artist(reference)
                .await?
                .ok_or_else(|| PlaybackError::not_found("Artist", reference))?;
            MediaCard {
                source: source.clone(),
                href: format!("/artist/{reference}"),
                title: artist.name,
                subtitle: track_count_label(artist.track_ids.len()),
                extra: None,
                artwork: Artwork::Single(None),
            }
        }
        SourceKind::Favorites => {
            let count = library.favorite_track_ids().await?.len();
            MediaCard {
                source: source.clone(),
                href: format!("/playlist/{FAVORITES_TITLE}"),
                title: FAVORITES_TITLE.to_string(),
                subtitle: track_count_label(count),
                extra: None,
                artwork: Artwork::Single(None),
            }
        }
        SourceKind::AllTracks => {
            let count = library.all_track_ids().await?.len();
            MediaCard {
                source: source.clone(),
                href: "/track".to_string(),
                title: ALL_TRACKS_TITLE.to_string(),
                subtitle: track_count_label(count),
                extra: None,
                artwork: Artwork::Single(None),
            }
        }
        SourceKind::Playlist => {
            let playlist = library
                .get_playlist(reference)
                .await?
                .ok_or_else(|| PlaybackError::not_found("Playlist", reference))?;
            let subtitle = track_count_label(playlist.tracks.len());

            let artwork = match playlist.artwork {
                Some(cover) => Artwork::Single(Some(cover)),
                None => {
                    let mut members = playlist.tracks;
                    members.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
                    Artwork::Collage(
                        members
                            .into_iter()
                            .take(COLLAGE_SIZE)
                            .map(|member| member.artwork)
                            .collect(),
                    )
                }
            };

            MediaCard {
                source: source.clone(),
                href: format!("/playlist/{reference}"),
                title: playlist.name,
                subtitle,
                extra: None,
                artwork,
            }
        }
    };

    Ok(card)
}
