//! Demo library seeding

use cadence_core::TrackId;
use cadence_storage::albums::{self, CreateAlbum};
use cadence_storage::tracks::{self, CreateTrack};
use cadence_storage::{playlists, StorageError};
use sqlx::SqlitePool;
use tracing::info;

struct DemoAlbum {
    id: &'static str,
    name: &'static str,
    artist: &'static str,
    tracks: &'static [&'static str],
}

const DEMO_ALBUMS: &[DemoAlbum] = &[
    DemoAlbum {
        id: "night-drive",
        name: "Night Drive",
        artist: "Neon Coast",
        tracks: &["Ignition", "Overpass", "Tail Lights", "Last Exit"],
    },
    DemoAlbum {
        id: "field-notes",
        name: "Field Notes",
        artist: "Marsh Hollow",
        tracks: &["Heron", "Reeds", "Low Tide"],
    },
];

const DEMO_PLAYLIST: &str = "Commute";

/// Insert a small demo library, unless it is already there
///
/// Returns `false` when the demo data was already present.
pub async fn seed(pool: &SqlitePool) -> Result<bool, StorageError> {
    if albums::get_by_id(pool, DEMO_ALBUMS[0].id).await?.is_some() {
        info!("demo library already present");
        return Ok(false);
    }

    for album in DEMO_ALBUMS {
        albums::create(
            pool,
            &CreateAlbum {
                id: album.id.to_string(),
                name: album.name.to_string(),
                artist_name: album.artist.to_string(),
                artwork: Some(format!("{}.jpg", album.id)),
            },
        )
        .await?;

        for (number, title) in album.tracks.iter().enumerate() {
            tracks::create(
                pool,
                &CreateTrack {
                    id: track_id(album.id, number),
                    name: (*title).to_string(),
                    artist_name: Some(album.artist.to_string()),
                    album_id: Some(album.id.to_string()),
                    disc: Some(1),
                    track: Some(number as u32 + 1),
                    uri: format!("file:///music/{}/{:02}.flac", album.id, number + 1),
                    // Every other track is a favorite
                    is_favorite: number % 2 == 0,
                    ..CreateTrack::default()
                },
            )
            .await?;
        }
    }

    playlists::create(pool, DEMO_PLAYLIST, None).await?;
    for id in [
        track_id("field-notes", 2),
        track_id("night-drive", 0),
        track_id("night-drive", 3),
    ] {
        playlists::add_track(pool, DEMO_PLAYLIST, &TrackId::new(id)).await?;
    }

    info!(
        albums = DEMO_ALBUMS.len(),
        playlist = DEMO_PLAYLIST,
        "seeded demo library"
    );
    Ok(true)
}

fn track_id(album: &str, index: usize) -> String {
    format!("{album}-{:02}", index + 1)
}
