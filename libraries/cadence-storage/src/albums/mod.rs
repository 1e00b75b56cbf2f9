use crate::artists;
use crate::error::Result;
use cadence_core::types::{Album, TrackId};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

/// Input for creating an album
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlbum {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    pub artwork: Option<String>,
}

pub async fn create(pool: &SqlitePool, album: &CreateAlbum) -> Result<()> {
    artists::create(pool, &album.artist_name).await?;

    sqlx::query("INSERT INTO albums (id, name, artist_name, artwork) VALUES (?, ?, ?, ?)")
        .bind(&album.id)
        .bind(&album.name)
        .bind(&album.artist_name)
        .bind(&album.artwork)
        .execute(pool)
        .await?;

    Ok(())
}

/// Album by id with its tracks in canonical order
///
/// Canonical order is disc, then track number, then name. Tracks without a
/// disc or track number sort after numbered ones.
pub async fn get_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Album>> {
    let row = sqlx::query("SELECT id, name, artist_name, artwork FROM albums WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let track_rows = sqlx::query(
        "SELECT id FROM tracks
         WHERE album_id = ?
         ORDER BY disc IS NULL, disc, track IS NULL, track, name COLLATE NOCASE, id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(Album {
        id: row.get("id"),
        name: row.get("name"),
        artist_name: row.get("artist_name"),
        artwork: row.get("artwork"),
        track_ids: track_rows
            .into_iter()
            .map(|r| TrackId::new(r.get::<String, _>("id")))
            .collect(),
    }))
}

/// Delete an album; its tracks stay but lose the album link
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
