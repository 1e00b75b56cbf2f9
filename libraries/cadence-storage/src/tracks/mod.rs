use crate::artists;
use crate::error::Result;
use cadence_core::types::{Track, TrackId};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Input for creating a track
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTrack {
    pub id: String,
    pub name: String,
    pub artist_name: Option<String>,
    pub album_id: Option<String>,
    pub disc: Option<u32>,
    pub track: Option<u32>,
    pub uri: String,
    pub artwork: Option<String>,
    pub is_favorite: bool,
    pub duration_ms: Option<u64>,
}

const TRACK_COLUMNS: &str = "t.id, t.name, t.artist_name, t.album_id, al.name AS album_name,
     t.uri, COALESCE(al.artwork, t.artwork) AS artwork, t.is_favorite, t.duration_ms";

fn map_track(row: &SqliteRow) -> Track {
    Track {
        id: TrackId::new(row.get::<String, _>("id")),
        name: row.get("name"),
        artist_name: row.get("artist_name"),
        album_id: row.get("album_id"),
        album_name: row.get("album_name"),
        uri: row.get("uri"),
        artwork: row.get("artwork"),
        is_favorite: row.get::<i64, _>("is_favorite") != 0,
        duration_ms: row
            .get::<Option<i64>, _>("duration_ms")
            .map(|ms| ms.max(0) as u64),
    }
}

pub async fn create(pool: &SqlitePool, track: &CreateTrack) -> Result<()> {
    if let Some(artist) = &track.artist_name {
        artists::create(pool, artist).await?;
    }

    sqlx::query(
        "INSERT INTO tracks
            (id, name, artist_name, album_id, disc, track, uri, artwork, is_favorite, duration_ms)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&track.id)
    .bind(&track.name)
    .bind(&track.artist_name)
    .bind(&track.album_id)
    .bind(track.disc.map(i64::from))
    .bind(track.track.map(i64::from))
    .bind(&track.uri)
    .bind(&track.artwork)
    .bind(i64::from(track.is_favorite))
    .bind(track.duration_ms.map(|ms| ms as i64))
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_by_id(pool: &SqlitePool, id: &TrackId) -> Result<Option<Track>> {
    let sql = format!(
        "SELECT {TRACK_COLUMNS}
         FROM tracks t
         LEFT JOIN albums al ON t.album_id = al.id
         WHERE t.id = ?"
    );
    let row = sqlx::query(&sql)
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(map_track))
}

/// Every track id, ordered by name
pub async fn get_all_ids(pool: &SqlitePool) -> Result<Vec<TrackId>> {
    let rows = sqlx::query("SELECT id FROM tracks ORDER BY name COLLATE NOCASE, id")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|r| TrackId::new(r.get::<String, _>("id")))
        .collect())
}

/// Ids of favorite tracks, ordered by name
pub async fn get_favorite_ids(pool: &SqlitePool) -> Result<Vec<TrackId>> {
    let rows = sqlx::query(
        "SELECT id FROM tracks WHERE is_favorite = 1 ORDER BY name COLLATE NOCASE, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| TrackId::new(r.get::<String, _>("id")))
        .collect())
}

pub async fn set_favorite(pool: &SqlitePool, id: &TrackId, is_favorite: bool) -> Result<bool> {
    let result = sqlx::query("UPDATE tracks SET is_favorite = ? WHERE id = ?")
        .bind(i64::from(is_favorite))
        .bind(id.as_str())
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &SqlitePool, id: &TrackId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
