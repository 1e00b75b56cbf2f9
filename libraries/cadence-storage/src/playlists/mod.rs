use crate::error::{Result, StorageError};
use cadence_core::types::{Playlist, PlaylistTrack, TrackId};
use sqlx::{Row, SqlitePool};

pub async fn create(pool: &SqlitePool, name: &str, artwork: Option<&str>) -> Result<()> {
    sqlx::query("INSERT INTO playlists (name, artwork) VALUES (?, ?)")
        .bind(name)
        .bind(artwork)
        .execute(pool)
        .await?;
    Ok(())
}

/// Append a track to the end of a playlist
pub async fn add_track(pool: &SqlitePool, name: &str, track_id: &TrackId) -> Result<()> {
    let mut tx = pool.begin().await?;

    let exists = sqlx::query("SELECT name FROM playlists WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(StorageError::not_found("Playlist", name));
    }

    let next_position: i64 = sqlx::query(
        "SELECT COALESCE(MAX(position), -1) + 1 AS next FROM tracks_to_playlists WHERE playlist_name = ?",
    )
    .bind(name)
    .fetch_one(&mut *tx)
    .await?
    .get("next");

    sqlx::query(
        "INSERT INTO tracks_to_playlists (playlist_name, track_id, position) VALUES (?, ?, ?)",
    )
    .bind(name)
    .bind(track_id.as_str())
    .bind(next_position)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

/// Playlist by name with members in membership order
pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT name, artwork FROM playlists WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let member_rows = sqlx::query(
        "SELECT t.id, t.name, COALESCE(al.artwork, t.artwork) AS artwork
         FROM tracks_to_playlists tp
         JOIN tracks t ON tp.track_id = t.id
         LEFT JOIN albums al ON t.album_id = al.id
         WHERE tp.playlist_name = ?
         ORDER BY tp.position",
    )
    .bind(name)
    .fetch_all(pool)
    .await?;

    Ok(Some(Playlist {
        name: row.get("name"),
        artwork: row.get("artwork"),
        tracks: member_rows
            .into_iter()
            .map(|r| PlaylistTrack {
                track_id: TrackId::new(r.get::<String, _>("id")),
                name: r.get("name"),
                artwork: r.get("artwork"),
            })
            .collect(),
    }))
}

pub async fn delete(pool: &SqlitePool, name: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlists WHERE name = ?")
        .bind(name)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
