use crate::error::Result;
use cadence_core::types::{Artist, TrackId};
use sqlx::{Row, SqlitePool};

/// Insert an artist if it is not already known
pub async fn create(pool: &SqlitePool, name: &str) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO artists (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;
    Ok(())
}

/// Artist by name with every credited track, ordered by track name
pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Artist>> {
    let exists = sqlx::query("SELECT name FROM artists WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    let Some(row) = exists else {
        return Ok(None);
    };

    let track_rows = sqlx::query(
        "SELECT id FROM tracks
         WHERE artist_name = ?
         ORDER BY name COLLATE NOCASE, id",
    )
    .bind(name)
    .fetch_all(pool)
    .await?;

    Ok(Some(Artist {
        name: row.get("name"),
        track_ids: track_rows
            .into_iter()
            .map(|r| TrackId::new(r.get::<String, _>("id")))
            .collect(),
    }))
}

/// Delete an artist; their albums go with them
pub async fn delete(pool: &SqlitePool, name: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM artists WHERE name = ?")
        .bind(name)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
