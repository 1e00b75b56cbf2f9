use crate::{albums, artists, playlists, settings, tracks};
use async_trait::async_trait;
use cadence_core::{
    error::Result,
    traits::{KeyValueStore, Library},
    types::{Album, Artist, Playlist, Track, TrackId},
};
use sqlx::SqlitePool;

/// Library backed by the local `SQLite` database
#[derive(Clone)]
pub struct LocalLibrary {
    pool: SqlitePool,
}

impl LocalLibrary {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Library for LocalLibrary {
    async fn get_album(&self, id: &str) -> Result<Option<Album>> {
        Ok(albums::get_by_id(&self.pool, id).await?)
    }

    async fn get_artist(&self, name: &str) -> Result<Option<Artist>> {
        Ok(artists::get_by_name(&self.pool, name).await?)
    }

    async fn get_playlist(&self, name: &str) -> Result<Option<Playlist>> {
        Ok(playlists::get_by_name(&self.pool, name).await?)
    }

    async fn favorite_track_ids(&self) -> Result<Vec<TrackId>> {
        Ok(tracks::get_favorite_ids(&self.pool).await?)
    }

    async fn all_track_ids(&self) -> Result<Vec<TrackId>> {
        Ok(tracks::get_all_ids(&self.pool).await?)
    }

    async fn get_track(&self, id: &TrackId) -> Result<Option<Track>> {
        Ok(tracks::get_by_id(&self.pool, id).await?)
    }
}

/// Durable key-value store over the `settings` table
#[derive(Clone)]
pub struct SettingsStore {
    pool: SqlitePool,
}

impl SettingsStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SettingsStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(settings::get_setting(&self.pool, key).await?)
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        Ok(settings::set_setting(&self.pool, key, &value).await?)
    }
}
