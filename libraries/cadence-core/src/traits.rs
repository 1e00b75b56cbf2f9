/// Collaborator traits for Cadence
///
/// The playback core never talks to a database, a settings file or an audio
/// device directly. Hosts provide these three seams.
use crate::error::Result;
use crate::types::{
    Album, Artist, LoadOptions, PlaybackStatus, Playlist, StatusListener, Track, TrackId,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read-only query surface of the music library
///
/// Lookups return `Ok(None)` for entities that do not exist; `Err` is reserved
/// for failures of the store itself.
#[async_trait]
pub trait Library: Send + Sync {
    /// Album by id, with track ids in canonical order
    async fn get_album(&self, id: &str) -> Result<Option<Album>>;

    /// Artist by name, with every credited track id
    async fn get_artist(&self, name: &str) -> Result<Option<Artist>>;

    /// Playlist by name, with members in membership order
    async fn get_playlist(&self, name: &str) -> Result<Option<Playlist>>;

    /// Ids of all tracks flagged favorite
    async fn favorite_track_ids(&self) -> Result<Vec<TrackId>>;

    /// Ids of every known track
    async fn all_track_ids(&self) -> Result<Vec<TrackId>>;

    /// Single track with its media reference and display data
    async fn get_track(&self, id: &TrackId) -> Result<Option<Track>>;
}

/// Durable key-value store holding JSON values
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Stored value for `key`, `None` when never set
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;
}

/// Typed helpers over any [`KeyValueStore`]
#[async_trait]
pub trait KeyValueStoreExt: KeyValueStore {
    /// Deserialize the value under `key`, or return `default` when unset
    async fn get_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        match self.get(key).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(default),
        }
    }

    /// Serialize `value` and store it under `key`
    async fn set_json<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + Sync + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        self.set(key, value).await
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

/// Adapter over the single physical audio resource
///
/// At any instant the engine is either unloaded or holds exactly one asset.
/// Callers must `unload` before loading a different asset.
#[async_trait]
pub trait SoundEngine: Send + Sync {
    /// Load `uri`, starting playback when `options.autoplay` is set
    async fn load(&self, uri: &str, options: LoadOptions) -> Result<()>;

    /// Release the loaded asset (no-op when nothing is loaded)
    async fn unload(&self) -> Result<()>;

    /// Start or resume the loaded asset
    async fn play(&self) -> Result<()>;

    /// Pause the loaded asset
    async fn pause(&self) -> Result<()>;

    /// Current status of the resource
    async fn status(&self) -> Result<PlaybackStatus>;

    /// Replace the single status subscription
    ///
    /// Passing `None` removes the current listener.
    fn set_status_listener(&self, listener: Option<StatusListener>);
}
