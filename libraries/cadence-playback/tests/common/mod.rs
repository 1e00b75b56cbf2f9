//! Shared test infrastructure: in-memory library, key-value store and a
//! recording sound engine.

#![allow(dead_code)]

use async_trait::async_trait;
use cadence_core::{
    Album, Artist, CadenceError, KeyValueStore, Library, LoadOptions, PlaybackStatus, Playlist,
    PlaylistTrack, Result, SoundEngine, StatusListener, Track, TrackId,
};
use cadence_playback::{Collaborators, PlaybackController, PlaybackSnapshot, RecentHistoryStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

// ============================================================================
// Library
// ============================================================================

#[derive(Default)]
pub struct MockLibrary {
    tracks: Mutex<HashMap<TrackId, Track>>,
    albums: Mutex<HashMap<String, Album>>,
    artists: Mutex<HashMap<String, Artist>>,
    playlists: Mutex<HashMap<String, Playlist>>,
    /// Every track id in insertion order
    order: Mutex<Vec<TrackId>>,
}

pub fn ids(names: &[&str]) -> Vec<TrackId> {
    names.iter().map(|n| TrackId::new(*n)).collect()
}

pub fn uri(track: &str) -> String {
    format!("file:///music/{track}.flac")
}

impl MockLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_track(&self, id: &str, name: &str) {
        let track = Track {
            id: TrackId::new(id),
            name: name.to_string(),
            artist_name: Some("Artist".to_string()),
            album_id: None,
            album_name: None,
            uri: uri(id),
            artwork: Some(format!("{id}.jpg")),
            is_favorite: false,
            duration_ms: Some(180_000),
        };
        let mut order = self.order.lock().unwrap();
        if !order.contains(&track.id) {
            order.push(track.id.clone());
        }
        self.tracks.lock().unwrap().insert(track.id.clone(), track);
    }

    /// Album whose tracks are named after their ids
    pub fn with_album(self, id: &str, tracks: &[&str]) -> Self {
        for track in tracks {
            self.add_track(track, track);
        }
        self.albums.lock().unwrap().insert(
            id.to_string(),
            Album {
                id: id.to_string(),
                name: format!("Album {id}"),
                artist_name: "Artist".to_string(),
                artwork: Some(format!("{id}.jpg")),
                track_ids: ids(tracks),
            },
        );
        self
    }

    pub fn with_artist(self, name: &str, tracks: &[&str]) -> Self {
        for track in tracks {
            self.add_track(track, track);
        }
        self.artists.lock().unwrap().insert(
            name.to_string(),
            Artist {
                name: name.to_string(),
                track_ids: ids(tracks),
            },
        );
        self
    }

    /// Playlist members given as `(track id, track name)`
    pub fn with_playlist(self, name: &str, cover: Option<&str>, members: &[(&str, &str)]) -> Self {
        for (id, track_name) in members {
            self.add_track(id, track_name);
        }
        self.playlists.lock().unwrap().insert(
            name.to_string(),
            Playlist {
                name: name.to_string(),
                artwork: cover.map(str::to_string),
                tracks: members
                    .iter()
                    .map(|(id, track_name)| PlaylistTrack {
                        track_id: TrackId::new(*id),
                        name: (*track_name).to_string(),
                        artwork: Some(format!("{id}.jpg")),
                    })
                    .collect(),
            },
        );
        self
    }

    pub fn with_favorites(self, favorites: &[&str]) -> Self {
        {
            let mut tracks = self.tracks.lock().unwrap();
            for id in favorites {
                if let Some(track) = tracks.get_mut(&TrackId::new(*id)) {
                    track.is_favorite = true;
                }
            }
        }
        self
    }

    pub fn remove_album(&self, id: &str) {
        self.albums.lock().unwrap().remove(id);
    }

    pub fn remove_track(&self, id: &str) {
        self.tracks.lock().unwrap().remove(&TrackId::new(id));
    }
}

#[async_trait]
impl Library for MockLibrary {
    async fn get_album(&self, id: &str) -> Result<Option<Album>> {
        Ok(self.albums.lock().unwrap().get(id).cloned())
    }

    async fn get_artist(&self, name: &str) -> Result<Option<Artist>> {
        Ok(self.artists.lock().unwrap().get(name).cloned())
    }

    async fn get_playlist(&self, name: &str) -> Result<Option<Playlist>> {
        Ok(self.playlists.lock().unwrap().get(name).cloned())
    }

    async fn favorite_track_ids(&self) -> Result<Vec<TrackId>> {
        let tracks = self.tracks.lock().unwrap();
        Ok(self
            .order
            .lock()
            .unwrap()
            .iter()
            .filter(|id| tracks.get(*id).is_some_and(|t| t.is_favorite))
            .cloned()
            .collect())
    }

    async fn all_track_ids(&self) -> Result<Vec<TrackId>> {
        Ok(self.order.lock().unwrap().clone())
    }

    async fn get_track(&self, id: &TrackId) -> Result<Option<Track>> {
        Ok(self.tracks.lock().unwrap().get(id).cloned())
    }
}

// ============================================================================
// Key-value store
// ============================================================================

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<serde_json::Value> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn put(&self, key: &str, value: serde_json::Value) {
        self.values.lock().unwrap().insert(key.to_string(), value);
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        self.put(key, value);
        Ok(())
    }
}

// ============================================================================
// Sound engine
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Load { uri: String, autoplay: bool },
    Unload,
    Play,
    Pause,
}

/// Records every call and lets tests fire status updates through any
/// listener ever registered
#[derive(Default)]
pub struct MockEngine {
    calls: Mutex<Vec<EngineCall>>,
    loaded: Mutex<Option<String>>,
    position_ms: AtomicU64,
    listeners: Mutex<Vec<Option<StatusListener>>>,
    fail_load: AtomicBool,
    fail_play: AtomicBool,
    finish_on_unload: AtomicBool,
    fail_unload: AtomicBool,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// `(uri, autoplay)` of every load, in order
    pub fn loads(&self) -> Vec<(String, bool)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EngineCall::Load { uri, autoplay } => Some((uri, autoplay)),
                _ => None,
            })
            .collect()
    }

    pub fn loaded_uri(&self) -> Option<String> {
        self.loaded.lock().unwrap().clone()
    }

    pub fn set_position(&self, position_ms: u64) {
        self.position_ms.store(position_ms, Ordering::SeqCst);
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    pub fn fail_unloads(&self, fail: bool) {
        self.fail_unload.store(fail, Ordering::SeqCst);
    }

    pub fn fail_plays(&self, fail: bool) {
        self.fail_play.store(fail, Ordering::SeqCst);
    }

    /// Make every `unload` fire a completion through the latest listener,
    /// like an engine reporting the end of the outgoing asset late
    pub fn finish_on_unload(&self, enabled: bool) {
        self.finish_on_unload.store(enabled, Ordering::SeqCst);
    }

    /// Number of listeners registered so far
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    /// Fire `status` through the listener registered at `index`
    pub fn emit_from(&self, index: usize, status: PlaybackStatus) {
        let listeners = self.listeners.lock().unwrap();
        if let Some(Some(listener)) = listeners.get(index) {
            listener(status);
        }
    }

    /// Fire `status` through the most recent listener
    pub fn emit(&self, status: PlaybackStatus) {
        let count = self.listener_count();
        if count > 0 {
            self.emit_from(count - 1, status);
        }
    }

    pub fn emit_position(&self, position_ms: u64) {
        self.emit(PlaybackStatus {
            loaded: true,
            position_ms,
            duration_ms: Some(180_000),
            just_finished: false,
        });
    }

    pub fn finish(&self) {
        self.emit(finished_status());
    }
}

pub fn finished_status() -> PlaybackStatus {
    PlaybackStatus {
        loaded: true,
        position_ms: 180_000,
        duration_ms: Some(180_000),
        just_finished: true,
    }
}

#[async_trait]
impl SoundEngine for MockEngine {
    async fn load(&self, uri: &str, options: LoadOptions) -> Result<()> {
        self.calls.lock().unwrap().push(EngineCall::Load {
            uri: uri.to_string(),
            autoplay: options.autoplay,
        });
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(CadenceError::engine("load rejected"));
        }
        *self.loaded.lock().unwrap() = Some(uri.to_string());
        self.position_ms.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn unload(&self) -> Result<()> {
        self.calls.lock().unwrap().push(EngineCall::Unload);
        if self.finish_on_unload.load(Ordering::SeqCst) {
            self.finish();
        }
        if self.fail_unload.load(Ordering::SeqCst) {
            return Err(CadenceError::engine("unload rejected"));
        }
        *self.loaded.lock().unwrap() = None;
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        self.calls.lock().unwrap().push(EngineCall::Play);
        if self.fail_play.load(Ordering::SeqCst) {
            return Err(CadenceError::engine("play rejected"));
        }
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.calls.lock().unwrap().push(EngineCall::Pause);
        Ok(())
    }

    async fn status(&self) -> Result<PlaybackStatus> {
        let loaded = self.loaded.lock().unwrap().is_some();
        Ok(PlaybackStatus {
            loaded,
            position_ms: if loaded {
                self.position_ms.load(Ordering::SeqCst)
            } else {
                0
            },
            duration_ms: None,
            just_finished: false,
        })
    }

    fn set_status_listener(&self, listener: Option<StatusListener>) {
        // Keep every registration so tests can fire stale listeners
        if let Some(listener) = listener {
            self.listeners.lock().unwrap().push(Some(listener));
        }
    }
}

// ============================================================================
// Harness
// ============================================================================

pub struct Harness {
    pub library: Arc<MockLibrary>,
    pub store: Arc<MemoryStore>,
    pub engine: Arc<MockEngine>,
    pub history: Arc<RecentHistoryStore>,
    pub controller: PlaybackController,
}

impl Harness {
    pub async fn new(library: MockLibrary) -> Self {
        Self::with_store(Arc::new(library), Arc::new(MemoryStore::new())).await
    }

    pub async fn with_store(library: Arc<MockLibrary>, store: Arc<MemoryStore>) -> Self {
        let engine = Arc::new(MockEngine::new());
        let history = Arc::new(RecentHistoryStore::load(store.clone()).await);
        let controller = PlaybackController::spawn(Collaborators {
            library: library.clone(),
            store: store.clone(),
            engine: engine.clone(),
            history: history.clone(),
        })
        .await;

        Self {
            library,
            store,
            engine,
            history,
            controller,
        }
    }

    pub fn set_flag(&self, key: &str, value: bool) {
        self.store.put(key, serde_json::Value::Bool(value));
    }

    /// Wait until the published snapshot satisfies `predicate`
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&PlaybackSnapshot) -> bool,
    ) -> PlaybackSnapshot {
        let mut rx: watch::Receiver<PlaybackSnapshot> = self.controller.subscribe();
        let snapshot = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(predicate))
            .await
            .expect("timed out waiting for snapshot")
            .expect("controller stopped")
            .clone();
        snapshot
    }
}
