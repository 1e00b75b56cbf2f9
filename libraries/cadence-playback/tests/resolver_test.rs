//! Tests for TrackListResolver and ConfigStore

mod common;

use cadence_core::TrackSource;
use cadence_playback::{Config, ConfigStore, PlaybackError, TrackListResolver};
use common::{ids, MemoryStore, MockLibrary};
use std::sync::Arc;

fn resolver() -> TrackListResolver {
    let library = MockLibrary::new()
        .with_album("A1", &["t1", "t2", "t3"])
        .with_artist("Artist One", &["t3", "t1"])
        .with_playlist("Mix", None, &[("t2", "t2"), ("t1", "t1"), ("t2", "t2")])
        .with_favorites(&["t3", "t1"]);
    TrackListResolver::new(Arc::new(library))
}

#[tokio::test]
async fn resolves_every_source_kind() {
    let resolver = resolver();

    assert_eq!(
        resolver.resolve(&TrackSource::album("A1")).await.unwrap(),
        ids(&["t1", "t2", "t3"])
    );
    assert_eq!(
        resolver.resolve(&TrackSource::artist("Artist One")).await.unwrap(),
        ids(&["t3", "t1"])
    );
    assert_eq!(
        resolver.resolve(&TrackSource::favorites()).await.unwrap(),
        ids(&["t1", "t3"])
    );
    assert_eq!(
        resolver.resolve(&TrackSource::all_tracks()).await.unwrap(),
        ids(&["t1", "t2", "t3"])
    );
}

#[tokio::test]
async fn playlist_duplicates_are_dropped() {
    let resolved = resolver().resolve(&TrackSource::playlist("Mix")).await.unwrap();
    assert_eq!(resolved, ids(&["t2", "t1"]));
}

#[tokio::test]
async fn missing_sources_are_not_found() {
    let resolver = resolver();

    for source in [
        TrackSource::album("deleted"),
        TrackSource::artist("Nobody"),
        TrackSource::playlist("Gone"),
    ] {
        let err = resolver.resolve(&source).await.unwrap_err();
        assert!(
            matches!(err, PlaybackError::NotFound { .. }),
            "expected NotFound for {source}, got {err:?}"
        );
    }
}

#[tokio::test]
async fn config_defaults_to_off() {
    let config = ConfigStore::new(Arc::new(MemoryStore::new()));
    assert_eq!(config.load().await, Config::default());
}

#[tokio::test]
async fn config_setters_persist() {
    let store = Arc::new(MemoryStore::new());
    let config = ConfigStore::new(store.clone());

    config.set_shuffle(true).await.unwrap();
    assert_eq!(
        config.load().await,
        Config {
            shuffle: true,
            repeat: false
        }
    );

    config.set_repeat(true).await.unwrap();
    assert!(config.repeat().await);
    assert_eq!(store.raw("repeat"), Some(serde_json::Value::Bool(true)));
}

#[tokio::test]
async fn malformed_config_falls_back_to_default() {
    let store = Arc::new(MemoryStore::new());
    store.put("shuffle", serde_json::json!("yes please"));

    let config = ConfigStore::new(store);
    assert!(!config.shuffle().await);
}
