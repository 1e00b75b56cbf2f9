//! Tests for QueueManager display projections

mod common;

use cadence_core::{PlayingInfo, TrackId, TrackSource};
use cadence_playback::{QueueManager, TrackExcerpt};
use common::{ids, MockLibrary};

#[tokio::test]
async fn excerpts_skip_missing_tracks() {
    let library = MockLibrary::new().with_album("A1", &["t1", "t2", "t3"]);
    library.remove_track("t2");

    let excerpts = QueueManager::resolve_excerpts(&library, &ids(&["t3", "t2", "t1"])).await;

    assert_eq!(
        excerpts,
        vec![
            TrackExcerpt {
                id: TrackId::new("t3"),
                name: "t3".to_string(),
                artist_name: Some("Artist".to_string()),
                artwork: Some("t3.jpg".to_string()),
            },
            TrackExcerpt {
                id: TrackId::new("t1"),
                name: "t1".to_string(),
                artist_name: Some("Artist".to_string()),
                artwork: Some("t1.jpg".to_string()),
            },
        ]
    );
}

#[tokio::test]
async fn upcoming_shows_five_without_wrapping() {
    let list = ids(&["t1", "t2", "t3", "t4", "t5", "t6", "t7", "t8"]);
    let info = PlayingInfo::new(TrackSource::all_tracks(), list, 0).unwrap();

    assert_eq!(
        QueueManager::upcoming(Some(&info)),
        ids(&["t2", "t3", "t4", "t5", "t6"])
    );

    let last = PlayingInfo::new(TrackSource::all_tracks(), ids(&["t1", "t2"]), 1).unwrap();
    assert!(QueueManager::upcoming(Some(&last)).is_empty());
}

#[tokio::test]
async fn queue_is_independent_of_session() {
    let queue = QueueManager::new();
    queue.add(TrackId::new("x1")).await;
    queue.add(TrackId::new("x2")).await;

    let info = PlayingInfo::new(TrackSource::album("A1"), ids(&["t1", "t2"]), 0).unwrap();
    assert_eq!(QueueManager::current(Some(&info)), Some(TrackId::new("t1")));
    assert_eq!(queue.full().await, ids(&["x1", "x2"]));

    queue.remove_at(0).await.unwrap();
    assert_eq!(queue.entries().await, ids(&["x2"]));
}
