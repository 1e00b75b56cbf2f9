
use cadence_core::{KeyValueStore, KeyValueStoreExt, TrackSource};
use cadence_storage::{settings, SettingsStore};
use test_helpers::TestDb;

#[tokio::test]
async fn test_set_and_get_setting() {
    let db = TestDb::new().await;

    let value = serde_json::json!(true);
    settings::set_setting(db.pool(), "shuffle", &value)
        .await
        .unwrap();

    let result = settings::get_setting(db.pool(), "shuffle")
        .await
        .unwrap();
    assert_eq!(result, Some(value));
}

#[tokio::test]
async fn test_get_non_existent_setting() {
    let db = TestDb::new().await;

    let result = settings::get_setting(db.pool(), "non_existent_key").await.unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
async fn test_update_existing_setting() {
    let db = TestDb::new().await;

    settings::set_setting(db.pool(), "repeat", &serde_json::json!(false))
        .await
        .unwrap();
    settings::set_setting(db.pool(), "repeat", &serde_json::json!(true))
        .await
        .unwrap();

    let result = settings::get_setting(db.pool(), "repeat")
        .await
        .unwrap();
    assert_eq!(result, Some(serde_json::json!(true)));
}

#[tokio::test]
async fn test_delete_setting() {
    let db = TestDb::new().await;

    settings::set_setting(db.pool(), "k", &serde_json::json!(1)).await.unwrap();
    assert!(settings::delete_setting(db.pool(), "k").await.unwrap());
    assert!(!settings::delete_setting(db.pool(), "k").await.unwrap());
}

#[tokio::test]
async fn store_persists_typed_values_across_instances() {
    let db = TestDb::new().await;

    let history = vec![TrackSource::album("A1"), TrackSource::favorites()];
    SettingsStore::new(db.pool().clone())
        .set_json("recently-played", &history)
        .await
        .unwrap();

    let reopened = SettingsStore::new(db.pool().clone());
    let loaded: Vec<TrackSource> = reopened
        .get_or("recently-played", Vec::new())
        .await
        .unwrap();
    assert_eq!(loaded, history);

    let raw = reopened.get("recently-played").await.unwrap().unwrap();
    assert_eq!(raw[0]["kind"], "album");
}
