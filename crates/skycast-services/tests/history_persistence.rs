//! History persistence against a SQLite file on disk.

use skycast_services::{
    HistoryPolicy, HistoryStore, SlotStorage, SqliteSlotStorage, StorageError, DEFAULT_HISTORY_SLOT,
};
use skycast_weather::GeoLocation;
use tempfile::TempDir;

fn open(dir: &TempDir) -> HistoryStore {
    let storage = SqliteSlotStorage::new(dir.path().join("history.db")).unwrap();
    HistoryStore::new(Box::new(storage), DEFAULT_HISTORY_SLOT, HistoryPolicy::unlimited())
}

#[test]
fn test_history_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut store = open(&dir);
        assert!(store.is_empty());
        store
            .add(GeoLocation::new(32.7174, -117.1628, "San Diego", "US").with_state("California"))
            .unwrap();
        store.add(GeoLocation::new(47.6062, -122.3321, "Seattle", "US")).unwrap();
    }

    let store = open(&dir);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(0).unwrap().city, "Seattle");
    assert_eq!(store.get(1).unwrap().state, "California");
}

#[test]
fn test_persisted_format_is_json_array() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.db");

    {
        let storage = SqliteSlotStorage::new(&path).unwrap();
        let mut store = HistoryStore::new(Box::new(storage), DEFAULT_HISTORY_SLOT, HistoryPolicy::unlimited());
        store.add(GeoLocation::new(30.2672, -97.7431, "Austin", "US")).unwrap();
    }

    let storage = SqliteSlotStorage::new(&path).unwrap();
    let raw = storage.read(DEFAULT_HISTORY_SLOT).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["city"], "Austin");
    assert_eq!(records[0]["lat"], 30.2672);
    assert_eq!(records[0]["state"], "");
}

#[test]
fn test_clear_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut store = open(&dir);
        store.add(GeoLocation::new(51.5073, -0.1276, "London", "GB")).unwrap();
        let confirmation = store.prepare_clear();
        store.clear(confirmation).unwrap();
    }

    let store = open(&dir);
    assert!(store.is_empty());
}

#[test]
fn test_open_in_missing_directory_is_backend_error() {
    let dir = TempDir::new().unwrap();
    let result = SqliteSlotStorage::new(dir.path().join("missing").join("history.db"));
    assert!(matches!(result, Err(StorageError::Backend(_))));
}
