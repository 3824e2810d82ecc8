//! Persisted list of previously searched locations, most recent first.

use skycast_weather::GeoLocation;
use thiserror::Error;

use crate::slot_storage::{SlotStorage, StorageError};

/// Slot the history list is persisted under
pub const DEFAULT_HISTORY_SLOT: &str = "search_history";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to encode history: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type HistoryResult<T> = Result<T, HistoryError>;

/// Eviction policy. `max_entries: None` keeps every entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryPolicy {
    pub max_entries: Option<usize>,
}

impl HistoryPolicy {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn capped(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries),
        }
    }
}

/// Proof that the user confirmed a clear. Only obtainable from
/// [`HistoryStore::prepare_clear`].
#[derive(Debug)]
#[must_use = "a clear only happens when the confirmation is passed to HistoryStore::clear"]
pub struct ClearConfirmation {
    _private: (),
}

/// History of searched locations backed by a [`SlotStorage`] slot.
///
/// The in-memory list is authoritative; every mutation re-serializes the
/// whole list into the slot.
pub struct HistoryStore {
    storage: Box<dyn SlotStorage>,
    slot: String,
    policy: HistoryPolicy,
    entries: Vec<GeoLocation>,
}

impl HistoryStore {
    /// Load the history from `slot`. An absent, unreadable or malformed slot
    /// yields an empty history.
    pub fn new(storage: Box<dyn SlotStorage>, slot: impl Into<String>, policy: HistoryPolicy) -> Self {
        let slot = slot.into();
        let mut entries = Self::load(storage.as_ref(), &slot);

        if let Some(max) = policy.max_entries {
            if entries.len() > max {
                tracing::debug!("Truncating stored history from {} to {} entries", entries.len(), max);
                entries.truncate(max);
            }
        }

        tracing::debug!("Loaded {} history entries from slot '{}'", entries.len(), slot);
        Self {
            storage,
            slot,
            policy,
            entries,
        }
    }

    fn load(storage: &dyn SlotStorage, slot: &str) -> Vec<GeoLocation> {
        let raw = match storage.read(slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read history slot '{}': {}", slot, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<GeoLocation>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Ignoring malformed history in slot '{}': {}", slot, e);
                Vec::new()
            }
        }
    }

    fn persist(&self) -> HistoryResult<()> {
        let encoded = serde_json::to_string(&self.entries)?;
        self.storage.write(&self.slot, &encoded)?;
        Ok(())
    }

    /// True when an entry has exactly the same coordinates.
    pub fn contains(&self, location: &GeoLocation) -> bool {
        self.entries.iter().any(|e| e.same_coordinates(location))
    }

    /// Insert at the front, evict past the cap and persist. Does not
    /// de-duplicate. The in-memory list keeps the entry even if persisting fails.
    pub fn add(&mut self, location: GeoLocation) -> HistoryResult<()> {
        tracing::debug!("Adding {} to history", location.display_name());
        self.entries.insert(0, location);

        if let Some(max) = self.policy.max_entries {
            self.entries.truncate(max);
        }

        self.persist()
    }

    /// Add the location unless it is already present. Returns whether it was added.
    pub fn add_if_new(&mut self, location: GeoLocation) -> HistoryResult<bool> {
        if self.contains(&location) {
            return Ok(false);
        }
        self.add(location)?;
        Ok(true)
    }

    /// First step of a clear; hand the result to [`HistoryStore::clear`]
    /// once the user has confirmed.
    pub fn prepare_clear(&self) -> ClearConfirmation {
        ClearConfirmation { _private: () }
    }

    /// Remove the persisted slot, then empty the list. If the slot cannot be
    /// removed the entries are left in place.
    pub fn clear(&mut self, _confirmation: ClearConfirmation) -> HistoryResult<()> {
        tracing::info!("Clearing {} history entries", self.entries.len());
        self.storage.remove(&self.slot)?;
        self.entries.clear();
        Ok(())
    }

    pub fn entries(&self) -> &[GeoLocation] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&GeoLocation> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn policy(&self) -> HistoryPolicy {
        self.policy
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("slot", &self.slot)
            .field("policy", &self.policy)
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot_storage::{MemorySlotStorage, StorageResult};

    fn san_diego() -> GeoLocation {
        GeoLocation::new(32.7174, -117.1628, "San Diego", "US")
    }

    fn austin() -> GeoLocation {
        GeoLocation::new(30.2672, -97.7431, "Austin", "US")
    }

    fn store_with(storage: &MemorySlotStorage, policy: HistoryPolicy) -> HistoryStore {
        HistoryStore::new(Box::new(storage.clone()), DEFAULT_HISTORY_SLOT, policy)
    }

    #[test]
    fn test_add_then_contains() {
        let storage = MemorySlotStorage::new();
        let mut store = store_with(&storage, HistoryPolicy::unlimited());

        store.add(san_diego()).unwrap();
        assert!(store.contains(&san_diego()));
        assert!(!store.contains(&austin()));
    }

    #[test]
    fn test_same_coordinates_different_name_is_duplicate() {
        let storage = MemorySlotStorage::new();
        let mut store = store_with(&storage, HistoryPolicy::unlimited());

        store.add(san_diego()).unwrap();
        let renamed = GeoLocation::new(32.7174, -117.1628, "SD", "United States");
        assert!(store.contains(&renamed));
        assert!(!store.add_if_new(renamed).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_most_recent_first() {
        let storage = MemorySlotStorage::new();
        let mut store = store_with(&storage, HistoryPolicy::unlimited());

        store.add(san_diego()).unwrap();
        store.add(austin()).unwrap();
        assert_eq!(store.get(0).unwrap().city, "Austin");
        assert_eq!(store.get(1).unwrap().city, "San Diego");
    }

    #[test]
    fn test_add_does_not_deduplicate() {
        let storage = MemorySlotStorage::new();
        let mut store = store_with(&storage, HistoryPolicy::unlimited());

        store.add(san_diego()).unwrap();
        store.add(san_diego()).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_persisted_and_reloaded() {
        let storage = MemorySlotStorage::new();
        {
            let mut store = store_with(&storage, HistoryPolicy::unlimited());
            store.add(san_diego()).unwrap();
            store.add(austin()).unwrap();
        }

        let store = store_with(&storage, HistoryPolicy::unlimited());
        assert_eq!(store.entries(), &[austin(), san_diego()]);
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let storage = MemorySlotStorage::new();
        let mut store = store_with(&storage, HistoryPolicy::capped(2));

        store.add(san_diego()).unwrap();
        store.add(austin()).unwrap();
        store.add(GeoLocation::new(51.5073, -0.1276, "London", "GB")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().city, "London");
        assert!(!store.contains(&san_diego()));
    }

    #[test]
    fn test_truncated_on_load() {
        let storage = MemorySlotStorage::new();
        {
            let mut store = store_with(&storage, HistoryPolicy::unlimited());
            store.add(san_diego()).unwrap();
            store.add(austin()).unwrap();
        }

        let store = store_with(&storage, HistoryPolicy::capped(1));
        assert_eq!(store.entries(), &[austin()]);
    }

    #[test]
    fn test_malformed_slot_is_empty() {
        let storage = MemorySlotStorage::new();
        storage.write(DEFAULT_HISTORY_SLOT, "{not json").unwrap();

        let store = store_with(&storage, HistoryPolicy::unlimited());
        assert!(store.is_empty());
    }

    #[test]
    fn test_legacy_records_without_state_load() {
        let storage = MemorySlotStorage::new();
        storage
            .write(
                DEFAULT_HISTORY_SLOT,
                r#"[{"lat":32.7174,"lon":-117.1628,"city":"San Diego","country":"US"}]"#,
            )
            .unwrap();

        let store = store_with(&storage, HistoryPolicy::unlimited());
        assert!(store.contains(&san_diego()));
    }

    /// Storage whose removals always fail.
    struct StuckStorage(MemorySlotStorage);

    impl SlotStorage for StuckStorage {
        fn read(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.read(key)
        }

        fn write(&self, key: &str, value: &str) -> StorageResult<()> {
            self.0.write(key, value)
        }

        fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::backend("disk I/O error"))
        }
    }

    #[test]
    fn test_failed_clear_keeps_entries() {
        let storage = MemorySlotStorage::new();
        let mut store = HistoryStore::new(
            Box::new(StuckStorage(storage.clone())),
            DEFAULT_HISTORY_SLOT,
            HistoryPolicy::unlimited(),
        );
        store.add(san_diego()).unwrap();

        let confirmation = store.prepare_clear();
        assert!(store.clear(confirmation).is_err());
        assert_eq!(store.entries(), &[san_diego()]);

        // Reopening shows the same history that is still on screen
        let reopened = store_with(&storage, HistoryPolicy::unlimited());
        assert_eq!(reopened.entries(), store.entries());
    }

    #[test]
    fn test_clear_removes_slot() {
        let storage = MemorySlotStorage::new();
        let mut store = store_with(&storage, HistoryPolicy::unlimited());
        store.add(san_diego()).unwrap();
        assert!(!storage.is_empty());

        let confirmation = store.prepare_clear();
        store.clear(confirmation).unwrap();

        assert!(store.is_empty());
        assert!(storage.is_empty());
    }
}
