//! Local persistence for Skycast: slot storage backends and the search history.

pub mod history_store;
pub mod slot_storage;

pub use history_store::{
    ClearConfirmation, HistoryError, HistoryPolicy, HistoryResult, HistoryStore, DEFAULT_HISTORY_SLOT,
};
pub use slot_storage::{MemorySlotStorage, SlotStorage, SqliteSlotStorage, StorageError, StorageResult};
