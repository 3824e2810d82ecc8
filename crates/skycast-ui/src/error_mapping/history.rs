use skycast_core::{AppError, DatabaseError};
use skycast_services::{HistoryError, StorageError};

pub(super) fn into_app_error(e: HistoryError) -> AppError {
    match e {
        HistoryError::Storage(StorageError::Backend(s)) => {
            AppError::Database(DatabaseError::QueryFailed(s))
        }
        HistoryError::Encode(e) => AppError::Database(DatabaseError::Corruption(e.to_string())),
    }
}
