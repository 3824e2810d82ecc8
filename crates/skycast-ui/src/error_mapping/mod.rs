//! Maps UI service errors to skycast_core::AppError for consistent user-facing messages.
//! Each error source has its own module to keep mappings small and readable.

mod history;
mod search;
mod weather;
