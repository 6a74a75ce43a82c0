//! Request-level contract for triggering a job and fetching its result.

/// `process` request handling and download lookup.
pub mod process;
