//! Message record persistence for Fyodor.

pub mod credentials;
pub mod error;
pub mod file;
pub mod model;
pub mod store;

/// Store credentials descriptor.
pub use credentials::StoreCredentials;
/// Store error type.
pub use error::StoreError;
/// File-backed record store.
pub use file::FileRecordStore;
/// Message record models.
pub use model::{MessageRecord, NewMessageRecord};
/// Record store interface.
pub use store::RecordStore;
