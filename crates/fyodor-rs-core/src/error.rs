//! Error types for the message-processing core.

use fyodor_rs_store::StoreError;
use thiserror::Error;

/// Errors returned while processing a single message.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The record store could not be read or written.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
    /// A built-in pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
