//! Outbound reaction seam implemented by the platform integration.

use crate::ReactionAction;
use async_trait::async_trait;

/// Error returned when a reaction could not be delivered.
#[derive(Debug, thiserror::Error)]
pub enum ReactionError {
    /// Writing the action to the platform side failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Encoding the action failed.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The platform rejected the reaction.
    #[error("rejected: {0}")]
    Rejected(String),
}

#[async_trait]
/// Sink for reactions produced by the message handler.
pub trait Reactor: Send + Sync {
    /// Attach `action.emoji` to the referenced message.
    async fn add_reaction(&self, action: ReactionAction) -> Result<(), ReactionError>;
}
