use async_trait::async_trait;
use fyodor_rs_protocol::{ReactionAction, ReactionError, Reactor};
use parking_lot::Mutex;

/// Reactor that remembers every reaction it was asked to add.
#[derive(Default)]
pub struct RecordingReactor {
    actions: Mutex<Vec<ReactionAction>>,
}

impl RecordingReactor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> Vec<ReactionAction> {
        self.actions.lock().clone()
    }
}

#[async_trait]
impl Reactor for RecordingReactor {
    async fn add_reaction(&self, action: ReactionAction) -> Result<(), ReactionError> {
        self.actions.lock().push(action);
        Ok(())
    }
}

/// Reactor whose every call is rejected.
#[derive(Default)]
pub struct FailingReactor;

#[async_trait]
impl Reactor for FailingReactor {
    async fn add_reaction(&self, _action: ReactionAction) -> Result<(), ReactionError> {
        Err(ReactionError::Rejected("missing permissions".to_string()))
    }
}
