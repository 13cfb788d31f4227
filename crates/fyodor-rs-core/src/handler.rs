//! Per-message processing and the event handler wrapping it.

use crate::detector::{Verdict, detect_duplicate};
use crate::error::CoreError;
use crate::filter::{ModerationPolicy, SkipReason};
use crate::normalize::Normalizer;
use fyodor_rs_config::FyodorConfig;
use fyodor_rs_protocol::{InboundMessage, ReactionAction, Reactor, UserId};
use fyodor_rs_store::RecordStore;
use log::{debug, info, warn};
use std::sync::Arc;

/// Immutable state consulted for every message.
#[derive(Debug, Clone)]
pub struct HandlerContext {
    policy: ModerationPolicy,
    normalizer: Normalizer,
    self_user_id: Option<UserId>,
}

impl HandlerContext {
    /// Build a context from a validated config.
    pub fn new(config: &FyodorConfig) -> Result<Self, CoreError> {
        Ok(Self {
            policy: ModerationPolicy::from_config(config),
            normalizer: Normalizer::new()?,
            self_user_id: None,
        })
    }

    /// Set the bot's own account id.
    pub fn with_self_user_id(mut self, user_id: UserId) -> Self {
        self.self_user_id = Some(user_id);
        self
    }

    /// Bot's own account id, once known.
    pub fn self_user_id(&self) -> Option<UserId> {
        self.self_user_id
    }
}

/// Result of running the core pipeline on one message.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The message was filtered out before any store access.
    Skipped(SkipReason),
    /// The message was recorded.
    Processed(Verdict),
}

/// Filter, normalize and check one message against the store.
///
/// Skipped messages never touch the store. Processed messages produce exactly
/// one insert.
pub async fn process(
    message: &InboundMessage,
    context: &HandlerContext,
    store: &dyn RecordStore,
) -> Result<Outcome, CoreError> {
    if let Some(reason) = context.policy.screen(message, context.self_user_id) {
        return Ok(Outcome::Skipped(reason));
    }
    let Some(normalized) = context.normalizer.normalize(&message.content) else {
        return Ok(Outcome::Skipped(SkipReason::EmptyAfterNormalization));
    };
    let verdict = detect_duplicate(store, normalized, message.author_id, message.created_at).await?;
    Ok(Outcome::Processed(verdict))
}

/// What the handler did with an event.
#[derive(Debug)]
pub enum Disposition {
    /// Filtered out.
    Skipped(SkipReason),
    /// Recorded; `reacted` is true when a reaction was delivered.
    Recorded { verdict: Verdict, reacted: bool },
    /// Processing failed and the message was dropped.
    Dropped(CoreError),
}

/// Event handler invoked by the platform integration once per event.
///
/// Failures are logged and confined to the message that caused them.
pub struct MessageHandler {
    context: HandlerContext,
    store: Arc<dyn RecordStore>,
    reactor: Arc<dyn Reactor>,
}

impl MessageHandler {
    /// Create a handler over a store and reaction sink.
    pub fn new(
        context: HandlerContext,
        store: Arc<dyn RecordStore>,
        reactor: Arc<dyn Reactor>,
    ) -> Self {
        Self {
            context,
            store,
            reactor,
        }
    }

    /// Current handler context.
    pub fn context(&self) -> &HandlerContext {
        &self.context
    }

    /// Record the bot's own id once the platform session is ready.
    pub fn on_ready(&mut self, user_id: UserId) {
        info!("logged in (user_id={})", user_id);
        self.context.self_user_id = Some(user_id);
    }

    /// Process one message, reacting to repeats. Never fails.
    pub async fn on_message(&self, message: &InboundMessage) -> Disposition {
        let outcome = match process(message, &self.context, self.store.as_ref()).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    "dropping message after processing error (message_id={}, channel_id={}, error={})",
                    message.message_id, message.channel_id, err
                );
                return Disposition::Dropped(err);
            }
        };
        let verdict = match outcome {
            Outcome::Skipped(reason) => {
                debug!(
                    "message skipped (message_id={}, reason={})",
                    message.message_id, reason
                );
                return Disposition::Skipped(reason);
            }
            Outcome::Processed(verdict) => verdict,
        };
        if !verdict.is_violation {
            debug!(
                "message recorded (message_id={}, record_id={})",
                message.message_id, verdict.record.id
            );
            return Disposition::Recorded {
                verdict,
                reacted: false,
            };
        }

        info!(
            "repeated message detected (message_id={}, channel_id={}, author_id={}, hash={})",
            message.message_id, message.channel_id, message.author_id, verdict.record.hash
        );
        let action = ReactionAction {
            channel_id: message.channel_id,
            message_id: message.message_id,
            emoji: self.context.policy.reaction_emoji().to_string(),
        };
        match self.reactor.add_reaction(action).await {
            Ok(()) => Disposition::Recorded {
                verdict,
                reacted: true,
            },
            Err(err) => {
                warn!(
                    "failed to add reaction (message_id={}, error={})",
                    message.message_id, err
                );
                Disposition::Recorded {
                    verdict,
                    reacted: false,
                }
            }
        }
    }
}
