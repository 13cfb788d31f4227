//! JSON-lines bridge between a platform gateway and the message handler.
//!
//! Events arrive one per line as [`PlatformEvent`] JSON; reactions leave one
//! per line as [`ReactionAction`] JSON. Lines that fail to decode are logged
//! and skipped.

use async_trait::async_trait;
use fyodor_rs_core::{Disposition, MessageHandler};
use fyodor_rs_protocol::{PlatformEvent, ReactionAction, ReactionError, Reactor};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Reactor writing each action as a JSON line.
pub struct JsonLineReactor<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLineReactor<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

#[async_trait]
impl<W: Write + Send> Reactor for JsonLineReactor<W> {
    async fn add_reaction(&self, action: ReactionAction) -> Result<(), ReactionError> {
        let line = serde_json::to_string(&action)?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}

/// Counters collected over one bridge run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStats {
    /// Non-blank lines read.
    pub events: usize,
    /// Lines that failed to decode.
    pub malformed: usize,
    /// Messages filtered out before fingerprinting.
    pub skipped: usize,
    /// Messages recorded in the store.
    pub recorded: usize,
    /// Recorded messages flagged as repeats.
    pub violations: usize,
    /// Messages dropped after a processing error.
    pub dropped: usize,
}

/// Feed every event from `reader` through `handler` until end of input.
///
/// Only a failure to read input ends the run early; per-event failures are
/// counted and the loop moves on.
pub async fn run_bridge<R>(
    reader: R,
    handler: &mut MessageHandler,
) -> Result<BridgeStats, std::io::Error>
where
    R: AsyncBufRead + Unpin,
{
    let mut stats = BridgeStats::default();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        stats.events += 1;
        let event: PlatformEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(err) => {
                warn!("skipping malformed event (line={}, error={})", stats.events, err);
                stats.malformed += 1;
                continue;
            }
        };
        match event {
            PlatformEvent::Ready { user_id } => handler.on_ready(user_id),
            PlatformEvent::Message(message) => match handler.on_message(&message).await {
                Disposition::Skipped(_) => stats.skipped += 1,
                Disposition::Recorded { verdict, .. } => {
                    stats.recorded += 1;
                    if verdict.is_violation {
                        stats.violations += 1;
                    }
                }
                Disposition::Dropped(_) => stats.dropped += 1,
            },
        }
        debug!("event handled (line={})", stats.events);
    }
    info!(
        "event stream ended (events={}, recorded={}, violations={}, skipped={}, dropped={}, malformed={})",
        stats.events,
        stats.recorded,
        stats.violations,
        stats.skipped,
        stats.dropped,
        stats.malformed
    );
    Ok(stats)
}
