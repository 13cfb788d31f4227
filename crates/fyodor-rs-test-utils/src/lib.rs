//! Test helpers shared across Fyodor crates.

pub mod message;
pub mod reactor;
pub mod store;

pub use message::MessageBuilder;
pub use reactor::{FailingReactor, RecordingReactor};
pub use store::{FailingRecordStore, InMemoryRecordStore};
