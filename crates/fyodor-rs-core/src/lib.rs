//! Duplicate-message detection core for Fyodor.
//!
//! Messages pass through a filter, are normalized and fingerprinted, and are
//! checked against the record store before a new record is written. The
//! [`MessageHandler`] wraps this pipeline for the platform integration and
//! keeps failures confined to the message that caused them.

pub mod detector;
pub mod error;
pub mod filter;
pub mod fingerprint;
pub mod handler;
pub mod normalize;

/// Repeat detection against the record store.
pub use detector::{Verdict, detect_duplicate};
/// Error type returned by the pipeline.
pub use error::CoreError;
/// Pre-normalization message screening.
pub use filter::{ModerationPolicy, SkipReason};
/// Content fingerprinting.
pub use fingerprint::{FINGERPRINT_HEX_LEN, fingerprint};
/// Message pipeline and event handler.
pub use handler::{Disposition, HandlerContext, MessageHandler, Outcome, process};
/// Message text normalization.
pub use normalize::Normalizer;
