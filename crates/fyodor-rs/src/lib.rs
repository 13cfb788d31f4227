//! Fyodor: flags repeated messages in monitored chat channels.
//!
//! This crate re-exports the building blocks and hosts the line-oriented
//! bridge used by the `fyodor` binary to exchange events with a platform
//! gateway process.

pub mod bridge;

/// Config models and loading.
pub use fyodor_rs_config as config;
/// Normalization, fingerprinting and message handling.
pub use fyodor_rs_core as core;
/// Platform event and reaction types.
pub use fyodor_rs_protocol as protocol;
/// Record store trait and file backend.
pub use fyodor_rs_store as store;

/// Initialize logging with millisecond timestamps, honoring `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();
}
