//! Call-recording migration worker.
//!
//! This crate provides:
//! - Fixed-delay retry executor
//! - Concurrency limiter for in-flight migrations
//! - Per-recording migrator (fetch, upload, delete)
//! - Date-range driver that processes one day at a time

pub mod config;
pub mod driver;
pub mod error;
pub mod limiter;
pub mod logging;
pub mod migrator;
pub mod retry;

pub use config::{MigrationConfig, RunConfig};
pub use driver::MigrationDriver;
pub use error::{WorkerError, WorkerResult};
pub use limiter::ConcurrencyLimiter;
pub use logging::RecordingLogger;
pub use migrator::RecordingMigrator;
pub use retry::{retry_async, RetryConfig, RetryResult};
