//! S3 destination store client.
//!
//! This crate provides:
//! - The `ObjectStore` seam used by the migrator
//! - An `aws-sdk-s3` backed implementation with static credentials
//! - Optional custom endpoints for S3-compatible stores

pub mod client;
pub mod error;
pub mod traits;

pub use client::{S3Client, S3Config};
pub use error::{StorageError, StorageResult};
pub use traits::ObjectStore;
