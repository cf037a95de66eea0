//! Twilio recordings REST API client.
//!
//! This crate provides:
//! - The `RecordingSource` seam used by the migrator
//! - Day-filtered recording listing with pagination
//! - Authenticated media download
//! - Recording deletion

pub mod client;
pub mod error;
pub mod source;
pub mod types;


pub use client::{TwilioClient, TwilioConfig};
pub use error::{TwilioError, TwilioResult};
pub use source::RecordingSource;
