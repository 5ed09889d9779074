//! # chatdrift-core
//!
//! Foundation crate for the chatdrift template detector.
//! Defines the shared value types, errors, config, and tracing setup.
//! `chatdrift-analysis` depends on this.

pub mod config;
pub mod errors;
pub mod logging;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::DetectorConfig;
pub use errors::error_code::ChatDriftErrorCode;
pub use errors::DetectorError;
pub use types::mismatch::{Mismatch, Severity};
