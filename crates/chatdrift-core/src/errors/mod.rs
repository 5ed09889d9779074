//! Error types for chatdrift.

pub mod detector_error;
pub mod error_code;

pub use detector_error::DetectorError;
