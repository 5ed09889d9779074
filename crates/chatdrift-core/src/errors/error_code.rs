//! Stable error codes surfaced to the boundary layer.

/// Every chatdrift error maps to a stable, machine-readable code.
pub trait ChatDriftErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const INPUT_NOT_FOUND: &str = "INPUT_NOT_FOUND";
pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const IO_ERROR: &str = "IO_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
