//! Shared value types.

pub mod mismatch;

pub use mismatch::{Mismatch, Severity};
