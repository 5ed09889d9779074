//! Configuration for the detector, loadable from `chatdrift.toml`.

pub mod detector_config;

pub use detector_config::DetectorConfig;
