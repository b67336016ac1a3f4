//! Configuration types
//!
//! Defines the face appearance and timing settings. The runtime loads them
//! from a TOML file; everything has a default so an empty file is valid.

pub mod types;

pub use types::{ConfigError, FaceConfig, TextSizes, MAX_MESSAGE_LEN};
