//! Sunshine data-item protocol
//!
//! This crate defines what travels between the handheld (producer) and the
//! wearable (consumer) over the paired link:
//!
//! - a flat string field map carried by each data item
//! - the data-item messages and the change events they turn into
//! - the weather payload codec for the single synchronized topic
//!
//! # Frame Overview
//!
//! Every message is wrapped in a checksummed frame:
//! ```text
//! ┌──────┬──────┬──────────┬─────────────┬──────────┐
//! │ SYNC │ KIND │ LENGTH   │ BODY        │ CHECKSUM │
//! │ 1B   │ 1B   │ 2B (BE)  │ 0–512B      │ 1B       │
//! └──────┴──────┴──────────┴─────────────┴──────────┘
//! ```
//!
//! The link is last-writer-wins per path: a newer item at a path replaces an
//! older one that has not been delivered yet.

#![no_std]
#![deny(unsafe_code)]

pub mod events;
pub mod fields;
pub mod frame;
pub mod messages;
pub mod payload;

pub use events::{ChangeEvent, ChangeKind};
pub use fields::{FieldError, FieldMap, MAX_FIELDS, MAX_KEY_LEN, MAX_PATH_LEN, MAX_VALUE_LEN};
pub use frame::{Frame, FrameError, FrameParser, FRAME_SYNC, MAX_BODY_SIZE};
pub use messages::LinkMessage;
pub use payload::{PayloadError, WeatherSummary, DEFAULT_ICON, DEFAULT_TEMP_TEXT, TOPIC};
