//! Board-agnostic core logic for the Sunshine watch face
//!
//! This crate contains everything between the link and the pixels that does
//! not depend on a particular device:
//!
//! - Storage and transport traits
//! - The wearable's persisted sync cache
//! - Producer (handheld) and consumer (wearable) state machines
//! - Link health tracking
//! - Update timer state, layout tables and clock formatting for the face
//! - Configuration type definitions
//!
//! Nothing here logs or blocks. Every operation returns a typed outcome and
//! the runtime decides what to log and when to wait.

#![no_std]
#![deny(unsafe_code)]

pub mod cache;
pub mod config;
pub mod face;
pub mod sync;
pub mod traits;
