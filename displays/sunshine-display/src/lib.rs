//! Canvas abstraction and watch-face renderer for Sunshine
//!
//! This crate provides:
//! - `Canvas` trait for whatever surface the face is painted on
//! - `IconSet` for resolving symbolic icon names to drawable icons
//! - `TapEvent` for the host's tap gestures
//! - `RenderEngine`, the face itself: host callbacks in, host requests out
//!
//! # Architecture
//!
//! The engine never touches a clock, timer or link directly. Each host
//! callback returns a short list of `HostRequest`s (schedule or cancel the
//! update tick, redraw, show a message) that the runtime carries out on its
//! single face loop. Drawing reads the sync cache and never waits on it.

#![no_std]

pub mod backend;
pub mod engine;
pub mod icons;
pub mod input;
pub mod state;

// Re-export key types
pub use backend::{Bounds, Canvas, CanvasError, Color, TextStyle};
pub use engine::{DisplayMetrics, HostRequest, HostRequests, RenderEngine};
pub use icons::{Icon, IconSet, WeatherIcons};
pub use input::{TapEvent, TapType};
pub use state::RenderState;
