//! Watch-face timing, layout and clock formatting
//!
//! Pure functions and small state machines; the renderer in
//! `sunshine-display` wires them to a canvas and the host callbacks.

pub mod clock;
pub mod layout;
pub mod timer;

pub use clock::{LocalTime, TimeFormat};
pub use layout::{DisplayShape, FaceLayout, LineOffsets, Point};
pub use timer::{next_tick_delay_ms, TimerAction, TimerState, UpdateTimer, INTERACTIVE_UPDATE_RATE_MS};
