//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels, the link
//! pipes, or the shared sync cache.

pub mod face;
pub mod handheld;
pub mod host;
pub mod listener;
pub mod time_tick;
pub mod weather;

pub use face::face_task;
pub use handheld::handheld_task;
pub use host::host_task;
pub use listener::listener_task;
pub use time_tick::time_tick_task;
pub use weather::weather_task;
