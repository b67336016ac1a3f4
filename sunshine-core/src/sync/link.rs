//! Link health from heartbeats
//!
//! The handheld pings the wearable every `HEARTBEAT_INTERVAL_MS`. Each pong
//! resets the miss counter; a quiet period of `HEARTBEAT_TIMEOUT_MS` counts
//! as one miss and `MAX_MISSED_HEARTBEATS` misses take the link down.

/// Interval between pings
pub const HEARTBEAT_INTERVAL_MS: u32 = 1000;

/// Silence that counts as one missed heartbeat
pub const HEARTBEAT_TIMEOUT_MS: u32 = 1500;

/// Missed heartbeats before the link is considered down
pub const MAX_MISSED_HEARTBEATS: u8 = 2;

/// Link state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    Up,
    Down,
}

/// Heartbeat-based link tracker
///
/// Starts down; the first pong brings it up.
#[derive(Debug, Clone)]
pub struct LinkMonitor {
    up: bool,
    missed: u8,
    quiet_ms: u32,
}

impl Default for LinkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkMonitor {
    pub fn new() -> Self {
        Self {
            up: false,
            missed: 0,
            quiet_ms: 0,
        }
    }

    /// Record a pong from the other side
    pub fn heartbeat_received(&mut self) -> Option<LinkEvent> {
        self.missed = 0;
        self.quiet_ms = 0;
        if self.up {
            None
        } else {
            self.up = true;
            Some(LinkEvent::Up)
        }
    }

    /// Advance time by `delta_ms`
    pub fn update_time(&mut self, delta_ms: u32) -> Option<LinkEvent> {
        self.quiet_ms = self.quiet_ms.saturating_add(delta_ms);
        while self.quiet_ms >= HEARTBEAT_TIMEOUT_MS {
            self.quiet_ms -= HEARTBEAT_TIMEOUT_MS;
            self.missed = self.missed.saturating_add(1);
        }

        if self.up && self.missed >= MAX_MISSED_HEARTBEATS {
            self.up = false;
            return Some(LinkEvent::Down);
        }
        None
    }

    /// Whether the link is currently up
    pub fn is_up(&self) -> bool {
        self.up
    }

    /// Heartbeats missed since the last pong
    pub fn missed_heartbeats(&self) -> u8 {
        self.missed
    }
}
