//! Interactive update timer
//!
//! The face redraws every second while it is visible and interactive. In
//! ambient mode, or when hidden, the timer is stopped and the host's own
//! once-a-minute wake is the only redraw source.

/// Redraw interval while interactive
pub const INTERACTIVE_UPDATE_RATE_MS: u64 = 1000;

/// Whether periodic redraw ticks are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    #[default]
    Stopped,
    Running,
}

impl TimerState {
    /// The state the timer should be in
    pub fn for_surface(visible: bool, ambient: bool) -> Self {
        if visible && !ambient {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        *self == TimerState::Running
    }
}

/// Delay until the next interval boundary of wall-clock time
///
/// Aligning to boundaries keeps ticks from drifting with scheduling jitter.
/// Always in `1..=interval_ms`.
pub fn next_tick_delay_ms(now_ms: u64, interval_ms: u64) -> u64 {
    let interval = interval_ms.max(1);
    interval - (now_ms % interval)
}

/// Timer requests for the host scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerAction {
    /// Cancel any pending tick
    Cancel,
    /// Cancel any pending tick, then schedule one after `delay_ms`
    Schedule { delay_ms: u64 },
}

/// Update timer state machine
#[derive(Debug, Clone)]
pub struct UpdateTimer {
    state: TimerState,
    interval_ms: u64,
}

impl Default for UpdateTimer {
    fn default() -> Self {
        Self::new(INTERACTIVE_UPDATE_RATE_MS)
    }
}

impl UpdateTimer {
    /// Create a stopped timer
    pub fn new(interval_ms: u64) -> Self {
        Self {
            state: TimerState::Stopped,
            interval_ms: interval_ms.max(1),
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Re-evaluate after a visibility or ambient change
    ///
    /// The pending tick is always cancelled first; a running timer fires an
    /// immediate tick so the face redraws right away.
    pub fn update(&mut self, visible: bool, ambient: bool) -> TimerAction {
        self.state = TimerState::for_surface(visible, ambient);
        match self.state {
            TimerState::Running => TimerAction::Schedule { delay_ms: 0 },
            TimerState::Stopped => TimerAction::Cancel,
        }
    }

    /// A scheduled tick fired at wall-clock time `now_ms`
    ///
    /// Returns the next tick to schedule, or `None` if the timer stopped
    /// while the tick was in flight.
    pub fn on_tick(&mut self, now_ms: u64) -> Option<TimerAction> {
        match self.state {
            TimerState::Running => Some(TimerAction::Schedule {
                delay_ms: next_tick_delay_ms(now_ms, self.interval_ms),
            }),
            TimerState::Stopped => None,
        }
    }

    /// Stop for good (surface destroyed)
    pub fn stop(&mut self) -> TimerAction {
        self.state = TimerState::Stopped;
        TimerAction::Cancel
    }
}
