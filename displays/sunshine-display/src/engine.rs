//! Watch-face render engine
//!
//! The engine is driven entirely by host callbacks. Each callback updates
//! the engine's state and returns the requests the host loop must carry out;
//! `draw` paints one frame from the current state.

use heapless::Vec;
use sunshine_core::cache::SyncCache;
use sunshine_core::config::{FaceConfig, TextSizes};
use sunshine_core::face::{
    layout::is_wide_time, DisplayShape, FaceLayout, LocalTime, TimerAction, TimerState,
    UpdateTimer,
};
use sunshine_core::traits::KeyValueStore;

use crate::backend::{Bounds, Canvas, CanvasError, Color, TextStyle};
use crate::icons::IconSet;
use crate::input::TapEvent;
use crate::state::RenderState;

/// Something the host loop must do on the engine's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostRequest {
    /// Cancel the pending update tick, if any
    CancelTick,
    /// Schedule an update tick after `delay_ms`
    ScheduleTick { delay_ms: u64 },
    /// Redraw the face
    Invalidate,
    /// Show the tap acknowledgement message briefly
    ShowTapMessage,
}

/// Requests returned from one callback, in order
pub type HostRequests = Vec<HostRequest, 4>;

/// Display properties reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayMetrics {
    pub is_round: bool,
    pub width: u16,
    pub height: u16,
}

/// The watch face
pub struct RenderEngine<I> {
    config: FaceConfig,
    icons: I,
    timer: UpdateTimer,
    state: RenderState,
    visible: bool,
    time_zone_registered: bool,
    utc_offset_minutes: i32,
    /// Offset reported while hidden, applied when visible again
    pending_utc_offset: Option<i32>,
    text_sizes: TextSizes,
    metrics: DisplayMetrics,
}

fn push(requests: &mut HostRequests, request: HostRequest) {
    // No callback produces more than the capacity
    let _ = requests.push(request);
}

fn push_timer(requests: &mut HostRequests, action: TimerAction) {
    match action {
        TimerAction::Cancel => push(requests, HostRequest::CancelTick),
        TimerAction::Schedule { delay_ms } => {
            push(requests, HostRequest::CancelTick);
            push(requests, HostRequest::ScheduleTick { delay_ms });
        }
    }
}

impl<I: IconSet> RenderEngine<I> {
    /// Create the engine, showing whatever the cache last held
    ///
    /// The dirty flag is left alone; the first draw consumes it.
    pub fn new<S: KeyValueStore>(config: FaceConfig, icons: I, cache: &SyncCache<S>) -> Self {
        let state = RenderState::new(&cache.summary(), &icons);
        Self {
            timer: UpdateTimer::new(config.update_rate_ms),
            text_sizes: config.text_sizes(state.shape),
            utc_offset_minutes: config.utc_offset_minutes,
            config,
            icons,
            state,
            visible: false,
            time_zone_registered: false,
            pending_utc_offset: None,
            metrics: DisplayMetrics::default(),
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_time_zone_registered(&self) -> bool {
        self.time_zone_registered
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    pub fn metrics(&self) -> DisplayMetrics {
        self.metrics
    }

    /// Message to show for a completed tap
    pub fn tap_message(&self) -> &str {
        &self.config.tap_message
    }

    /// The surface became visible or hidden
    pub fn on_visibility_changed(&mut self, visible: bool) -> HostRequests {
        let mut requests = HostRequests::new();
        self.visible = visible;

        if visible {
            self.register_time_zone_receiver();
            // Whatever is on screen may be a minute old in ambient mode
            push(&mut requests, HostRequest::Invalidate);
        } else {
            self.time_zone_registered = false;
        }

        push_timer(&mut requests, self.timer.update(visible, self.state.ambient));
        requests
    }

    /// Start following time-zone changes, picking up one missed while hidden
    fn register_time_zone_receiver(&mut self) {
        if self.time_zone_registered {
            return;
        }
        self.time_zone_registered = true;
        if let Some(offset) = self.pending_utc_offset.take() {
            self.utc_offset_minutes = offset;
        }
    }

    /// Ambient mode entered or left
    pub fn on_ambient_mode_changed(&mut self, ambient: bool) -> HostRequests {
        let mut requests = HostRequests::new();
        if self.state.ambient != ambient {
            self.state.ambient = ambient;
            push(&mut requests, HostRequest::Invalidate);
        }
        push_timer(&mut requests, self.timer.update(self.visible, ambient));
        requests
    }

    /// Display properties reported
    pub fn on_properties_changed(&mut self, low_bit_ambient: bool) {
        self.state.low_bit_ambient = low_bit_ambient;
    }

    /// Display shape and size known; picks text sizes for the shape
    pub fn on_apply_display_metrics(&mut self, metrics: DisplayMetrics) {
        self.metrics = metrics;
        self.state.shape = DisplayShape::from_is_round(metrics.is_round);
        self.text_sizes = self.config.text_sizes(self.state.shape);
    }

    /// The host's once-a-minute wake
    ///
    /// The only redraw source in ambient mode.
    pub fn on_time_tick<S: KeyValueStore>(&mut self, cache: &SyncCache<S>) -> HostRequests {
        let mut requests = HostRequests::new();
        self.apply_pending(cache);
        push(&mut requests, HostRequest::Invalidate);
        requests
    }

    /// A scheduled update tick fired at wall-clock time `now_ms`
    pub fn on_update_tick(&mut self, now_ms: u64) -> HostRequests {
        let mut requests = HostRequests::new();
        push(&mut requests, HostRequest::Invalidate);
        if let Some(TimerAction::Schedule { delay_ms }) = self.timer.on_tick(now_ms) {
            push(&mut requests, HostRequest::ScheduleTick { delay_ms });
        }
        requests
    }

    /// A tap gesture
    pub fn on_tap(&mut self, event: TapEvent) -> HostRequests {
        let mut requests = HostRequests::new();
        if event.is_completed() {
            push(&mut requests, HostRequest::ShowTapMessage);
        }
        push(&mut requests, HostRequest::Invalidate);
        requests
    }

    /// The device time zone changed
    ///
    /// Only acted on while the receiver is registered (face visible); an
    /// offset reported while hidden is applied on the next show.
    pub fn on_time_zone_changed(&mut self, utc_offset_minutes: i32) -> HostRequests {
        let mut requests = HostRequests::new();
        if self.time_zone_registered {
            self.utc_offset_minutes = utc_offset_minutes;
            push(&mut requests, HostRequest::Invalidate);
        } else {
            self.pending_utc_offset = Some(utc_offset_minutes);
        }
        requests
    }

    /// The surface is going away
    pub fn on_destroy(&mut self) -> HostRequests {
        let mut requests = HostRequests::new();
        self.visible = false;
        self.time_zone_registered = false;
        push_timer(&mut requests, self.timer.stop());
        requests
    }

    /// Copy a newly received summary into the render state
    ///
    /// Returns true if one was applied. A store failure leaves the current
    /// state on screen.
    pub fn apply_pending<S: KeyValueStore>(&mut self, cache: &SyncCache<S>) -> bool {
        match cache.take_pending() {
            Ok(Some(summary)) => {
                self.state.apply_summary(&summary, &self.icons);
                true
            }
            Ok(None) | Err(_) => false,
        }
    }

    /// Paint one frame at wall-clock time `now_ms`
    ///
    /// Every element is attempted even if an earlier one fails; the first
    /// canvas error is returned.
    pub fn draw<C: Canvas, S: KeyValueStore>(
        &mut self,
        canvas: &mut C,
        bounds: Bounds,
        now_ms: i64,
        cache: &SyncCache<S>,
    ) -> Result<(), CanvasError> {
        self.apply_pending(cache);

        let format = self.config.time_format;
        let local = LocalTime::from_epoch_ms(now_ms, self.utc_offset_minutes);
        self.state.set_clock(&local, format);

        let width = f32::from(bounds.width);
        let height = f32::from(bounds.height);
        let layout = FaceLayout::compute(
            width,
            height,
            self.state.shape,
            is_wide_time(local.hour, format.is_24_hour()),
            self.state.temp_char_len(),
            f32::from(self.state.icon.width),
            self.config.line_offsets(),
        );

        let anti_alias = self.state.text_anti_alias();
        let style = |color: u32, size: f32| TextStyle {
            color: Color(color),
            size,
            anti_alias,
        };

        let results = [
            if self.state.ambient {
                canvas.clear(Color::BLACK)
            } else {
                canvas.fill_rect(0.0, 0.0, width, height, Color(self.config.background))
            },
            canvas.draw_text(
                &self.state.time_text,
                layout.time,
                &style(self.config.time_color, self.text_sizes.time),
            ),
            canvas.draw_text(
                &self.state.date_text,
                layout.date,
                &style(self.config.date_color, self.text_sizes.date),
            ),
            canvas.draw_text(
                &self.state.temp_text,
                layout.temp,
                &style(self.config.temp_color, self.text_sizes.temp),
            ),
            canvas.draw_icon(&self.state.icon, layout.icon, anti_alias),
        ];

        results.into_iter().collect::<Result<(), CanvasError>>()
    }
}
