//! Watch face loop
//!
//! The single cooperative loop the engine lives on. Host callbacks and
//! update ticks are handled one at a time, so draws never overlap. At most
//! one update tick is pending; scheduling a new one replaces it.

use std::time::{SystemTime, UNIX_EPOCH};

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};
use tracing::{debug, info, trace, warn};

use sunshine_core::cache::SyncCache;
use sunshine_core::traits::KeyValueStore;
use sunshine_display::{Bounds, HostRequest, HostRequests, IconSet, RenderEngine, WeatherIcons};

use crate::canvas::LogCanvas;
use crate::channels::{HostEvent, HOST_EVENTS};
use crate::store::FileStore;

/// Wall-clock time in Unix milliseconds
pub fn wall_clock_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Hand one host callback to the engine
pub fn dispatch<I: IconSet, S: KeyValueStore>(
    engine: &mut RenderEngine<I>,
    event: HostEvent,
    cache: &SyncCache<S>,
) -> HostRequests {
    match event {
        HostEvent::Visibility(visible) => engine.on_visibility_changed(visible),
        HostEvent::Ambient(ambient) => engine.on_ambient_mode_changed(ambient),
        HostEvent::Properties { low_bit_ambient } => {
            engine.on_properties_changed(low_bit_ambient);
            HostRequests::new()
        }
        HostEvent::Metrics(metrics) => {
            engine.on_apply_display_metrics(metrics);
            let mut requests = HostRequests::new();
            let _ = requests.push(HostRequest::Invalidate);
            requests
        }
        HostEvent::Tap(tap) => engine.on_tap(tap),
        HostEvent::TimeTick => engine.on_time_tick(cache),
        HostEvent::TimeZone(offset) => engine.on_time_zone_changed(offset),
        HostEvent::Destroy => engine.on_destroy(),
    }
}

/// Pending update tick and redraw bookkeeping for the loop
#[derive(Debug, Default)]
pub struct TickSchedule {
    deadline: Option<Instant>,
}

impl TickSchedule {
    /// When the pending tick fires, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Carry out timer requests; returns true if a redraw was asked for
    pub fn apply(&mut self, requests: &HostRequests, now: Instant) -> bool {
        let mut invalidate = false;
        for request in requests {
            match *request {
                HostRequest::CancelTick => self.deadline = None,
                HostRequest::ScheduleTick { delay_ms } => {
                    self.deadline = Some(now + Duration::from_millis(delay_ms));
                }
                HostRequest::Invalidate => invalidate = true,
                HostRequest::ShowTapMessage => {}
            }
        }
        invalidate
    }

    /// The pending tick fired
    pub fn fired(&mut self) {
        self.deadline = None;
    }
}

/// Face task - drives the render engine
#[embassy_executor::task]
pub async fn face_task(
    mut engine: RenderEngine<WeatherIcons>,
    mut canvas: LogCanvas,
    cache: &'static SyncCache<FileStore>,
) {
    info!("Face task started");

    let mut schedule = TickSchedule::default();
    loop {
        let (requests, destroyed) = match schedule.deadline() {
            Some(at) => match select(HOST_EVENTS.receive(), Timer::at(at)).await {
                Either::First(event) => handle_event(&mut engine, event, cache),
                Either::Second(()) => {
                    schedule.fired();
                    trace!("Update tick");
                    (engine.on_update_tick(wall_clock_ms() as u64), false)
                }
            },
            None => {
                let event = HOST_EVENTS.receive().await;
                handle_event(&mut engine, event, cache)
            }
        };

        if requests.contains(&HostRequest::ShowTapMessage) {
            info!("Toast: {}", engine.tap_message());
        }
        if schedule.apply(&requests, Instant::now()) {
            redraw(&mut engine, &mut canvas, cache);
        }

        if destroyed {
            info!("Face destroyed after {} frames", canvas.frames());
            return;
        }
    }
}

fn handle_event(
    engine: &mut RenderEngine<WeatherIcons>,
    event: HostEvent,
    cache: &SyncCache<FileStore>,
) -> (HostRequests, bool) {
    debug!("Host event: {:?}", event);
    (dispatch(engine, event, cache), event == HostEvent::Destroy)
}

fn redraw(
    engine: &mut RenderEngine<WeatherIcons>,
    canvas: &mut LogCanvas,
    cache: &SyncCache<FileStore>,
) {
    let metrics = engine.metrics();
    let bounds = Bounds::new(metrics.width, metrics.height);
    if let Err(e) = engine.draw(canvas, bounds, wall_clock_ms(), cache) {
        warn!("Draw incomplete: {:?}", e);
    }
    canvas.finish_frame();
}
