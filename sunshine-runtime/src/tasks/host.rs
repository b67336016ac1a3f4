//! Scripted wearable host
//!
//! Stands in for the platform around the face: reports the display, then
//! plays the configured visibility, ambient, tap, time-zone and radio steps.
//! Ends the simulation once the script is done.

use embassy_time::{Instant, Timer};
use tracing::info;

use sunshine_display::TapEvent;

use crate::channels::{HostEvent, HOST_EVENTS, RADIO};
use crate::config::{DisplayConfig, HostAction, HostStep};

/// Host task - plays the host scenario
#[embassy_executor::task]
pub async fn host_task(display: DisplayConfig, script: Vec<HostStep>, linger_ms: u64) {
    info!("Host task started with {} steps", script.len());

    HOST_EVENTS
        .send(HostEvent::Properties {
            low_bit_ambient: display.low_bit_ambient,
        })
        .await;
    HOST_EVENTS.send(HostEvent::Metrics(display.metrics())).await;

    for step in script {
        Timer::after_millis(step.after_ms).await;
        match host_event(step.action, Instant::now().as_millis()) {
            Some(event) => {
                info!("Host: {:?}", step.action);
                HOST_EVENTS.send(event).await;
            }
            None => {
                if let HostAction::Radio { up } = step.action {
                    info!("Radio {}", if up { "up" } else { "down" });
                    RADIO.set_up(up);
                }
            }
        }
    }

    Timer::after_millis(linger_ms).await;
    info!("Scenario finished");
    std::process::exit(0);
}

/// The face callback for a scripted action, if it is one
pub fn host_event(action: HostAction, now_ms: u64) -> Option<HostEvent> {
    match action {
        HostAction::Visible { visible } => Some(HostEvent::Visibility(visible)),
        HostAction::Ambient { ambient } => Some(HostEvent::Ambient(ambient)),
        HostAction::Tap { kind, x, y } => Some(HostEvent::Tap(TapEvent {
            kind: kind.into(),
            x,
            y,
            time_ms: now_ms,
        })),
        HostAction::TimeZone { utc_offset_minutes } => {
            Some(HostEvent::TimeZone(utc_offset_minutes))
        }
        HostAction::Destroy => Some(HostEvent::Destroy),
        HostAction::Radio { .. } => None,
    }
}
