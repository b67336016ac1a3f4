//! Host minute wake
//!
//! The only redraw source while the face is in ambient mode.

use embassy_time::{Duration, Ticker};
use tracing::{info, warn};

use crate::channels::{HostEvent, HOST_EVENTS};

/// Time tick task - posts a `TimeTick` every `period_ms`
#[embassy_executor::task]
pub async fn time_tick_task(period_ms: u64) {
    info!("Time tick task started ({} ms)", period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(period_ms));
    loop {
        ticker.next().await;
        if HOST_EVENTS.try_send(HostEvent::TimeTick).is_err() {
            warn!("Host event channel full, dropping time tick");
        }
    }
}
