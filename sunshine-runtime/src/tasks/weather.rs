//! Handheld weather service
//!
//! Replays the configured readings, formatting each the way the handheld
//! does before it publishes.

use embassy_time::Timer;
use tracing::{info, warn};

use sunshine_protocol::WeatherSummary;

use crate::channels::WEATHER_REFRESHED;
use crate::config::WeatherReading;

/// Weather task - produces a summary per reading
#[embassy_executor::task]
pub async fn weather_task(readings: Vec<WeatherReading>) {
    info!("Weather task started with {} readings", readings.len());

    for reading in readings {
        Timer::after_millis(reading.after_ms).await;

        match WeatherSummary::from_readings(reading.high, reading.low, &reading.icon) {
            Ok(summary) => {
                info!(
                    "Weather refreshed: {} {}",
                    summary.hi_low_text(),
                    summary.icon_token()
                );
                WEATHER_REFRESHED.send(summary).await;
            }
            Err(e) => warn!("Skipping unusable reading {:?}: {:?}", reading, e),
        }
    }

    info!("Weather readings exhausted");
}
