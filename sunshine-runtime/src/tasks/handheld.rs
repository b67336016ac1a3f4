//! Handheld producer task
//!
//! Owns the producer and the handheld end of the link. Pings the wearable
//! on a fixed interval; pongs drive the producer's connection state, and
//! weather refreshes are published or held according to it.

use embassy_futures::select::{select3, Either3};
use embassy_time::{Duration, Ticker};
use tracing::{debug, info, warn};

use sunshine_core::sync::{
    LinkEvent, LinkMonitor, LinkState, Producer, PublishAction, HEARTBEAT_INTERVAL_MS,
};
use sunshine_core::traits::SyncTransport;
use sunshine_protocol::{FieldMap, TOPIC};

use crate::channels::WEATHER_REFRESHED;
use crate::link::HandheldLink;

/// Handheld task - publishes weather summaries over the link
#[embassy_executor::task]
pub async fn handheld_task(mut link: HandheldLink<'static>) {
    info!("Handheld task started");

    let mut producer = Producer::new();
    let mut monitor = LinkMonitor::new();
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(HEARTBEAT_INTERVAL_MS)));

    producer.begin_connect();
    link.send_ping().await;

    loop {
        match select3(WEATHER_REFRESHED.receive(), ticker.next(), link.next_pong()).await {
            Either3::First(summary) => match producer.on_weather_refreshed(&summary) {
                PublishAction::Publish(fields) => {
                    publish(&mut link, &mut producer, &fields).await;
                }
                PublishAction::Queued { depth } => {
                    info!("Link not connected, holding refresh ({} pending)", depth);
                }
                PublishAction::QueuedDroppingOldest { depth } => {
                    warn!(
                        "Link not connected, dropped oldest held refresh ({} pending)",
                        depth
                    );
                }
                PublishAction::Invalid(e) => warn!("Refresh not publishable: {:?}", e),
            },
            Either3::Second(()) => {
                if let Some(LinkEvent::Down) = monitor.update_time(HEARTBEAT_INTERVAL_MS) {
                    warn!(
                        "Link down after {} missed heartbeats",
                        monitor.missed_heartbeats()
                    );
                    producer.disconnected();
                    producer.begin_connect();
                }
                link.send_ping().await;
            }
            Either3::Third(()) => {
                if let Some(LinkEvent::Up) = monitor.heartbeat_received() {
                    info!("Heartbeat restored");
                }
                // A failed publish can mark the producer down while pongs keep coming
                if producer.link_state() != LinkState::Connected {
                    let held = producer.connected();
                    info!("Link connected, releasing {} held refreshes", held.len());
                    for fields in &held {
                        publish(&mut link, &mut producer, fields).await;
                    }
                }
            }
        }
    }
}

/// Publish once and record the outcome; never retried
async fn publish<T: SyncTransport>(link: &mut T, producer: &mut Producer, fields: &FieldMap) {
    let result = link.publish(TOPIC, fields).await;
    match &result {
        Ok(()) => debug!("Publish accepted"),
        Err(e) => warn!("Publish failed: {:?}", e),
    }
    producer.on_publish_result(result);
    if producer.link_state() == LinkState::Disconnected {
        producer.begin_connect();
    }

    let stats = producer.stats();
    debug!(
        "Producer stats: published={} failed={} dropped={}",
        stats.published, stats.failed, stats.dropped
    );
}
