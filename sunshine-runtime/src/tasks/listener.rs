//! Wearable data listener
//!
//! Takes change events off the link one at a time and hands them to the
//! consumer. The face picks the result up from the cache on its own loop.

use tracing::{debug, error, info, trace, warn};

use sunshine_core::cache::SyncCache;
use sunshine_core::sync::{ConsumeOutcome, Consumer, IgnoreReason};
use sunshine_core::traits::ChangeSource;

use crate::link::WearableLink;
use crate::store::FileStore;

/// Listener task - consumes change events into the sync cache
#[embassy_executor::task]
pub async fn listener_task(mut source: WearableLink<'static>, cache: &'static SyncCache<FileStore>) {
    info!("Listener task started");

    let mut consumer = Consumer::new();
    loop {
        let event = source.next_event().await;
        debug!("Change event: {:?} {}", event.kind, event.path);
        log_outcome(&consumer.handle(&event, cache));
    }
}

/// Log the result of handling one event
fn log_outcome(outcome: &ConsumeOutcome) {
    match outcome {
        ConsumeOutcome::Applied(summary) => info!(
            "Cached {} {}",
            summary.hi_low_text(),
            summary.icon_token()
        ),
        ConsumeOutcome::Ignored(IgnoreReason::OtherPath) => trace!("Ignoring other path"),
        ConsumeOutcome::Ignored(IgnoreReason::Deleted) => debug!("Data item deleted, keeping cache"),
        ConsumeOutcome::Rejected(e) => warn!("Discarding malformed data item: {:?}", e),
        ConsumeOutcome::StoreFailed(e) => error!("Failed to write sync cache: {:?}", e),
    }
}
