//! Cross-device sync state machines
//!
//! - `Producer`: handheld side, turns weather refreshes into publishes
//! - `Consumer`: wearable side, turns change events into cache writes
//! - `LinkMonitor`: heartbeat-based link health for the producer's service

pub mod consumer;
pub mod link;
pub mod producer;

pub use consumer::{ConsumeOutcome, Consumer, ConsumerStats, IgnoreReason};
pub use link::{LinkEvent, LinkMonitor, HEARTBEAT_INTERVAL_MS};
pub use producer::{LinkState, Producer, ProducerStats, PublishAction, PENDING_DEPTH};
