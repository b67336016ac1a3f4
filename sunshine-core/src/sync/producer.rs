//! Handheld-side producer
//!
//! Owns the connection state to the data layer. While the link is up every
//! refresh is published immediately; while it is down refreshes are held in
//! a small queue and released, oldest first, when the link comes up.
//! Publish results are counted and reported, never retried.

use heapless::{Deque, Vec};
use sunshine_protocol::{FieldMap, PayloadError, WeatherSummary};

use crate::traits::PublishError;

/// Refreshes held while the link is not connected
pub const PENDING_DEPTH: usize = 4;

/// Connection state to the data layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
}

/// What the caller must do with a refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishAction {
    /// Publish these fields at the topic now
    Publish(FieldMap),
    /// Held until the link is connected
    Queued { depth: usize },
    /// Held, and the oldest held refresh was dropped to make room
    QueuedDroppingOldest { depth: usize },
    /// The summary could not be encoded
    Invalid(PayloadError),
}

/// Publish counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProducerStats {
    /// Publishes accepted by the data layer
    pub published: u32,
    /// Publishes refused or failed
    pub failed: u32,
    /// Held refreshes dropped because the queue was full
    pub dropped: u32,
}

/// Handheld-side producer state
#[derive(Debug)]
pub struct Producer {
    link: LinkState,
    pending: Deque<FieldMap, PENDING_DEPTH>,
    stats: ProducerStats,
}

impl Default for Producer {
    fn default() -> Self {
        Self::new()
    }
}

impl Producer {
    /// Create a producer with no connection
    pub fn new() -> Self {
        Self {
            link: LinkState::Disconnected,
            pending: Deque::new(),
            stats: ProducerStats::default(),
        }
    }

    /// Current connection state
    pub fn link_state(&self) -> LinkState {
        self.link
    }

    /// Number of refreshes waiting for the link
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Publish counters
    pub fn stats(&self) -> ProducerStats {
        self.stats
    }

    /// A connection attempt has started
    ///
    /// Returns false if already connecting or connected.
    pub fn begin_connect(&mut self) -> bool {
        if self.link == LinkState::Disconnected {
            self.link = LinkState::Connecting;
            true
        } else {
            false
        }
    }

    /// The link is up
    ///
    /// Returns the held refreshes, oldest first, for the caller to publish.
    pub fn connected(&mut self) -> Vec<FieldMap, PENDING_DEPTH> {
        self.link = LinkState::Connected;
        let mut held = Vec::new();
        while let Some(fields) = self.pending.pop_front() {
            // Same capacity as the queue
            let _ = held.push(fields);
        }
        held
    }

    /// The link went down
    pub fn disconnected(&mut self) {
        self.link = LinkState::Disconnected;
    }

    /// A new summary was computed on the handheld
    pub fn on_weather_refreshed(&mut self, summary: &WeatherSummary) -> PublishAction {
        let fields = match summary.encode() {
            Ok(fields) => fields,
            Err(e) => return PublishAction::Invalid(e),
        };

        if self.link == LinkState::Connected {
            return PublishAction::Publish(fields);
        }

        let mut dropped = false;
        if self.pending.is_full() {
            self.pending.pop_front();
            self.stats.dropped = self.stats.dropped.saturating_add(1);
            dropped = true;
        }
        // Room was made above
        let _ = self.pending.push_back(fields);

        let depth = self.pending.len();
        if dropped {
            PublishAction::QueuedDroppingOldest { depth }
        } else {
            PublishAction::Queued { depth }
        }
    }

    /// Record the outcome of a publish
    ///
    /// `NotConnected` also marks the link down so later refreshes are held.
    pub fn on_publish_result(&mut self, result: Result<(), PublishError>) {
        match result {
            Ok(()) => self.stats.published = self.stats.published.saturating_add(1),
            Err(e) => {
                self.stats.failed = self.stats.failed.saturating_add(1);
                if e == PublishError::NotConnected {
                    self.link = LinkState::Disconnected;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(high: i16) -> WeatherSummary {
        WeatherSummary::from_readings(high, 10, "ic_clear").unwrap()
    }

    #[test]
    fn test_publishes_immediately_when_connected() {
        let mut producer = Producer::new();
        assert!(producer.begin_connect());
        assert!(producer.connected().is_empty());

        match producer.on_weather_refreshed(&summary(20)) {
            PublishAction::Publish(fields) => {
                assert_eq!(fields.get_string("hiLow"), Some("20° / 10°"));
                assert_eq!(fields.get_string("weatherImage"), Some("ic_clear"));
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_queues_while_connecting_and_drains_in_order() {
        let mut producer = Producer::new();
        producer.begin_connect();
        assert_eq!(producer.link_state(), LinkState::Connecting);

        assert_eq!(
            producer.on_weather_refreshed(&summary(20)),
            PublishAction::Queued { depth: 1 }
        );
        assert_eq!(
            producer.on_weather_refreshed(&summary(21)),
            PublishAction::Queued { depth: 2 }
        );

        let held = producer.connected();
        assert_eq!(held.len(), 2);
        assert_eq!(held[0].get_string("hiLow"), Some("20° / 10°"));
        assert_eq!(held[1].get_string("hiLow"), Some("21° / 10°"));
        assert_eq!(producer.pending(), 0);
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut producer = Producer::new();
        for high in 0..PENDING_DEPTH as i16 {
            producer.on_weather_refreshed(&summary(high));
        }
        assert_eq!(
            producer.on_weather_refreshed(&summary(99)),
            PublishAction::QueuedDroppingOldest {
                depth: PENDING_DEPTH
            }
        );
        assert_eq!(producer.stats().dropped, 1);

        let held = producer.connected();
        assert_eq!(held[0].get_string("hiLow"), Some("1° / 10°"));
        assert_eq!(
            held[PENDING_DEPTH - 1].get_string("hiLow"),
            Some("99° / 10°")
        );
    }

    #[test]
    fn test_begin_connect_only_from_disconnected() {
        let mut producer = Producer::new();
        assert!(producer.begin_connect());
        assert!(!producer.begin_connect());
        producer.connected();
        assert!(!producer.begin_connect());
        producer.disconnected();
        assert!(producer.begin_connect());
    }

    #[test]
    fn test_publish_results_are_counted_not_retried() {
        let mut producer = Producer::new();
        producer.connected();

        producer.on_publish_result(Ok(()));
        producer.on_publish_result(Err(PublishError::Rejected));
        assert_eq!(producer.stats().published, 1);
        assert_eq!(producer.stats().failed, 1);
        assert_eq!(producer.link_state(), LinkState::Connected);
        assert_eq!(producer.pending(), 0);

        producer.on_publish_result(Err(PublishError::NotConnected));
        assert_eq!(producer.link_state(), LinkState::Disconnected);
        assert_eq!(producer.pending(), 0);
    }
}
