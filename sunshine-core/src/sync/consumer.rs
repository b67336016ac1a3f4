//! Wearable-side consumer
//!
//! One transition per change event: filter by path, decode, write the cache
//! and mark it dirty. Nothing is acknowledged back to the handheld.

use sunshine_protocol::{ChangeEvent, ChangeKind, PayloadError, WeatherSummary, TOPIC};

use crate::cache::SyncCache;
use crate::traits::{KeyValueStore, StoreError};

/// Why an event was skipped without looking at its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IgnoreReason {
    /// Event for some other path
    OtherPath,
    /// The item at our path was deleted
    Deleted,
}

/// Result of handling one change event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// Summary written to the cache and marked dirty
    Applied(WeatherSummary),
    /// Event not meant for us
    Ignored(IgnoreReason),
    /// Fields missing or malformed; cache untouched
    Rejected(PayloadError),
    /// Store write failed
    StoreFailed(StoreError),
}

/// Event counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerStats {
    pub applied: u32,
    pub ignored: u32,
    pub rejected: u32,
    /// Decoded but not written because the store failed
    pub store_failed: u32,
}

/// Wearable-side consumer
#[derive(Debug)]
pub struct Consumer {
    path: &'static str,
    stats: ConsumerStats,
}

impl Default for Consumer {
    fn default() -> Self {
        Self::new()
    }
}

impl Consumer {
    /// Consumer for the weather topic
    pub fn new() -> Self {
        Self::for_path(TOPIC)
    }

    /// Consumer for another path
    pub fn for_path(path: &'static str) -> Self {
        Self {
            path,
            stats: ConsumerStats::default(),
        }
    }

    /// Path this consumer listens on
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Event counters
    pub fn stats(&self) -> ConsumerStats {
        self.stats
    }

    /// Handle one change event
    pub fn handle<S: KeyValueStore>(
        &mut self,
        event: &ChangeEvent,
        cache: &SyncCache<S>,
    ) -> ConsumeOutcome {
        if event.path.as_str() != self.path {
            self.stats.ignored = self.stats.ignored.saturating_add(1);
            return ConsumeOutcome::Ignored(IgnoreReason::OtherPath);
        }
        if event.kind == ChangeKind::Deleted {
            self.stats.ignored = self.stats.ignored.saturating_add(1);
            return ConsumeOutcome::Ignored(IgnoreReason::Deleted);
        }

        let summary = match WeatherSummary::decode(&event.fields) {
            Ok(summary) => summary,
            Err(e) => {
                self.stats.rejected = self.stats.rejected.saturating_add(1);
                return ConsumeOutcome::Rejected(e);
            }
        };

        match cache.store_summary(&summary) {
            Ok(()) => {
                self.stats.applied = self.stats.applied.saturating_add(1);
                ConsumeOutcome::Applied(summary)
            }
            Err(e) => {
                self.stats.store_failed = self.stats.store_failed.saturating_add(1);
                ConsumeOutcome::StoreFailed(e)
            }
        }
    }
}
