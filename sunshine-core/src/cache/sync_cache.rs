//! Last-known summary plus dirty flag
//!
//! Writers:
//! - the consumer writes the summary fields, then sets the dirty flag
//! - the face clears the dirty flag, then reads the summary fields
//!
//! With that ordering a value written while the face is reading is never
//! lost: at worst the face reads it one tick early and the flag makes it read
//! it again on the next tick.

use heapless::String;
use sunshine_protocol::payload::MAX_TEXT_LEN;
use sunshine_protocol::{WeatherSummary, DEFAULT_ICON, DEFAULT_TEMP_TEXT};

use crate::traits::{KeyValueStore, StorageKey, StoreError, StoredValue};

/// Persisted sync cache over a key-value store
#[derive(Debug)]
pub struct SyncCache<S> {
    store: S,
}

impl<S: KeyValueStore> SyncCache<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn text_or(&self, key: StorageKey, default: &'static str, buf: &mut String<MAX_TEXT_LEN>) {
        buf.clear();
        let stored = self.store.get(key).ok().flatten();
        let text = stored.as_ref().and_then(StoredValue::as_text).unwrap_or(default);
        if buf.push_str(text).is_err() {
            buf.clear();
            let _ = buf.push_str(default);
        }
    }

    /// The cached summary, with defaults for anything absent or unreadable
    pub fn summary(&self) -> WeatherSummary {
        let mut temp = String::new();
        let mut icon = String::new();
        self.text_or(StorageKey::SyncTemp, DEFAULT_TEMP_TEXT, &mut temp);
        self.text_or(StorageKey::SyncIcon, DEFAULT_ICON, &mut icon);
        WeatherSummary::new(&temp, &icon).unwrap_or_default()
    }

    /// Whether a received value is waiting to be applied
    ///
    /// An unreadable flag counts as clean.
    pub fn is_dirty(&self) -> bool {
        matches!(
            self.store.get(StorageKey::SyncWaiting),
            Ok(Some(StoredValue::Flag(true)))
        )
    }

    /// Record a received summary and mark it dirty
    ///
    /// The dirty flag is set on every call, even if the summary is unchanged.
    /// The two fields are written as a pair: if the icon cannot be written the
    /// previous temperature text is put back, so `summary()` never mixes two
    /// publications.
    pub fn store_summary(&self, summary: &WeatherSummary) -> Result<(), StoreError> {
        let temp = StoredValue::text(summary.hi_low_text())?;
        let icon = StoredValue::text(summary.icon_token())?;
        let previous = self.summary();

        self.store.set(StorageKey::SyncTemp, temp)?;
        if let Err(e) = self.store.set(StorageKey::SyncIcon, icon) {
            // Best effort; the icon error is the one reported
            if let Ok(text) = StoredValue::text(previous.hi_low_text()) {
                let _ = self.store.set(StorageKey::SyncTemp, text);
            }
            return Err(e);
        }
        self.store.set(StorageKey::SyncWaiting, StoredValue::Flag(true))
    }

    /// Take the pending summary, if any, clearing the dirty flag
    ///
    /// Returns `Ok(None)` when nothing new has arrived. If clearing the flag
    /// fails the flag stays set and the next call tries again.
    pub fn take_pending(&self) -> Result<Option<WeatherSummary>, StoreError> {
        if !self.is_dirty() {
            return Ok(None);
        }
        self.store.set(StorageKey::SyncWaiting, StoredValue::Flag(false))?;
        Ok(Some(self.summary()))
    }
}
