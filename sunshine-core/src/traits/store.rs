//! Key-value storage abstraction
//!
//! The wearable keeps its last-known summary in a small preference store.
//! Each key is read and written atomically; nothing spans keys.

use heapless::String;
use sunshine_protocol::payload::MAX_TEXT_LEN;

/// Keys used by the sync cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Last received high/low text
    SyncTemp = 0,
    /// Last received icon name
    SyncIcon = 1,
    /// Set when a value arrived that the face has not applied yet
    SyncWaiting = 2,
}

impl StorageKey {
    /// Number of keys
    pub const COUNT: usize = 3;

    /// All keys, in storage order
    pub const ALL: [StorageKey; Self::COUNT] = [
        StorageKey::SyncTemp,
        StorageKey::SyncIcon,
        StorageKey::SyncWaiting,
    ];

    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::SyncTemp),
            1 => Some(StorageKey::SyncIcon),
            2 => Some(StorageKey::SyncWaiting),
            _ => None,
        }
    }
}

/// A stored value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue {
    Text(String<MAX_TEXT_LEN>),
    Flag(bool),
}

impl StoredValue {
    /// Build a text value, failing if it does not fit
    pub fn text(text: &str) -> Result<Self, StoreError> {
        let mut s = String::new();
        s.push_str(text).map_err(|_| StoreError::ValueTooLarge)?;
        Ok(StoredValue::Text(s))
    }

    /// The text, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoredValue::Text(s) => Some(s.as_str()),
            StoredValue::Flag(_) => None,
        }
    }

    /// The flag, if this is a flag value
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            StoredValue::Flag(b) => Some(*b),
            StoredValue::Text(_) => None,
        }
    }
}

/// Errors from store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Backing medium failed
    Io,
    /// Stored data could not be decoded
    Corrupted,
    /// Value does not fit the store's slot
    ValueTooLarge,
}

/// Persistent key-value store
///
/// Implementations must make a single `get` or `set` atomic with respect to
/// other callers; the sync cache relies on that and nothing more. Methods
/// take `&self` so one store can be shared by the listener and the face loop.
pub trait KeyValueStore {
    /// Read a value, `Ok(None)` if it was never written
    fn get(&self, key: StorageKey) -> Result<Option<StoredValue>, StoreError>;

    /// Write a value, replacing any previous one
    fn set(&self, key: StorageKey, value: StoredValue) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: StorageKey) -> Result<Option<StoredValue>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: StorageKey, value: StoredValue) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_roundtrip() {
        for key in StorageKey::ALL {
            assert_eq!(StorageKey::from_u8(key.as_u8()), Some(key));
        }
        assert_eq!(StorageKey::from_u8(9), None);
    }

    #[test]
    fn test_value_accessors() {
        let text = StoredValue::text("ic_clear").unwrap();
        assert_eq!(text.as_text(), Some("ic_clear"));
        assert_eq!(text.as_flag(), None);
        assert_eq!(StoredValue::Flag(true).as_flag(), Some(true));
    }

    #[test]
    fn test_text_too_large() {
        let long = "0123456789012345678901234567890123456789";
        assert_eq!(StoredValue::text(long), Err(StoreError::ValueTooLarge));
    }
}
