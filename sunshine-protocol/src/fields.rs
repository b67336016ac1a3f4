//! Flat string field map carried by a data item
//!
//! Body encoding, repeated for each entry after a leading count byte:
//! ```text
//! [count] ([key_len][key bytes][value_len][value bytes])*
//! ```

use heapless::{String, Vec};

/// Maximum number of fields in one data item
pub const MAX_FIELDS: usize = 4;

/// Maximum key length in bytes
pub const MAX_KEY_LEN: usize = 16;

/// Maximum value length in bytes
pub const MAX_VALUE_LEN: usize = 32;

/// Maximum path length in bytes
pub const MAX_PATH_LEN: usize = 32;

/// Errors building or decoding a field map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldError {
    /// More entries than `MAX_FIELDS`
    TooManyFields,
    /// Key longer than `MAX_KEY_LEN`
    KeyTooLong,
    /// Value longer than `MAX_VALUE_LEN`
    ValueTooLong,
    /// Path longer than `MAX_PATH_LEN`
    PathTooLong,
    /// Body ended in the middle of an entry
    Truncated,
    /// Key, value or path is not valid UTF-8
    InvalidUtf8,
    /// Output buffer is full
    BufferFull,
}

/// Copy `text` into a bounded string, failing instead of truncating
pub(crate) fn bounded<const N: usize>(text: &str, err: FieldError) -> Result<String<N>, FieldError> {
    let mut s = String::new();
    s.push_str(text).map_err(|_| err)?;
    Ok(s)
}

/// Insertion-ordered map of string keys to string values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String<MAX_KEY_LEN>, String<MAX_VALUE_LEN>), MAX_FIELDS>,
}

impl FieldMap {
    /// Create an empty field map
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Set a string field, replacing any previous value for the key
    pub fn put_string(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        let value = bounded::<MAX_VALUE_LEN>(value, FieldError::ValueTooLong)?;
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k.as_str() == key) {
            entry.1 = value;
            return Ok(());
        }
        let key = bounded::<MAX_KEY_LEN>(key, FieldError::KeyTooLong)?;
        self.entries
            .push((key, value))
            .map_err(|_| FieldError::TooManyFields)
    }

    /// Get a string field
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the key is present
    pub fn contains(&self, key: &str) -> bool {
        self.get_string(key).is_some()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Append the encoded map to `out`
    pub fn encode_into<const N: usize>(&self, out: &mut Vec<u8, N>) -> Result<(), FieldError> {
        out.push(self.entries.len() as u8)
            .map_err(|_| FieldError::BufferFull)?;
        for (key, value) in &self.entries {
            put_str(out, key)?;
            put_str(out, value)?;
        }
        Ok(())
    }

    /// Decode a map from the front of `bytes`
    ///
    /// Returns the map and the number of bytes consumed.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize), FieldError> {
        let (&count, _) = bytes.split_first().ok_or(FieldError::Truncated)?;
        if count as usize > MAX_FIELDS {
            return Err(FieldError::TooManyFields);
        }

        let mut map = Self::new();
        let mut pos = 1;
        for _ in 0..count {
            let (key, used) = take_str(&bytes[pos..])?;
            pos += used;
            let (value, used) = take_str(&bytes[pos..])?;
            pos += used;
            map.put_string(key, value)?;
        }
        Ok((map, pos))
    }
}

/// Write a length-prefixed string
pub(crate) fn put_str<const N: usize>(out: &mut Vec<u8, N>, text: &str) -> Result<(), FieldError> {
    let bytes = text.as_bytes();
    if bytes.len() > u8::MAX as usize {
        return Err(FieldError::ValueTooLong);
    }
    out.push(bytes.len() as u8)
        .map_err(|_| FieldError::BufferFull)?;
    out.extend_from_slice(bytes)
        .map_err(|_| FieldError::BufferFull)
}

/// Read a length-prefixed string, returning it and the bytes consumed
pub(crate) fn take_str(bytes: &[u8]) -> Result<(&str, usize), FieldError> {
    let (&len, rest) = bytes.split_first().ok_or(FieldError::Truncated)?;
    let raw = rest.get(..len as usize).ok_or(FieldError::Truncated)?;
    let text = core::str::from_utf8(raw).map_err(|_| FieldError::InvalidUtf8)?;
    Ok((text, 1 + len as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_replaces_existing_key() {
        let mut map = FieldMap::new();
        map.put_string("hiLow", "25° / 12°").unwrap();
        map.put_string("hiLow", "26° / 13°").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get_string("hiLow"), Some("26° / 13°"));
    }

    #[test]
    fn test_capacity_limits() {
        let mut map = FieldMap::new();
        for key in ["a", "b", "c", "d"] {
            map.put_string(key, "x").unwrap();
        }
        assert_eq!(map.put_string("e", "x"), Err(FieldError::TooManyFields));
        assert_eq!(
            map.put_string("a", "0123456789012345678901234567890123"),
            Err(FieldError::ValueTooLong)
        );
        assert_eq!(
            FieldMap::new().put_string("a-very-long-field-key", "x"),
            Err(FieldError::KeyTooLong)
        );
    }

    #[test]
    fn test_encoding_layout() {
        let mut map = FieldMap::new();
        map.put_string("k", "vv").unwrap();
        let mut out = Vec::<u8, 16>::new();
        map.encode_into(&mut out).unwrap();
        assert_eq!(&out[..], &[1, 1, b'k', 2, b'v', b'v']);
    }

    #[test]
    fn test_decode_reports_consumed_bytes() {
        let bytes = [1, 1, b'k', 1, b'v', 0xEE, 0xEE];
        let (map, used) = FieldMap::decode(&bytes).unwrap();
        assert_eq!(used, 5);
        assert_eq!(map.get_string("k"), Some("v"));
    }

    #[test]
    fn test_decode_truncated() {
        assert_eq!(FieldMap::decode(&[]), Err(FieldError::Truncated));
        assert_eq!(FieldMap::decode(&[1, 3, b'a']), Err(FieldError::Truncated));
        assert_eq!(FieldMap::decode(&[1, 1, b'a']), Err(FieldError::Truncated));
    }

    #[test]
    fn test_decode_rejects_bad_utf8() {
        let bytes = [1, 1, 0xFF, 1, b'v'];
        assert_eq!(FieldMap::decode(&bytes), Err(FieldError::InvalidUtf8));
    }
}
