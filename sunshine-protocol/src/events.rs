//! Change events delivered to the data listener

use heapless::String;

use crate::fields::{bounded, FieldError, FieldMap, MAX_PATH_LEN};
use crate::messages::LinkMessage;

/// What happened to the data item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChangeKind {
    /// Item created or replaced
    Changed,
    /// Item removed
    Deleted,
}

/// A data-item change seen by the receiving side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub path: String<MAX_PATH_LEN>,
    /// Empty for `Deleted`
    pub fields: FieldMap,
}

impl ChangeEvent {
    /// A `Changed` event for `path`
    pub fn changed(path: &str, fields: FieldMap) -> Result<Self, FieldError> {
        Ok(Self {
            kind: ChangeKind::Changed,
            path: bounded(path, FieldError::PathTooLong)?,
            fields,
        })
    }

    /// A `Deleted` event for `path`
    pub fn deleted(path: &str) -> Result<Self, FieldError> {
        Ok(Self {
            kind: ChangeKind::Deleted,
            path: bounded(path, FieldError::PathTooLong)?,
            fields: FieldMap::new(),
        })
    }

    /// Turn a link message into a change event
    ///
    /// Heartbeats carry no data item and yield `None`.
    pub fn from_message(msg: LinkMessage) -> Option<Self> {
        match msg {
            LinkMessage::DataChanged { path, fields } => Some(Self {
                kind: ChangeKind::Changed,
                path,
                fields,
            }),
            LinkMessage::DataDeleted { path } => Some(Self {
                kind: ChangeKind::Deleted,
                path,
                fields: FieldMap::new(),
            }),
            LinkMessage::Ping | LinkMessage::Pong => None,
        }
    }

    /// Returns true if this is a `Changed` event for exactly `path`
    pub fn is_change_at(&self, path: &str) -> bool {
        self.kind == ChangeKind::Changed && self.path.as_str() == path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_message() {
        let mut fields = FieldMap::new();
        fields.put_string("hiLow", "1° / 0°").unwrap();
        let msg = LinkMessage::data_changed("/sunshinewatchface", fields.clone()).unwrap();

        let event = ChangeEvent::from_message(msg).unwrap();
        assert_eq!(event.kind, ChangeKind::Changed);
        assert_eq!(event.fields, fields);
        assert!(event.is_change_at("/sunshinewatchface"));
        assert!(!event.is_change_at("/sunshine"));
    }

    #[test]
    fn test_deleted_is_not_a_change() {
        let event = ChangeEvent::deleted("/sunshinewatchface").unwrap();
        assert!(!event.is_change_at("/sunshinewatchface"));
        assert!(event.fields.is_empty());
    }

    #[test]
    fn test_heartbeats_are_not_events() {
        assert!(ChangeEvent::from_message(LinkMessage::Ping).is_none());
        assert!(ChangeEvent::from_message(LinkMessage::Pong).is_none());
    }
}
