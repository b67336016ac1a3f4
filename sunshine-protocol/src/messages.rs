//! Messages exchanged over the paired link
//!
//! Data items flow handheld → wearable. Heartbeats flow both ways and let
//! each side track whether the link is up.

use heapless::{String, Vec};

use crate::fields::{bounded, put_str, take_str, FieldError, FieldMap, MAX_PATH_LEN};
use crate::frame::{Frame, FrameError, MAX_BODY_SIZE};

// Message kind IDs
pub const MSG_DATA_CHANGED: u8 = 0x10;
pub const MSG_DATA_DELETED: u8 = 0x11;
pub const MSG_PING: u8 = 0x30;
pub const MSG_PONG: u8 = 0x31;

/// A message on the paired link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkMessage {
    /// The data item at `path` now holds `fields`
    DataChanged {
        path: String<MAX_PATH_LEN>,
        fields: FieldMap,
    },
    /// The data item at `path` was removed
    DataDeleted { path: String<MAX_PATH_LEN> },
    /// Heartbeat request
    Ping,
    /// Heartbeat response
    Pong,
}

impl LinkMessage {
    /// Build a `DataChanged` message
    pub fn data_changed(path: &str, fields: FieldMap) -> Result<Self, FieldError> {
        Ok(LinkMessage::DataChanged {
            path: bounded(path, FieldError::PathTooLong)?,
            fields,
        })
    }

    /// Build a `DataDeleted` message
    pub fn data_deleted(path: &str) -> Result<Self, FieldError> {
        Ok(LinkMessage::DataDeleted {
            path: bounded(path, FieldError::PathTooLong)?,
        })
    }

    /// Path of the data item this message refers to, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            LinkMessage::DataChanged { path, .. } | LinkMessage::DataDeleted { path } => {
                Some(path.as_str())
            }
            LinkMessage::Ping | LinkMessage::Pong => None,
        }
    }

    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            LinkMessage::DataChanged { path, fields } => {
                // Body: [path_len][path][field map]
                let mut body = Vec::<u8, MAX_BODY_SIZE>::new();
                put_str(&mut body, path).map_err(|_| FrameError::BodyTooLarge)?;
                fields
                    .encode_into(&mut body)
                    .map_err(|_| FrameError::BodyTooLarge)?;
                Frame::new(MSG_DATA_CHANGED, &body)
            }
            LinkMessage::DataDeleted { path } => {
                let mut body = Vec::<u8, MAX_BODY_SIZE>::new();
                put_str(&mut body, path).map_err(|_| FrameError::BodyTooLarge)?;
                Frame::new(MSG_DATA_DELETED, &body)
            }
            LinkMessage::Ping => Ok(Frame::empty(MSG_PING)),
            LinkMessage::Pong => Ok(Frame::empty(MSG_PONG)),
        }
    }

    /// Parse a message from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.kind {
            MSG_DATA_CHANGED => {
                let (path, used) = take_str(&frame.body).map_err(|_| FrameError::InvalidFrame)?;
                let (fields, rest) =
                    FieldMap::decode(&frame.body[used..]).map_err(|_| FrameError::InvalidFrame)?;
                if used + rest != frame.body.len() {
                    return Err(FrameError::InvalidFrame);
                }
                Self::data_changed(path, fields).map_err(|_| FrameError::InvalidFrame)
            }
            MSG_DATA_DELETED => {
                let (path, used) = take_str(&frame.body).map_err(|_| FrameError::InvalidFrame)?;
                if used != frame.body.len() {
                    return Err(FrameError::InvalidFrame);
                }
                Self::data_deleted(path).map_err(|_| FrameError::InvalidFrame)
            }
            MSG_PING => Ok(LinkMessage::Ping),
            MSG_PONG => Ok(LinkMessage::Pong),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather_fields() -> FieldMap {
        let mut fields = FieldMap::new();
        fields.put_string("hiLow", "25° / 12°").unwrap();
        fields.put_string("weatherImage", "ic_clear").unwrap();
        fields
    }

    #[test]
    fn test_data_changed_through_frame() {
        let msg = LinkMessage::data_changed("/sunshinewatchface", weather_fields()).unwrap();
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.kind, MSG_DATA_CHANGED);
        assert_eq!(frame.body[0] as usize, "/sunshinewatchface".len());

        let parsed = LinkMessage::from_frame(&frame).unwrap();
        assert_eq!(parsed, msg);
        assert_eq!(parsed.path(), Some("/sunshinewatchface"));
    }

    #[test]
    fn test_data_deleted_frame() {
        let msg = LinkMessage::data_deleted("/other").unwrap();
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.kind, MSG_DATA_DELETED);
        assert_eq!(LinkMessage::from_frame(&frame).unwrap(), msg);
    }

    #[test]
    fn test_heartbeats_have_no_body() {
        assert!(LinkMessage::Ping.to_frame().unwrap().body.is_empty());
        assert_eq!(
            LinkMessage::from_frame(&Frame::empty(MSG_PONG)).unwrap(),
            LinkMessage::Pong
        );
        assert_eq!(LinkMessage::Ping.path(), None);
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let msg = LinkMessage::data_deleted("/x").unwrap();
        let mut frame = msg.to_frame().unwrap();
        frame.body.push(0).unwrap();
        assert_eq!(LinkMessage::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            LinkMessage::from_frame(&Frame::empty(0x7F)),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_path_too_long() {
        let long = "/a-path-that-is-definitely-longer-than-32";
        assert_eq!(
            LinkMessage::data_deleted(long),
            Err(FieldError::PathTooLong)
        );
    }
}
