//! Frame encoding and decoding for the paired link.
//!
//! Frame format:
//! - SYNC (1 byte): 0x5E synchronization byte
//! - KIND (1 byte): message kind identifier
//! - LENGTH (2 bytes, big-endian): body length (0-512)
//! - BODY (0-512 bytes): kind-specific data
//! - CHECKSUM (1 byte): two's complement of the byte sum of KIND, LENGTH and BODY,
//!   so that all covered bytes plus the checksum sum to zero

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_SYNC: u8 = 0x5E;

/// Maximum body size in bytes
pub const MAX_BODY_SIZE: usize = 512;

/// Bytes surrounding the body (SYNC + KIND + LENGTH + CHECKSUM)
pub const FRAME_OVERHEAD: usize = 1 + 1 + 2 + 1;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = FRAME_OVERHEAD + MAX_BODY_SIZE;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Body exceeds maximum allowed size
    BodyTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Declared length is out of range
    InvalidLength,
    /// Unknown message kind or malformed body
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message kind identifier
    pub kind: u8,
    /// Body data
    pub body: Vec<u8, MAX_BODY_SIZE>,
}

impl Frame {
    /// Create a new frame with the given kind and body
    pub fn new(kind: u8, body: &[u8]) -> Result<Self, FrameError> {
        let mut buf = Vec::new();
        buf.extend_from_slice(body)
            .map_err(|_| FrameError::BodyTooLarge)?;
        Ok(Self { kind, body: buf })
    }

    /// Create a frame with no body
    pub fn empty(kind: u8) -> Self {
        Self {
            kind,
            body: Vec::new(),
        }
    }

    fn checksum(kind: u8, len: u16, body: &[u8]) -> u8 {
        let [hi, lo] = len.to_be_bytes();
        let sum = body
            .iter()
            .fold(kind.wrapping_add(hi).wrapping_add(lo), |acc, &b| {
                acc.wrapping_add(b)
            });
        sum.wrapping_neg()
    }

    /// Total encoded length of this frame
    pub fn encoded_len(&self) -> usize {
        FRAME_OVERHEAD + self.body.len()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let len = self.body.len() as u16;
        let [hi, lo] = len.to_be_bytes();
        let end = 4 + self.body.len();

        buffer[0] = FRAME_SYNC;
        buffer[1] = self.kind;
        buffer[2] = hi;
        buffer[3] = lo;
        buffer[4..end].copy_from_slice(&self.body);
        buffer[end] = Self::checksum(self.kind, len, &self.body);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut out = Vec::new();
        out.resize_default(self.encoded_len())
            .map_err(|_| FrameError::BufferTooSmall)?;
        self.encode(&mut out)?;
        Ok(out)
    }
}

/// Byte-at-a-time frame parser
///
/// Garbage before a SYNC byte is skipped, so the parser resynchronises on
/// the next frame after any error.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    body: Vec<u8, MAX_BODY_SIZE>,
    kind: u8,
    expected_len: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Sync,
    Kind,
    LengthHigh,
    LengthLow,
    Body,
    Checksum,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::Sync,
            body: Vec::new(),
            kind: 0,
            expected_len: 0,
        }
    }

    /// Drop any partially received frame
    pub fn reset(&mut self) {
        self.state = ParseState::Sync;
        self.body.clear();
        self.kind = 0;
        self.expected_len = 0;
    }

    /// Returns true while a frame is partially received
    pub fn in_frame(&self) -> bool {
        self.state != ParseState::Sync
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Sync => {
                if byte == FRAME_SYNC {
                    self.state = ParseState::Kind;
                }
                Ok(None)
            }
            ParseState::Kind => {
                self.kind = byte;
                self.state = ParseState::LengthHigh;
                Ok(None)
            }
            ParseState::LengthHigh => {
                self.expected_len = u16::from(byte) << 8;
                self.state = ParseState::LengthLow;
                Ok(None)
            }
            ParseState::LengthLow => {
                self.expected_len |= u16::from(byte);
                if self.expected_len as usize > MAX_BODY_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidLength);
                }
                self.body.clear();
                self.state = if self.expected_len == 0 {
                    ParseState::Checksum
                } else {
                    ParseState::Body
                };
                Ok(None)
            }
            ParseState::Body => {
                // Cannot overflow: expected_len <= MAX_BODY_SIZE
                let _ = self.body.push(byte);
                if self.body.len() == self.expected_len as usize {
                    self.state = ParseState::Checksum;
                }
                Ok(None)
            }
            ParseState::Checksum => {
                let expected = Frame::checksum(self.kind, self.expected_len, &self.body);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }

                let frame = Frame {
                    kind: self.kind,
                    body: core::mem::take(&mut self.body),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed bytes until the first complete frame
    ///
    /// Returns the frame and the number of bytes consumed; bytes after the
    /// frame are left for the next call.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<(Option<Frame>, usize), FrameError> {
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(frame) = self.feed(byte)? {
                return Ok((Some(frame), i + 1));
            }
        }
        Ok((None, bytes.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_empty_body() {
        let frame = Frame::empty(0x30);
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 5);
        assert_eq!(buffer[0], FRAME_SYNC);
        assert_eq!(buffer[1], 0x30);
        assert_eq!(&buffer[2..4], &[0, 0]);
        assert_eq!(buffer[4], 0xD0); // -(0x30)
    }

    #[test]
    fn test_checksum_sums_to_zero() {
        let frame = Frame::new(0x10, b"/sunshinewatchface").unwrap();
        let encoded = frame.encode_to_vec().unwrap();
        let sum = encoded[1..]
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_add(b));
        assert_eq!(sum, 0);
    }

    #[test]
    fn test_body_length_is_big_endian() {
        let body = [7u8; 300];
        let frame = Frame::new(0x10, &body).unwrap();
        let encoded = frame.encode_to_vec().unwrap();
        assert_eq!(encoded[2], 0x01);
        assert_eq!(encoded[3], 0x2C);
        assert_eq!(encoded.len(), 305);
    }

    #[test]
    fn test_parser_rejects_corrupt_checksum() {
        let frame = Frame::new(0x10, &[1, 2, 3]).unwrap();
        let mut encoded = frame.encode_to_vec().unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0x55;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&encoded), Err(FrameError::InvalidChecksum));
        assert!(!parser.in_frame());
    }

    #[test]
    fn test_parser_rejects_oversized_length() {
        let mut parser = FrameParser::new();
        let bytes = [FRAME_SYNC, 0x10, 0xFF, 0xFF];
        assert_eq!(parser.feed_bytes(&bytes), Err(FrameError::InvalidLength));
    }

    #[test]
    fn test_parser_resyncs_after_garbage() {
        let frame = Frame::empty(0x31);
        let encoded = frame.encode_to_vec().unwrap();

        let mut data = Vec::<u8, 32>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x12]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = FrameParser::new();
        let (parsed, used) = parser.feed_bytes(&data).unwrap();
        assert_eq!(parsed.unwrap().kind, 0x31);
        assert_eq!(used, data.len());
    }

    #[test]
    fn test_feed_bytes_stops_after_first_frame() {
        let a = Frame::new(0x10, &[1]).unwrap().encode_to_vec().unwrap();
        let b = Frame::new(0x11, &[2]).unwrap().encode_to_vec().unwrap();
        let mut data = Vec::<u8, 32>::new();
        data.extend_from_slice(&a).unwrap();
        data.extend_from_slice(&b).unwrap();

        let mut parser = FrameParser::new();
        let (first, used) = parser.feed_bytes(&data).unwrap();
        assert_eq!(first.unwrap().kind, 0x10);
        let (second, _) = parser.feed_bytes(&data[used..]).unwrap();
        assert_eq!(second.unwrap().kind, 0x11);
    }

    #[test]
    fn test_body_too_large() {
        let body = [0u8; MAX_BODY_SIZE + 1];
        assert_eq!(Frame::new(0x10, &body), Err(FrameError::BodyTooLarge));
    }

    proptest! {
        #[test]
        fn prop_parser_recovers_any_frame(kind: u8, body in proptest::collection::vec(any::<u8>(), 0..MAX_BODY_SIZE)) {
            let frame = Frame::new(kind, &body).unwrap();
            let encoded = frame.encode_to_vec().unwrap();
            let mut parser = FrameParser::new();
            let (parsed, used) = parser.feed_bytes(&encoded).unwrap();
            prop_assert_eq!(parsed, Some(frame));
            prop_assert_eq!(used, encoded.len());
        }
    }
}
