//! In-process paired link
//!
//! Two byte pipes stand in for the radio between the devices. Each end frames
//! `LinkMessage`s onto its outgoing pipe and parses frames off its incoming
//! one, the same way a UART-attached peer would. `Radio` simulates coverage:
//! while it is down nothing new goes on the air.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;
use tracing::{debug, trace, warn};

use sunshine_core::traits::{ChangeSource, PublishError, SyncTransport};
use sunshine_protocol::{ChangeEvent, FieldMap, Frame, FrameParser, LinkMessage};

/// Bytes buffered in each direction
pub const LINK_PIPE_SIZE: usize = 1024;

/// Read chunk size
const RX_BUF_SIZE: usize = 64;

/// One direction of the link
pub type LinkPipe = Pipe<CriticalSectionRawMutex, LINK_PIPE_SIZE>;

/// Simulated radio coverage between the devices
pub struct Radio {
    up: AtomicBool,
}

impl Radio {
    pub const fn new(up: bool) -> Self {
        Self {
            up: AtomicBool::new(up),
        }
    }

    pub fn is_up(&self) -> bool {
        self.up.load(Ordering::Relaxed)
    }

    pub fn set_up(&self, up: bool) {
        self.up.store(up, Ordering::Relaxed);
    }
}

/// Frame reader over an incoming pipe
///
/// Parser state and unread bytes live here, so a read cancelled by `select`
/// loses nothing.
struct FrameReader<'a> {
    pipe: &'a LinkPipe,
    parser: FrameParser,
    buf: [u8; RX_BUF_SIZE],
    start: usize,
    end: usize,
}

impl<'a> FrameReader<'a> {
    fn new(pipe: &'a LinkPipe) -> Self {
        Self {
            pipe,
            parser: FrameParser::new(),
            buf: [0; RX_BUF_SIZE],
            start: 0,
            end: 0,
        }
    }

    async fn next_frame(&mut self) -> Frame {
        loop {
            while self.start < self.end {
                let byte = self.buf[self.start];
                self.start += 1;
                match self.parser.feed(byte) {
                    Ok(Some(frame)) => return frame,
                    Ok(None) => {}
                    Err(e) => warn!("Frame parse error: {:?}", e),
                }
            }

            let n = self.pipe.read(&mut self.buf).await;
            trace!("RX: {} bytes", n);
            self.start = 0;
            self.end = n;
        }
    }

    /// Next frame that decodes as a message
    async fn next_message(&mut self) -> LinkMessage {
        loop {
            let frame = self.next_frame().await;
            match LinkMessage::from_frame(&frame) {
                Ok(msg) => return msg,
                Err(e) => warn!("Failed to parse link message (kind {:#04x}): {:?}", frame.kind, e),
            }
        }
    }
}

/// Frame and write one message
async fn send(pipe: &LinkPipe, msg: &LinkMessage) -> Result<(), PublishError> {
    let frame = msg.to_frame().map_err(|_| PublishError::Encode)?;
    let bytes = frame.encode_to_vec().map_err(|_| PublishError::Encode)?;
    pipe.write_all(&bytes).await;
    Ok(())
}

/// Handheld end: publishes data items, pings, hears pongs
pub struct HandheldLink<'a> {
    tx: &'a LinkPipe,
    rx: FrameReader<'a>,
    radio: &'a Radio,
}

impl<'a> HandheldLink<'a> {
    pub fn new(tx: &'a LinkPipe, rx: &'a LinkPipe, radio: &'a Radio) -> Self {
        Self {
            tx,
            rx: FrameReader::new(rx),
            radio,
        }
    }

    /// Send a heartbeat ping; dropped while the radio is down
    pub async fn send_ping(&mut self) {
        if !self.radio.is_up() {
            trace!("PING dropped, radio down");
            return;
        }
        if let Err(e) = send(self.tx, &LinkMessage::Ping).await {
            warn!("Failed to send PING: {:?}", e);
        }
    }

    /// Wait for the next pong from the wearable
    pub async fn next_pong(&mut self) {
        loop {
            match self.rx.next_message().await {
                LinkMessage::Pong => return,
                other => debug!("Unexpected message on handheld side: {:?}", other),
            }
        }
    }
}

impl SyncTransport for HandheldLink<'_> {
    async fn publish(&mut self, path: &str, fields: &FieldMap) -> Result<(), PublishError> {
        if !self.radio.is_up() {
            return Err(PublishError::NotConnected);
        }
        let msg =
            LinkMessage::data_changed(path, fields.clone()).map_err(|_| PublishError::Encode)?;
        send(self.tx, &msg).await?;
        debug!("Published {} ({} fields)", path, fields.len());
        Ok(())
    }
}

/// Wearable end: delivers change events, answers pings
pub struct WearableLink<'a> {
    tx: &'a LinkPipe,
    rx: FrameReader<'a>,
    radio: &'a Radio,
}

impl<'a> WearableLink<'a> {
    pub fn new(tx: &'a LinkPipe, rx: &'a LinkPipe, radio: &'a Radio) -> Self {
        Self {
            tx,
            rx: FrameReader::new(rx),
            radio,
        }
    }
}

impl ChangeSource for WearableLink<'_> {
    async fn next_event(&mut self) -> ChangeEvent {
        loop {
            let msg = self.rx.next_message().await;
            match msg {
                LinkMessage::Ping => {
                    trace!("PING received");
                    if self.radio.is_up() {
                        if let Err(e) = send(self.tx, &LinkMessage::Pong).await {
                            warn!("Failed to send PONG: {:?}", e);
                        }
                    }
                }
                LinkMessage::Pong => trace!("Stray PONG ignored"),
                msg => {
                    if let Some(event) = ChangeEvent::from_message(msg) {
                        return event;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use sunshine_protocol::{ChangeKind, Frame, WeatherSummary, TOPIC};

    fn weather_fields() -> FieldMap {
        WeatherSummary::new("25° / 12°", "ic_clear")
            .unwrap()
            .encode()
            .unwrap()
    }

    #[test]
    fn test_publish_arrives_as_change_event() {
        let (up, down) = (LinkPipe::new(), LinkPipe::new());
        let radio = Radio::new(true);
        let mut handheld = HandheldLink::new(&up, &down, &radio);
        let mut wearable = WearableLink::new(&down, &up, &radio);

        block_on(handheld.publish(TOPIC, &weather_fields())).unwrap();
        let event = block_on(wearable.next_event());

        assert_eq!(event.kind, ChangeKind::Changed);
        assert_eq!(event.path.as_str(), TOPIC);
        assert_eq!(event.fields, weather_fields());
    }

    #[test]
    fn test_publish_without_radio() {
        let (up, down) = (LinkPipe::new(), LinkPipe::new());
        let radio = Radio::new(false);
        let mut handheld = HandheldLink::new(&up, &down, &radio);

        assert_eq!(
            block_on(handheld.publish(TOPIC, &weather_fields())),
            Err(PublishError::NotConnected)
        );
        assert!(up.is_empty());
    }

    #[test]
    fn test_ping_is_answered() {
        let (up, down) = (LinkPipe::new(), LinkPipe::new());
        let radio = Radio::new(true);
        let mut handheld = HandheldLink::new(&up, &down, &radio);
        let mut wearable = WearableLink::new(&down, &up, &radio);

        block_on(handheld.send_ping());
        block_on(handheld.publish(TOPIC, &weather_fields())).unwrap();

        // The wearable answers the ping on its way to the data item
        let event = block_on(wearable.next_event());
        assert!(event.is_change_at(TOPIC));
        block_on(handheld.next_pong());
    }

    #[test]
    fn test_garbage_is_skipped() {
        let (up, down) = (LinkPipe::new(), LinkPipe::new());
        let radio = Radio::new(true);
        let mut wearable = WearableLink::new(&down, &up, &radio);

        // Noise, a frame of unknown kind, then a real item
        block_on(up.write_all(&[0x00, 0x42, 0xFF]));
        let unknown = Frame::empty(0x7E).encode_to_vec().unwrap();
        block_on(up.write_all(&unknown));
        let msg = LinkMessage::data_deleted(TOPIC).unwrap();
        block_on(send(&up, &msg)).unwrap();

        let event = block_on(wearable.next_event());
        assert_eq!(event.kind, ChangeKind::Deleted);
    }
}
