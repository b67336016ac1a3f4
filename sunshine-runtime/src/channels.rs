//! Inter-task communication channels
//!
//! Defines the statics shared between the simulator's Embassy tasks: the
//! two directions of the paired link, the simulated radio, and the host
//! callback queue feeding the face loop.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use sunshine_display::{DisplayMetrics, TapEvent};
use sunshine_protocol::WeatherSummary;

use crate::link::{LinkPipe, Radio};

/// Channel capacity for host callbacks
const HOST_EVENT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for weather refreshes
const WEATHER_CHANNEL_SIZE: usize = 4;

/// A host callback for the watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Visibility(bool),
    Ambient(bool),
    Properties { low_bit_ambient: bool },
    Metrics(DisplayMetrics),
    Tap(TapEvent),
    /// Once-a-minute wake
    TimeTick,
    /// New UTC offset in minutes
    TimeZone(i32),
    Destroy,
}

/// Host callbacks, serialized onto the face loop
pub static HOST_EVENTS: Channel<CriticalSectionRawMutex, HostEvent, HOST_EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Summaries computed by the handheld weather service
pub static WEATHER_REFRESHED: Channel<CriticalSectionRawMutex, WeatherSummary, WEATHER_CHANNEL_SIZE> =
    Channel::new();

/// Handheld to wearable bytes
pub static HANDHELD_TO_WEARABLE: LinkPipe = LinkPipe::new();

/// Wearable to handheld bytes
pub static WEARABLE_TO_HANDHELD: LinkPipe = LinkPipe::new();

/// Radio coverage between the devices
pub static RADIO: Radio = Radio::new(true);
