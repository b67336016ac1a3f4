//! Tap input from the host

/// Tap gesture phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapType {
    /// Finger down
    Touch,
    /// Gesture turned into something else or was abandoned
    TouchCancel,
    /// Tap completed
    Tap,
}

// Host wire values
const TAP_TYPE_TOUCH: u8 = 0;
const TAP_TYPE_TOUCH_CANCEL: u8 = 1;
const TAP_TYPE_TAP: u8 = 2;

impl TapType {
    /// Parse a host tap code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            TAP_TYPE_TOUCH => Some(TapType::Touch),
            TAP_TYPE_TOUCH_CANCEL => Some(TapType::TouchCancel),
            TAP_TYPE_TAP => Some(TapType::Tap),
            _ => None,
        }
    }

    /// Host tap code
    pub fn code(self) -> u8 {
        match self {
            TapType::Touch => TAP_TYPE_TOUCH,
            TapType::TouchCancel => TAP_TYPE_TOUCH_CANCEL,
            TapType::Tap => TAP_TYPE_TAP,
        }
    }
}

/// A tap callback from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapEvent {
    pub kind: TapType,
    pub x: i32,
    pub y: i32,
    /// Host event time
    pub time_ms: u64,
}

impl TapEvent {
    /// Returns true if the gesture completed
    pub fn is_completed(&self) -> bool {
        self.kind == TapType::Tap
    }
}
