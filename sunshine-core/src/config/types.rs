//! Face configuration type definitions

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::face::clock::TimeFormat;
use crate::face::layout::{DisplayShape, LineOffsets};
use crate::face::timer::INTERACTIVE_UPDATE_RATE_MS;

/// Maximum length of the tap acknowledgement message
pub const MAX_MESSAGE_LEN: usize = 32;

/// Largest UTC offset in use anywhere (+14:00)
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Update rate must be at least 1 ms
    InvalidUpdateRate,
    /// Text sizes must be positive
    InvalidTextSize,
    /// UTC offset outside ±14:00
    InvalidUtcOffset,
}

/// Text sizes in pixels for one display shape
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextSizes {
    pub time: f32,
    pub date: f32,
    pub temp: f32,
}

impl TextSizes {
    fn is_valid(&self) -> bool {
        self.time > 0.0 && self.date > 0.0 && self.temp > 0.0
    }
}

/// Face appearance and timing
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FaceConfig {
    /// Interactive background, 0xRRGGBB
    pub background: u32,
    pub time_color: u32,
    pub date_color: u32,
    pub temp_color: u32,
    pub text_sizes_round: TextSizes,
    pub text_sizes_rect: TextSizes,
    /// Date baseline below the time baseline, pixels
    pub date_y_offset: f32,
    /// Temperature baseline below the time baseline, pixels
    pub temp_y_offset: f32,
    /// Redraw interval while interactive
    pub update_rate_ms: u64,
    pub time_format: TimeFormat,
    pub utc_offset_minutes: i32,
    /// Shown briefly after a completed tap
    pub tap_message: String<MAX_MESSAGE_LEN>,
}

impl Default for FaceConfig {
    fn default() -> Self {
        let mut tap_message = String::new();
        let _ = tap_message.push_str("Sunshine");
        Self {
            background: 0x03A9F4,
            time_color: 0xFFFFFF,
            date_color: 0xB3E5FC,
            temp_color: 0xFFFFFF,
            text_sizes_round: TextSizes {
                time: 45.0,
                date: 16.0,
                temp: 22.0,
            },
            text_sizes_rect: TextSizes {
                time: 40.0,
                date: 14.0,
                temp: 20.0,
            },
            date_y_offset: 30.0,
            temp_y_offset: 62.0,
            update_rate_ms: INTERACTIVE_UPDATE_RATE_MS,
            time_format: TimeFormat::TwelveHour,
            utc_offset_minutes: 0,
            tap_message,
        }
    }
}

impl FaceConfig {
    /// Text sizes for a display shape
    pub fn text_sizes(&self, shape: DisplayShape) -> TextSizes {
        match shape {
            DisplayShape::Round => self.text_sizes_round,
            DisplayShape::Rectangular => self.text_sizes_rect,
        }
    }

    /// Vertical line offsets
    pub fn line_offsets(&self) -> LineOffsets {
        LineOffsets {
            date: self.date_y_offset,
            temp: self.temp_y_offset,
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_rate_ms == 0 {
            return Err(ConfigError::InvalidUpdateRate);
        }
        if !self.text_sizes_round.is_valid() || !self.text_sizes_rect.is_valid() {
            return Err(ConfigError::InvalidTextSize);
        }
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::InvalidUtcOffset);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = FaceConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.update_rate_ms, 1000);
        assert_eq!(config.tap_message.as_str(), "Sunshine");
    }

    #[test]
    fn test_sizes_follow_shape() {
        let config = FaceConfig::default();
        assert_eq!(config.text_sizes(DisplayShape::Round).time, 45.0);
        assert_eq!(config.text_sizes(DisplayShape::Rectangular).time, 40.0);
    }

    #[test]
    fn test_validation() {
        let mut config = FaceConfig::default();
        config.update_rate_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidUpdateRate));

        let mut config = FaceConfig::default();
        config.text_sizes_rect.temp = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTextSize));

        let mut config = FaceConfig::default();
        config.utc_offset_minutes = -15 * 60;
        assert_eq!(config.validate(), Err(ConfigError::InvalidUtcOffset));
    }
}
