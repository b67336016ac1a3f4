//! What the face currently shows
//!
//! Holds the mode flags and the text of each line between frames. The clock
//! lines are refreshed on every draw; the weather line and icon change only
//! when a new summary is applied.

use heapless::String;
use sunshine_core::face::{DisplayShape, LocalTime, TimeFormat};
use sunshine_protocol::payload::MAX_TEXT_LEN;
use sunshine_protocol::WeatherSummary;

use crate::icons::{Icon, IconSet};

/// Current face contents and mode
#[derive(Debug, Clone)]
pub struct RenderState {
    pub ambient: bool,
    /// Display loses colour depth in ambient mode
    pub low_bit_ambient: bool,
    pub shape: DisplayShape,
    pub time_text: String<8>,
    pub date_text: String<24>,
    pub temp_text: String<MAX_TEXT_LEN>,
    pub icon: Icon,
}

impl RenderState {
    /// Interactive, rectangular state showing `summary`
    pub fn new<I: IconSet>(summary: &WeatherSummary, icons: &I) -> Self {
        let mut state = Self {
            ambient: false,
            low_bit_ambient: false,
            shape: DisplayShape::Rectangular,
            time_text: String::new(),
            date_text: String::new(),
            temp_text: String::new(),
            icon: icons.default_icon(),
        };
        state.apply_summary(summary, icons);
        state
    }

    /// Show a new weather summary
    pub fn apply_summary<I: IconSet>(&mut self, summary: &WeatherSummary, icons: &I) {
        self.temp_text.clear();
        // Both buffers are MAX_TEXT_LEN
        let _ = self.temp_text.push_str(summary.hi_low_text());
        self.icon = icons.resolve_or_default(summary.icon_token());
    }

    /// Refresh the clock lines
    pub fn set_clock(&mut self, local: &LocalTime, format: TimeFormat) {
        self.time_text = local.time_text(format);
        self.date_text = local.date_text();
    }

    /// Anti-aliasing is off only in ambient mode on low-bit displays
    pub fn text_anti_alias(&self) -> bool {
        !(self.ambient && self.low_bit_ambient)
    }

    /// Temperature text length in characters, for the layout table
    pub fn temp_char_len(&self) -> usize {
        self.temp_text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::WeatherIcons;

    #[test]
    fn test_starts_with_summary() {
        let state = RenderState::new(&WeatherSummary::placeholder(), &WeatherIcons);
        assert_eq!(state.temp_text.as_str(), "-- / --");
        assert_eq!(state.icon.name, "ic_logo");
        assert!(!state.ambient);
    }

    #[test]
    fn test_unknown_icon_shows_default() {
        let mut state = RenderState::new(&WeatherSummary::placeholder(), &WeatherIcons);
        let summary = WeatherSummary::new("9° / 2°", "ic_volcano").unwrap();
        state.apply_summary(&summary, &WeatherIcons);
        assert_eq!(state.temp_text.as_str(), "9° / 2°");
        assert_eq!(state.icon.name, "ic_logo");
    }

    #[test]
    fn test_anti_alias_rule() {
        let mut state = RenderState::new(&WeatherSummary::placeholder(), &WeatherIcons);
        for (ambient, low_bit, expected) in [
            (false, false, true),
            (false, true, true),
            (true, false, true),
            (true, true, false),
        ] {
            state.ambient = ambient;
            state.low_bit_ambient = low_bit;
            assert_eq!(state.text_anti_alias(), expected);
        }
    }

    #[test]
    fn test_temp_length_counts_characters() {
        let mut state = RenderState::new(&WeatherSummary::placeholder(), &WeatherIcons);
        let summary = WeatherSummary::from_readings(25, 12, "ic_clear").unwrap();
        state.apply_summary(&summary, &WeatherIcons);
        // "25° / 12°" is 9 characters but 11 bytes
        assert_eq!(state.temp_char_len(), 9);
        assert_eq!(state.temp_text.len(), 11);
    }
}
