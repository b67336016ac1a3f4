//! Weather payload codec
//!
//! The one synchronized value: pre-formatted high/low text and a symbolic
//! icon name, published at [`TOPIC`].

use core::fmt::Write;

use heapless::String;

use crate::fields::{FieldError, FieldMap, MAX_VALUE_LEN};

/// Path of the single synchronized data item
pub const TOPIC: &str = "/sunshinewatchface";

/// Field holding the pre-formatted "H° / L°" text
pub const KEY_HI_LOW: &str = "hiLow";

/// Field holding the symbolic icon name
pub const KEY_WEATHER_IMAGE: &str = "weatherImage";

/// Temperature text shown before anything has been received
pub const DEFAULT_TEMP_TEXT: &str = "-- / --";

/// Icon shown before anything has been received
pub const DEFAULT_ICON: &str = "ic_logo";

/// Maximum length of either summary field in bytes
pub const MAX_TEXT_LEN: usize = MAX_VALUE_LEN;

/// Errors converting between a summary and its field map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// `hiLow` field absent
    MissingHiLow,
    /// `weatherImage` field absent
    MissingWeatherImage,
    /// Icon name is empty
    EmptyIcon,
    /// A field does not fit in `MAX_TEXT_LEN`
    TextTooLong,
    /// Field map could not hold the payload
    Fields(FieldError),
}

impl From<FieldError> for PayloadError {
    fn from(e: FieldError) -> Self {
        PayloadError::Fields(e)
    }
}

/// High/low text and condition icon computed on the handheld
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherSummary {
    hi_low: String<MAX_TEXT_LEN>,
    icon: String<MAX_TEXT_LEN>,
}

impl WeatherSummary {
    /// Create a summary from already formatted text
    pub fn new(hi_low: &str, icon: &str) -> Result<Self, PayloadError> {
        if icon.is_empty() {
            return Err(PayloadError::EmptyIcon);
        }
        let mut summary = Self {
            hi_low: String::new(),
            icon: String::new(),
        };
        summary
            .hi_low
            .push_str(hi_low)
            .map_err(|_| PayloadError::TextTooLong)?;
        summary
            .icon
            .push_str(icon)
            .map_err(|_| PayloadError::TextTooLong)?;
        Ok(summary)
    }

    /// Format whole-degree readings as `"{high}° / {low}°"`
    pub fn from_readings(high: i16, low: i16, icon: &str) -> Result<Self, PayloadError> {
        let mut text = String::<MAX_TEXT_LEN>::new();
        write!(text, "{}\u{b0} / {}\u{b0}", high, low).map_err(|_| PayloadError::TextTooLong)?;
        Self::new(&text, icon)
    }

    /// The "nothing received yet" summary
    pub fn placeholder() -> Self {
        let mut summary = Self {
            hi_low: String::new(),
            icon: String::new(),
        };
        // Both defaults are well under MAX_TEXT_LEN
        let _ = summary.hi_low.push_str(DEFAULT_TEMP_TEXT);
        let _ = summary.icon.push_str(DEFAULT_ICON);
        summary
    }

    /// Returns true if this is the placeholder summary
    pub fn is_placeholder(&self) -> bool {
        self.hi_low.as_str() == DEFAULT_TEMP_TEXT && self.icon.as_str() == DEFAULT_ICON
    }

    /// Pre-formatted high/low text
    pub fn hi_low_text(&self) -> &str {
        &self.hi_low
    }

    /// Symbolic icon name
    pub fn icon_token(&self) -> &str {
        &self.icon
    }

    /// Encode into a field map for publishing
    pub fn encode(&self) -> Result<FieldMap, PayloadError> {
        let mut fields = FieldMap::new();
        fields.put_string(KEY_HI_LOW, &self.hi_low)?;
        fields.put_string(KEY_WEATHER_IMAGE, &self.icon)?;
        Ok(fields)
    }

    /// Decode from a received field map
    ///
    /// Both fields must be present; unknown extra fields are ignored.
    pub fn decode(fields: &FieldMap) -> Result<Self, PayloadError> {
        let hi_low = fields
            .get_string(KEY_HI_LOW)
            .ok_or(PayloadError::MissingHiLow)?;
        let icon = fields
            .get_string(KEY_WEATHER_IMAGE)
            .ok_or(PayloadError::MissingWeatherImage)?;
        Self::new(hi_low, icon)
    }
}

impl Default for WeatherSummary {
    fn default() -> Self {
        Self::placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_placeholder() {
        let summary = WeatherSummary::default();
        assert_eq!(summary.hi_low_text(), "-- / --");
        assert_eq!(summary.icon_token(), "ic_logo");
        assert!(summary.is_placeholder());
    }

    #[test]
    fn test_from_readings_format() {
        let summary = WeatherSummary::from_readings(25, -3, "ic_light_rain").unwrap();
        assert_eq!(summary.hi_low_text(), "25° / -3°");
        assert_eq!(summary.hi_low_text().chars().count(), 9);
        assert_eq!(summary.icon_token(), "ic_light_rain");
    }

    #[test]
    fn test_encode_uses_wire_keys() {
        let fields = WeatherSummary::new("20° / 10°", "ic_clear")
            .unwrap()
            .encode()
            .unwrap();
        assert_eq!(fields.get_string("hiLow"), Some("20° / 10°"));
        assert_eq!(fields.get_string("weatherImage"), Some("ic_clear"));
    }

    #[test]
    fn test_decode_missing_fields() {
        let mut fields = FieldMap::new();
        fields.put_string(KEY_HI_LOW, "20° / 10°").unwrap();
        assert_eq!(
            WeatherSummary::decode(&fields),
            Err(PayloadError::MissingWeatherImage)
        );

        let mut fields = FieldMap::new();
        fields.put_string(KEY_WEATHER_IMAGE, "ic_clear").unwrap();
        assert_eq!(
            WeatherSummary::decode(&fields),
            Err(PayloadError::MissingHiLow)
        );
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let mut fields = WeatherSummary::new("1° / 0°", "ic_snow")
            .unwrap()
            .encode()
            .unwrap();
        fields.put_string("extra", "x").unwrap();
        let summary = WeatherSummary::decode(&fields).unwrap();
        assert_eq!(summary.icon_token(), "ic_snow");
    }

    #[test]
    fn test_empty_icon_is_malformed() {
        assert_eq!(
            WeatherSummary::new("1° / 0°", ""),
            Err(PayloadError::EmptyIcon)
        );
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(hi_low in "[ -~°]{0,14}", icon in "[a-z_]{1,32}") {
            let summary = WeatherSummary::new(&hi_low, &icon).unwrap();
            let decoded = WeatherSummary::decode(&summary.encode().unwrap()).unwrap();
            prop_assert_eq!(decoded, summary);
        }
    }
}
