//! Face layout
//!
//! Horizontal positions are `width / divisor`. The divisors are hand-tuned
//! per display shape and, for the temperature line, per text length; they
//! are a lookup, not a fit.

/// Display outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayShape {
    Round,
    #[default]
    Rectangular,
}

impl DisplayShape {
    pub fn from_is_round(is_round: bool) -> Self {
        if is_round {
            DisplayShape::Round
        } else {
            DisplayShape::Rectangular
        }
    }

    pub fn is_round(&self) -> bool {
        *self == DisplayShape::Round
    }
}

/// A position on the canvas, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Time divisor when the hour needs two digits
pub const TIME_DIVISOR_WIDE: f32 = 3.3;

/// Time divisor otherwise
pub const TIME_DIVISOR_NARROW: f32 = 2.8;

/// Temperature divisor for lengths outside the table, both shapes
pub const TEMP_DIVISOR_FALLBACK: f32 = 3.53;

/// Baseline of the time line is `height / BASELINE_DIVISOR`
pub const BASELINE_DIVISOR: f32 = 3.0;

/// Top of the icon is `width * ICON_Y_FACTOR`
pub const ICON_Y_FACTOR: f32 = 0.65;

/// Temperature divisors for lengths 7..=11, rectangular
const TEMP_DIVISORS_RECT: [f32; 5] = [2.95, 3.26, 3.53, 3.86, 4.06];

/// Temperature divisors for lengths 7..=11, round
const TEMP_DIVISORS_ROUND: [f32; 5] = [2.5, 2.8, 3.1, 3.4, 3.7];

/// Divisor for the temperature line, by length in characters
pub fn temp_offset_divisor(shape: DisplayShape, char_len: usize) -> f32 {
    let table = match shape {
        DisplayShape::Round => &TEMP_DIVISORS_ROUND,
        DisplayShape::Rectangular => &TEMP_DIVISORS_RECT,
    };
    match char_len {
        7..=11 => table[char_len - 7],
        _ => TEMP_DIVISOR_FALLBACK,
    }
}

/// Divisor for the date line
pub fn date_offset_divisor(shape: DisplayShape) -> f32 {
    match shape {
        DisplayShape::Round => 8.5,
        DisplayShape::Rectangular => 5.0,
    }
}

/// Whether the time text needs the wider layout
///
/// True for any afternoon hour on a 24-hour clock, and for the hours whose
/// 12-hour field is 10, 11 or 0 (shown as 12) on either clock.
pub fn is_wide_time(hour24: u8, use_24_hour: bool) -> bool {
    let hour12 = hour24 % 12;
    (use_24_hour && hour24 >= 12) || matches!(hour12, 10 | 11 | 0)
}

/// Divisor for the time line
pub fn time_offset_divisor(wide: bool) -> f32 {
    if wide {
        TIME_DIVISOR_WIDE
    } else {
        TIME_DIVISOR_NARROW
    }
}

/// Vertical distances below the time baseline
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineOffsets {
    pub date: f32,
    pub temp: f32,
}

/// Where each element of the face is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceLayout {
    pub time: Point,
    pub date: Point,
    pub temp: Point,
    /// Top-left corner of the icon
    pub icon: Point,
}

impl FaceLayout {
    /// Lay out a `width` x `height` surface
    pub fn compute(
        width: f32,
        height: f32,
        shape: DisplayShape,
        wide_time: bool,
        temp_char_len: usize,
        icon_width: f32,
        lines: LineOffsets,
    ) -> Self {
        let baseline = height / BASELINE_DIVISOR;
        Self {
            time: Point::new(width / time_offset_divisor(wide_time), baseline),
            date: Point::new(width / date_offset_divisor(shape), baseline + lines.date),
            temp: Point::new(
                width / temp_offset_divisor(shape, temp_char_len),
                baseline + lines.temp,
            ),
            icon: Point::new((width - icon_width) / 2.0, width * ICON_Y_FACTOR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_bucket_8_is_distinct() {
        let d8 = temp_offset_divisor(DisplayShape::Rectangular, 8);
        assert_eq!(d8, 3.26);
        assert_ne!(d8, temp_offset_divisor(DisplayShape::Rectangular, 7));
        assert_ne!(d8, temp_offset_divisor(DisplayShape::Rectangular, 9));
    }

    #[test]
    fn test_round_differs_from_rect() {
        for len in 7..=11 {
            assert_ne!(
                temp_offset_divisor(DisplayShape::Round, len),
                temp_offset_divisor(DisplayShape::Rectangular, len)
            );
        }
        assert_eq!(temp_offset_divisor(DisplayShape::Round, 8), 2.8);
    }

    #[test]
    fn test_out_of_table_lengths_fall_back() {
        for len in [0, 6, 12, 40] {
            assert_eq!(temp_offset_divisor(DisplayShape::Round, len), 3.53);
            assert_eq!(temp_offset_divisor(DisplayShape::Rectangular, len), 3.53);
        }
    }

    #[test]
    fn test_wide_time() {
        // 12-hour clock: 10, 11 and 12 o'clock, morning and evening
        for hour in [0, 10, 11, 12, 22, 23] {
            assert!(is_wide_time(hour, false), "hour {}", hour);
        }
        for hour in [1, 9, 13, 21] {
            assert!(!is_wide_time(hour, false), "hour {}", hour);
        }
        // 24-hour clock: every afternoon hour
        for hour in 12..24 {
            assert!(is_wide_time(hour, true));
        }
        assert!(!is_wide_time(9, true));
        assert!(is_wide_time(10, true));
    }

    #[test]
    fn test_layout_positions() {
        let lines = LineOffsets { date: 30.0, temp: 60.0 };
        let layout = FaceLayout::compute(
            320.0,
            300.0,
            DisplayShape::Rectangular,
            false,
            9,
            40.0,
            lines,
        );
        assert_eq!(layout.time, Point::new(320.0 / 2.8, 100.0));
        assert_eq!(layout.date, Point::new(64.0, 130.0));
        assert_eq!(layout.temp, Point::new(320.0 / 3.53, 160.0));
        assert_eq!(layout.icon, Point::new(140.0, 320.0 * ICON_Y_FACTOR));
    }

    #[test]
    fn test_wide_time_starts_further_left() {
        let lines = LineOffsets { date: 0.0, temp: 0.0 };
        let narrow = FaceLayout::compute(280.0, 280.0, DisplayShape::Round, false, 9, 0.0, lines);
        let wide = FaceLayout::compute(280.0, 280.0, DisplayShape::Round, true, 9, 0.0, lines);
        assert!(wide.time.x < narrow.time.x);
        assert_eq!(narrow.date.x, 280.0 / 8.5);
    }
}
