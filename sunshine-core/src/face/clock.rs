//! Wall-clock breakdown and face text formatting
//!
//! Time text is `h:mm` on a 12-hour clock and `H:mm` on a 24-hour clock;
//! date text is `EEE, MMM d yyyy` with English names.

use core::fmt::Write;

use heapless::String;

const MS_PER_MINUTE: i64 = 60_000;
const MINUTES_PER_DAY: i64 = 24 * 60;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Hour display preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeFormat {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

impl TimeFormat {
    pub fn from_is_24_hour(is_24_hour: bool) -> Self {
        if is_24_hour {
            TimeFormat::TwentyFourHour
        } else {
            TimeFormat::TwelveHour
        }
    }

    pub fn is_24_hour(&self) -> bool {
        *self == TimeFormat::TwentyFourHour
    }
}

/// Local civil time, to the minute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTime {
    pub year: i32,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0 = Sunday
    pub weekday: u8,
    /// 0-23
    pub hour: u8,
    pub minute: u8,
}

impl LocalTime {
    /// Break down a Unix time in milliseconds at a fixed UTC offset
    pub fn from_epoch_ms(epoch_ms: i64, utc_offset_minutes: i32) -> Self {
        let minutes = epoch_ms.div_euclid(MS_PER_MINUTE) + i64::from(utc_offset_minutes);
        let days = minutes.div_euclid(MINUTES_PER_DAY);
        let minute_of_day = minutes.rem_euclid(MINUTES_PER_DAY);
        let (year, month, day) = civil_from_days(days);

        Self {
            year,
            month,
            day,
            // 1970-01-01 was a Thursday
            weekday: (days + 4).rem_euclid(7) as u8,
            hour: (minute_of_day / 60) as u8,
            minute: (minute_of_day % 60) as u8,
        }
    }

    /// Hour on a 12-hour dial, 1-12
    pub fn hour12(&self) -> u8 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }

    pub fn is_pm(&self) -> bool {
        self.hour >= 12
    }

    /// `h:mm` or `H:mm`
    pub fn time_text(&self, format: TimeFormat) -> String<8> {
        let hour = match format {
            TimeFormat::TwelveHour => self.hour12(),
            TimeFormat::TwentyFourHour => self.hour,
        };
        let mut text = String::new();
        // At most "23:59"
        let _ = write!(text, "{}:{:02}", hour, self.minute);
        text
    }

    /// `EEE, MMM d yyyy`
    pub fn date_text(&self) -> String<24> {
        let mut text = String::new();
        let _ = write!(
            text,
            "{}, {} {} {}",
            WEEKDAYS[self.weekday as usize % 7],
            MONTHS[(self.month as usize + 11) % 12],
            self.day,
            self.year
        );
        text
    }
}

/// Days since 1970-01-01 to (year, month, day), proleptic Gregorian
fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year as i32, month, day)
}
