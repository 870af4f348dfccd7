//! CP56Time2a time tag.
//!
//! Seven bytes: milliseconds, minutes, hours, day of month and week, month
//! and a two-digit year. The tag carries no zone of its own; the link's
//! [`Params::info_obj_time_zone`](crate::Params) says how to read it.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Timelike};

use crate::error::{AsduError, Result};

/// Encoded size of a CP56Time2a tag.
pub const CP56TIME2A_SIZE: usize = 7;

/// CP56Time2a timestamp (7 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cp56Time2a {
    /// Milliseconds (0-59999)
    pub milliseconds: u16,
    /// Minutes (0-59)
    pub minutes: u8,
    /// Hours (0-23)
    pub hours: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Day of week (1-7, 1=Monday, 0=unused)
    pub day_of_week: u8,
    /// Month (1-12)
    pub month: u8,
    /// Year (0-99, years since 2000)
    pub year: u8,
    /// Invalid flag
    pub invalid: bool,
    /// Summer time flag
    pub summer_time: bool,
}

impl Cp56Time2a {
    /// Parse from 7 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < CP56TIME2A_SIZE {
            return Err(AsduError::end_of_buffer(CP56TIME2A_SIZE, bytes.len()));
        }

        Ok(Self {
            milliseconds: u16::from_le_bytes([bytes[0], bytes[1]]),
            minutes: bytes[2] & 0x3F,
            invalid: (bytes[2] & 0x80) != 0,
            hours: bytes[3] & 0x1F,
            summer_time: (bytes[3] & 0x80) != 0,
            day: bytes[4] & 0x1F,
            day_of_week: (bytes[4] >> 5) & 0x07,
            month: bytes[5] & 0x0F,
            year: bytes[6] & 0x7F,
        })
    }

    /// Encode to 7 bytes.
    pub fn to_bytes(&self) -> [u8; CP56TIME2A_SIZE] {
        let [ms_lo, ms_hi] = self.milliseconds.to_le_bytes();
        [
            ms_lo,
            ms_hi,
            (self.minutes & 0x3F) | if self.invalid { 0x80 } else { 0 },
            (self.hours & 0x1F) | if self.summer_time { 0x80 } else { 0 },
            (self.day & 0x1F) | ((self.day_of_week & 0x07) << 5),
            self.month & 0x0F,
            self.year & 0x7F,
        ]
    }

    /// Build a tag from a point in time, expressed in `tz`.
    pub fn from_datetime<Tz: TimeZone>(time: &DateTime<Tz>, tz: &FixedOffset) -> Self {
        let local = time.with_timezone(tz);
        // leap seconds report nanoseconds past 1e9
        let millis = (local.nanosecond() / 1_000_000).min(999);
        Self {
            milliseconds: (local.second() * 1000 + millis) as u16,
            minutes: local.minute() as u8,
            hours: local.hour() as u8,
            day: local.day() as u8,
            day_of_week: local.weekday().number_from_monday() as u8,
            month: local.month() as u8,
            year: local.year().rem_euclid(100) as u8,
            invalid: false,
            summer_time: false,
        }
    }

    /// Interpret the tag as a local time in `tz`.
    ///
    /// Returns `None` when the fields do not form a valid date and time.
    pub fn to_datetime(&self, tz: &FixedOffset) -> Option<DateTime<FixedOffset>> {
        let date = NaiveDate::from_ymd_opt(
            2000 + i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )?;
        let naive = date.and_hms_milli_opt(
            u32::from(self.hours),
            u32::from(self.minutes),
            u32::from(self.milliseconds / 1000),
            u32::from(self.milliseconds % 1000),
        )?;
        tz.from_local_datetime(&naive).single()
    }
}
