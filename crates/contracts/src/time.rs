//! Timestamp - the compact `YYYY-MM-DDTHH:MM:SSZ` text form used in the log.
//!
//! Parsing is purely lexical: every numeric field is an unsigned integer
//! terminated by its delimiter, and no range checks are applied. A "13th
//! month" parses fine; callers decide what is plausible.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Broken-down UTC date and time with second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// Why a timestamp could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTimestampError {
    /// Field had no digits or overflowed
    #[error("field '{field}' is not an unsigned number")]
    NotNumeric { field: &'static str },

    /// Field was not followed by its delimiter
    #[error("expected '{expected}' after field '{field}'")]
    Delimiter {
        field: &'static str,
        expected: char,
    },
}

/// Field name + delimiter that must follow it, in text order.
const LAYOUT: [(&str, char); 6] = [
    ("year", '-'),
    ("month", '-'),
    ("day", 'T'),
    ("hour", ':'),
    ("minute", ':'),
    ("second", 'Z'),
];

impl Timestamp {
    pub const fn new(year: u32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Year, month and day fall into sane ranges
    pub fn is_date_plausible(&self) -> bool {
        (1800..=2500).contains(&self.year)
            && (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
    }

    /// Date is plausible and the time of day is in range
    pub fn is_plausible(&self) -> bool {
        self.is_date_plausible() && self.hour < 24 && self.minute < 60 && self.second < 60
    }

    /// Seconds since the Unix epoch.
    ///
    /// `None` when the fields do not name a real calendar instant
    /// (e.g. February 30th).
    pub fn to_unix_seconds(&self) -> Option<i64> {
        if !self.is_plausible() {
            return None;
        }
        let year = i32::try_from(self.year).ok()?;
        let dt = NaiveDate::from_ymd_opt(year, self.month, self.day)?
            .and_hms_opt(self.hour, self.minute, self.second)?;
        Some(dt.and_utc().timestamp())
    }

    /// `self - earlier` in seconds, if both ends convert
    pub fn seconds_since(&self, earlier: &Timestamp) -> Option<i64> {
        Some(self.to_unix_seconds()? - earlier.to_unix_seconds()?)
    }

    /// Parse the leading timestamp of `text`.
    ///
    /// Anything after the closing `Z` is ignored.
    pub fn parse(text: &str) -> Result<Self, ParseTimestampError> {
        let mut values = [0u32; 6];
        let mut rest = text;

        for (slot, (field, delim)) in values.iter_mut().zip(LAYOUT) {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 {
                return Err(ParseTimestampError::NotNumeric { field });
            }
            *slot = rest[..digits]
                .parse()
                .map_err(|_| ParseTimestampError::NotNumeric { field })?;

            rest = rest[digits..]
                .strip_prefix(delim)
                .ok_or(ParseTimestampError::Delimiter {
                    field,
                    expected: delim,
                })?;
        }

        let [year, month, day, hour, minute, second] = values;
        Ok(Self::new(year, month, day, hour, minute, second))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl FromStr for Timestamp {
    type Err = ParseTimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(de::Error::custom)
    }
}
