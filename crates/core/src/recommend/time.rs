use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TimeParseError;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day as minutes since midnight, `00:00` through `24:00`.
///
/// Slots are compared on plain minutes rather than timezone-aware instants:
/// every endpoint already belongs to the invite's local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    pub const MIDNIGHT: MinuteOfDay = MinuteOfDay(0);
    pub const END_OF_DAY: MinuteOfDay = MinuteOfDay(MINUTES_PER_DAY);

    /// Creates a time from minutes since midnight (at most 1440).
    pub fn new(minutes: u16) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Creates a time on the hour (0 through 24).
    pub fn from_hour(hour: u8) -> Option<Self> {
        Self::new(u16::from(hour) * 60)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Adds minutes, returning `None` past the end of the day.
    pub fn checked_add(self, minutes: u16) -> Option<Self> {
        self.0.checked_add(minutes).and_then(Self::new)
    }

    /// Minutes from `earlier` to `self`, zero if `earlier` is later.
    pub fn minutes_since(self, earlier: MinuteOfDay) -> u16 {
        self.0.saturating_sub(earlier.0)
    }

    /// Renders a 12-hour label such as `09:30 AM`; `24:00` reads as `12:00 AM`.
    pub fn format_clock(self) -> String {
        let hour = (self.0 / 60) % 24;
        let minute = self.0 % 60;
        let meridiem = if hour < 12 { "AM" } else { "PM" };
        let hour12 = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{hour12:02}:{minute:02} {meridiem}")
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Accepts `HH:MM` or `HH:MM:SS` (seconds are ignored).
impl FromStr for MinuteOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimeParseError::InvalidFormat(s.to_string());
        let mut parts = s.trim().split(':');
        let hours: u16 = parts
            .next()
            .filter(|p| !p.is_empty())
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let minutes: u16 = parts
            .next()
            .filter(|p| p.len() == 2)
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        if let Some(seconds) = parts.next() {
            seconds.parse::<u8>().map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        if minutes >= 60 || hours > 24 || (hours == 24 && minutes > 0) {
            return Err(TimeParseError::OutOfRange(s.to_string()));
        }
        Ok(Self(hours * 60 + minutes))
    }
}

impl TryFrom<String> for MinuteOfDay {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MinuteOfDay> for String {
    fn from(value: MinuteOfDay) -> Self {
        value.to_string()
    }
}
