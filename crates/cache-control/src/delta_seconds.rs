//! The `delta-seconds` grammar element shared by all time-valued directives.

use std::{fmt, str::FromStr, time::Duration};

use serde::Serialize;

use crate::error::DeltaSecondsError;

/// A non-negative number of seconds, as carried by `max-age` and `s-maxage`.
///
/// The value never exceeds `i32::MAX` seconds. Larger inputs saturate to that maximum, which is
/// what RFC 9111 section 1.2.2 asks recipients to do with overflowing values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DeltaSeconds(u32);

impl DeltaSeconds {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(i32::MAX as u32);

    /// Creates a value from a number of seconds, clamping it to [`DeltaSeconds::MAX`].
    pub fn from_secs(seconds: u64) -> Self {
        let max = u64::from(Self::MAX.0);

        if seconds > max {
            log::debug!("Clamping delta-seconds value {seconds} to {max}");
            return Self::MAX;
        }

        Self(seconds as u32)
    }

    pub fn as_secs(&self) -> u32 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }
}

impl From<DeltaSeconds> for Duration {
    fn from(value: DeltaSeconds) -> Self {
        value.as_duration()
    }
}

impl From<DeltaSeconds> for u32 {
    fn from(value: DeltaSeconds) -> Self {
        value.0
    }
}

impl fmt::Display for DeltaSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DeltaSeconds {
    type Err = DeltaSecondsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_delta_seconds(s)
    }
}

/// Parses a `delta-seconds` token: one or more ASCII digits, nothing else.
///
/// Overflow is not an error; the result saturates at [`DeltaSeconds::MAX`].
pub fn parse_delta_seconds(token: &str) -> Result<DeltaSeconds, DeltaSecondsError> {
    if token.is_empty() {
        return Err(DeltaSecondsError::Empty);
    }

    if token.starts_with('-') {
        return Err(DeltaSecondsError::Negative);
    }

    let mut seconds: u64 = 0;

    for c in token.chars() {
        let Some(digit) = c.to_digit(10) else {
            return Err(DeltaSecondsError::InvalidDigit(c));
        };

        seconds = seconds.saturating_mul(10).saturating_add(u64::from(digit));
    }

    Ok(DeltaSeconds::from_secs(seconds))
}
