//! User-editable form inputs.
//!
//! Each input is a small value type whose constructors keep it inside the
//! range the matching form control allows. Nothing outside those ranges can
//! be represented, so the predictor never sees an out-of-range value.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Desired wake-up time of day. Only hour and minute are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WakeTime(NaiveTime);

impl WakeTime {
    /// Default wake time, 07:00.
    pub const DEFAULT_HOUR: u32 = 7;

    /// Create a wake time from hour (0-23) and minute (0-59).
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidTime(format!("{hour:02}:{minute:02}")))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Seconds after midnight, the form the model expects.
    pub fn seconds_after_midnight(&self) -> u32 {
        self.hour() * 3600 + self.minute() * 60
    }

    pub fn as_time(&self) -> NaiveTime {
        self.0
    }
}

impl Default for WakeTime {
    fn default() -> Self {
        Self(NaiveTime::from_hms_opt(Self::DEFAULT_HOUR, 0, 0).unwrap_or(NaiveTime::MIN))
    }
}

impl FromStr for WakeTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map(Self)
            .map_err(|_| ValidationError::InvalidTime(trimmed.to_string()))
    }
}

impl TryFrom<String> for WakeTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WakeTime> for String {
    fn from(value: WakeTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for WakeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Desired hours of sleep, 4.0 to 12.0 in quarter-hour steps.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SleepAmount(f64);

impl SleepAmount {
    pub const MIN: f64 = 4.0;
    pub const MAX: f64 = 12.0;
    pub const STEP: f64 = 0.25;
    pub const DEFAULT: f64 = 8.0;

    /// Accept `hours` only if it is already a valid stepper position.
    pub fn try_new(hours: f64) -> Result<Self, ValidationError> {
        if !hours.is_finite() || !(Self::MIN..=Self::MAX).contains(&hours) {
            return Err(ValidationError::OutOfRange {
                field: "sleep_amount",
                min: Self::MIN,
                max: Self::MAX,
                value: hours,
            });
        }
        let steps = hours / Self::STEP;
        if (steps - steps.round()).abs() > 1e-9 {
            return Err(ValidationError::OffStep {
                field: "sleep_amount",
                step: Self::STEP,
                value: hours,
            });
        }
        Ok(Self(steps.round() * Self::STEP))
    }

    /// Clamp into range and snap to the nearest step. NaN becomes the default.
    pub fn clamped(hours: f64) -> Self {
        if hours.is_nan() {
            return Self::default();
        }
        let bounded = hours.clamp(Self::MIN, Self::MAX);
        Self((bounded / Self::STEP).round() * Self::STEP)
    }

    pub fn hours(&self) -> f64 {
        self.0
    }

    /// One stepper tick up, saturating at the maximum.
    pub fn increment(self) -> Self {
        Self::clamped(self.0 + Self::STEP)
    }

    /// One stepper tick down, saturating at the minimum.
    pub fn decrement(self) -> Self {
        Self::clamped(self.0 - Self::STEP)
    }

    /// Every valid value, smallest first.
    pub fn all() -> impl Iterator<Item = Self> {
        let count = ((Self::MAX - Self::MIN) / Self::STEP) as u32;
        (0..=count).map(|i| Self(Self::MIN + f64::from(i) * Self::STEP))
    }
}

impl Default for SleepAmount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<f64> for SleepAmount {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<SleepAmount> for f64 {
    fn from(value: SleepAmount) -> Self {
        value.0
    }
}

/// Stepper label, e.g. `8 hours` or `8.25 hours`.
impl fmt::Display for SleepAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hours", self.0)
    }
}

/// Cups of coffee per day, 1 to 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CoffeeAmount(u32);

impl CoffeeAmount {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 20;
    pub const DEFAULT: u32 = 1;

    pub fn try_new(cups: u32) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&cups) {
            Ok(Self(cups))
        } else {
            Err(ValidationError::OutOfRange {
                field: "coffee_amount",
                min: f64::from(Self::MIN),
                max: f64::from(Self::MAX),
                value: f64::from(cups),
            })
        }
    }

    pub fn clamped(cups: u32) -> Self {
        Self(cups.clamp(Self::MIN, Self::MAX))
    }

    /// Map a zero-based picker row to a cup count. Row 0 is one cup.
    pub fn from_picker_index(index: usize) -> Option<Self> {
        let cups = u32::try_from(index).ok()?.checked_add(1)?;
        Self::try_new(cups).ok()
    }

    /// Zero-based picker row showing this amount.
    pub fn picker_index(&self) -> usize {
        (self.0 - Self::MIN) as usize
    }

    pub fn cups(&self) -> u32 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self::clamped(self.0.saturating_add(1))
    }

    pub fn decrement(self) -> Self {
        Self::clamped(self.0.saturating_sub(1))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl Default for CoffeeAmount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<u32> for CoffeeAmount {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<CoffeeAmount> for u32 {
    fn from(value: CoffeeAmount) -> Self {
        value.0
    }
}

impl fmt::Display for CoffeeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            write!(f, "1 cup")
        } else {
            write!(f, "{} cups", self.0)
        }
    }
}

/// The three form inputs at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BedtimeInputs {
    pub wake_time: WakeTime,
    pub sleep_amount: SleepAmount,
    pub coffee_amount: CoffeeAmount,
}

impl BedtimeInputs {
    pub fn new(
        wake_time: WakeTime,
        sleep_amount: SleepAmount,
        coffee_amount: CoffeeAmount,
    ) -> Self {
        Self {
            wake_time,
            sleep_amount,
            coffee_amount,
        }
    }

    pub fn with_wake_time(self, wake_time: WakeTime) -> Self {
        Self { wake_time, ..self }
    }

    pub fn with_sleep_amount(self, sleep_amount: SleepAmount) -> Self {
        Self {
            sleep_amount,
            ..self
        }
    }

    pub fn with_coffee_amount(self, coffee_amount: CoffeeAmount) -> Self {
        Self {
            coffee_amount,
            ..self
        }
    }
}
