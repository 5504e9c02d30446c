//! Bedtime predictor.
//!
//! Turns the form inputs into model features, asks the model how much sleep
//! is actually needed, and counts that duration back from the wake time.
//!
//! ```text
//! Idle -> Computing -> (Success | Failure) -> Idle
//! ```
//!
//! Every failure below this point (model load, rejected feature, unusable
//! output) is logged and reported as [`PredictionError`].

use std::fmt;

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, PredictionError};
use crate::inputs::{BedtimeInputs, CoffeeAmount, SleepAmount, WakeTime};
use crate::model::{ModelProvider, SleepFeatures};

const DAY_MS: f64 = 86_400_000.0;

/// How times of day are shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockStyle {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

/// Predicted time of day to go to sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bedtime(NaiveTime);

impl Bedtime {
    pub fn as_time(&self) -> NaiveTime {
        self.0
    }

    /// Short time-of-day label, e.g. `10:45 PM` or `22:45`.
    pub fn format_short(&self, clock: ClockStyle) -> String {
        match clock {
            ClockStyle::TwelveHour => self.0.format("%-I:%M %p").to_string(),
            ClockStyle::TwentyFourHour => self.0.format("%H:%M").to_string(),
        }
    }
}

impl fmt::Display for Bedtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_short(ClockStyle::default()))
    }
}

/// A successful prediction with the model's raw estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub bedtime: Bedtime,
    /// Hours of sleep the model says are needed.
    pub required_sleep_hours: f64,
}

/// Stateless wrapper around a model provider.
#[derive(Debug, Clone)]
pub struct BedtimePredictor<P> {
    provider: P,
}

impl<P: ModelProvider> BedtimePredictor<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Predict the bedtime for the given inputs.
    ///
    /// `coffee` is a true cup count; picker rows must already have been
    /// converted with [`CoffeeAmount::from_picker_index`].
    pub fn predict(
        &self,
        wake: WakeTime,
        sleep: SleepAmount,
        coffee: CoffeeAmount,
    ) -> Result<Bedtime, PredictionError> {
        self.predict_inputs(&BedtimeInputs::new(wake, sleep, coffee))
    }

    pub fn predict_inputs(&self, inputs: &BedtimeInputs) -> Result<Bedtime, PredictionError> {
        self.estimate(inputs).map(|p| p.bedtime)
    }

    /// Like [`predict_inputs`](Self::predict_inputs), also returning the
    /// model's required-sleep estimate.
    pub fn estimate(&self, inputs: &BedtimeInputs) -> Result<Prediction, PredictionError> {
        self.try_estimate(inputs).map_err(|err| {
            tracing::warn!(error = %err, "bedtime prediction failed");
            PredictionError
        })
    }

    fn try_estimate(&self, inputs: &BedtimeInputs) -> Result<Prediction, ModelError> {
        let features = SleepFeatures::from_inputs(inputs);
        tracing::debug!(
            wake = features.wake,
            estimated_sleep = features.estimated_sleep,
            coffee = features.coffee,
            "predicting bedtime"
        );

        let model = self.provider.load()?;
        let hours = model.predict_sleep_hours(&features)?;

        let millis = (hours * 3_600_000.0).round();
        if !millis.is_finite() || millis <= 0.0 || millis >= DAY_MS {
            return Err(ModelError::InvalidOutput(hours));
        }

        let (bedtime, _) = inputs
            .wake_time
            .as_time()
            .overflowing_sub_signed(Duration::milliseconds(millis as i64));
        tracing::debug!(required_sleep_hours = hours, %bedtime, "bedtime predicted");

        Ok(Prediction {
            bedtime: Bedtime(bedtime),
            required_sleep_hours: hours,
        })
    }
}
