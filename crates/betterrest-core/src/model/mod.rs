//! Sleep model boundary.
//!
//! A model maps three numeric features (wake seconds, desired sleep hours,
//! coffee cups) to the hours of sleep actually needed. Models are obtained
//! through a [`ModelProvider`], which may fail to load one.

mod linear;
mod provider;

pub use linear::{Coefficients, FeatureDomain, LinearSleepModel, OutputUnit};
pub use provider::{ModelProvider, ModelSource};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::inputs::BedtimeInputs;

/// Feature vector handed to a model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepFeatures {
    /// Wake time as seconds after midnight.
    pub wake: f64,
    /// Desired sleep in hours.
    pub estimated_sleep: f64,
    /// Cups of coffee per day (a count, never a picker row).
    pub coffee: f64,
}

impl SleepFeatures {
    pub fn from_inputs(inputs: &BedtimeInputs) -> Self {
        Self {
            wake: f64::from(inputs.wake_time.seconds_after_midnight()),
            estimated_sleep: inputs.sleep_amount.hours(),
            coffee: f64::from(inputs.coffee_amount.cups()),
        }
    }
}

/// A trained regression model.
pub trait SleepModel {
    /// Predicted hours of sleep actually needed.
    fn predict_sleep_hours(&self, features: &SleepFeatures) -> Result<f64, ModelError>;
}

impl<M: SleepModel + ?Sized> SleepModel for Box<M> {
    fn predict_sleep_hours(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
        (**self).predict_sleep_hours(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{CoffeeAmount, SleepAmount, WakeTime};

    #[test]
    fn features_use_seconds_hours_and_cups() {
        let inputs = BedtimeInputs::new(
            WakeTime::new(7, 0).unwrap(),
            SleepAmount::try_new(8.0).unwrap(),
            CoffeeAmount::from_picker_index(0).unwrap(),
        );
        let features = SleepFeatures::from_inputs(&inputs);
        assert_eq!(features.wake, 25_200.0);
        assert_eq!(features.estimated_sleep, 8.0);
        assert_eq!(features.coffee, 1.0);
    }
}
