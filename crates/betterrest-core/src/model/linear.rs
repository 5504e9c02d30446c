//! Linear regression sleep model and its TOML artifact format.
//!
//! ```toml
//! name = "SleepCalculator"
//! output_unit = "hours"
//!
//! [coefficients]
//! intercept = 0.6
//! wake = -5.8e-6
//! estimated_sleep = 0.93
//! coffee = 0.09
//!
//! [domain]
//! wake = [0.0, 86400.0]
//! estimated_sleep = [4.0, 12.0]
//! coffee = [1.0, 20.0]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{SleepFeatures, SleepModel};
use crate::error::ModelError;

/// Unit of the raw model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputUnit {
    #[default]
    Hours,
    /// Output is a duration in seconds, as produced by models trained
    /// against a date-subtraction target.
    Seconds,
}

/// Regression weights for each feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub intercept: f64,
    pub wake: f64,
    pub estimated_sleep: f64,
    pub coffee: f64,
}

/// Inclusive `[min, max]` range per feature. Inputs outside are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureDomain {
    pub wake: [f64; 2],
    pub estimated_sleep: [f64; 2],
    pub coffee: [f64; 2],
}

impl FeatureDomain {
    fn check(&self, features: &SleepFeatures) -> Result<(), ModelError> {
        let checks: [(&'static str, f64, [f64; 2]); 3] = [
            ("wake", features.wake, self.wake),
            ("estimated_sleep", features.estimated_sleep, self.estimated_sleep),
            ("coffee", features.coffee, self.coffee),
        ];
        for (name, value, [min, max]) in checks {
            if !(min..=max).contains(&value) {
                return Err(ModelError::FeatureOutOfDomain { name, value });
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ModelError> {
        let ranges = [
            ("domain.wake", self.wake),
            ("domain.estimated_sleep", self.estimated_sleep),
            ("domain.coffee", self.coffee),
        ];
        for (name, [min, max]) in ranges {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(ModelError::InvalidParameter {
                    name: name.to_string(),
                    message: format!("invalid range [{min}, {max}]"),
                });
            }
        }
        Ok(())
    }
}

/// Linear model: `intercept + wake*c_w + estimated_sleep*c_s + coffee*c_c`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSleepModel {
    pub name: String,
    #[serde(default)]
    pub output_unit: OutputUnit,
    pub coefficients: Coefficients,
    #[serde(default)]
    pub domain: Option<FeatureDomain>,
}

impl LinearSleepModel {
    /// Built-in coefficients. They yield a positive duration shorter than a
    /// day for every input the form can produce.
    pub fn builtin() -> Self {
        Self {
            name: "SleepCalculator".to_string(),
            output_unit: OutputUnit::Hours,
            coefficients: Coefficients {
                intercept: 0.6,
                wake: -0.000_005_8,
                estimated_sleep: 0.93,
                coffee: 0.09,
            },
            domain: Some(FeatureDomain {
                wake: [0.0, 86_400.0],
                estimated_sleep: [4.0, 12.0],
                coffee: [1.0, 20.0],
            }),
        }
    }

    /// Parse and validate an artifact.
    pub fn from_toml_str(content: &str) -> Result<Self, ModelError> {
        let model: Self =
            toml::from_str(content).map_err(|e| ModelError::ParseFailed(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Read an artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::LoadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ModelError> {
        toml::to_string_pretty(self).map_err(|e| ModelError::ParseFailed(e.to_string()))
    }

    fn validate(&self) -> Result<(), ModelError> {
        let c = &self.coefficients;
        let named = [
            ("coefficients.intercept", c.intercept),
            ("coefficients.wake", c.wake),
            ("coefficients.estimated_sleep", c.estimated_sleep),
            ("coefficients.coffee", c.coffee),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(ModelError::InvalidParameter {
                    name: name.to_string(),
                    message: format!("coefficient must be finite, got {value}"),
                });
            }
        }
        if let Some(domain) = &self.domain {
            domain.validate()?;
        }
        Ok(())
    }
}

impl Default for LinearSleepModel {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SleepModel for LinearSleepModel {
    fn predict_sleep_hours(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
        for (name, value) in [
            ("wake", features.wake),
            ("estimated_sleep", features.estimated_sleep),
            ("coffee", features.coffee),
        ] {
            if !value.is_finite() {
                return Err(ModelError::FeatureOutOfDomain { name, value });
            }
        }
        if let Some(domain) = &self.domain {
            domain.check(features)?;
        }

        let c = &self.coefficients;
        let raw = c.intercept
            + c.wake * features.wake
            + c.estimated_sleep * features.estimated_sleep
            + c.coffee * features.coffee;

        Ok(match self.output_unit {
            OutputUnit::Hours => raw,
            OutputUnit::Seconds => raw / 3600.0,
        })
    }
}
