//! # BetterRest Core Library
//!
//! This library provides the logic behind the BetterRest bedtime calculator.
//! The user picks a wake-up time, how much sleep they want and how much
//! coffee they drink; a regression model estimates how much sleep they
//! actually need and the bedtime is counted back from the wake time.
//!
//! ## Architecture
//!
//! - **Inputs**: range-checked value types for each form control
//! - **Form**: the input state holder that recomputes the bedtime whenever
//!   an input changes and raises an alert when it cannot
//! - **Predictor**: stateless feature conversion and bedtime arithmetic
//!   around an injected model
//! - **Model**: the model boundary plus a linear regression model with a
//!   TOML artifact format
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`BedtimeForm`]: Input state holder
//! - [`BedtimePredictor`]: Bedtime prediction
//! - [`ModelProvider`]: Trait for loading sleep models
//! - [`Config`]: Application configuration management

pub mod error;
pub mod form;
pub mod inputs;
pub mod model;
pub mod predictor;
pub mod storage;

pub use error::{ConfigError, CoreError, ModelError, PredictionError, ValidationError};
pub use form::{Alert, BedtimeForm, PREDICTION_ALERT_MESSAGE, PREDICTION_ALERT_TITLE};
pub use inputs::{BedtimeInputs, CoffeeAmount, SleepAmount, WakeTime};
pub use model::{LinearSleepModel, ModelProvider, ModelSource, SleepFeatures, SleepModel};
pub use predictor::{Bedtime, BedtimePredictor, ClockStyle, Prediction};
pub use storage::Config;
