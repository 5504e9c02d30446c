//! Input state holder for the bedtime form.
//!
//! [`BedtimeForm`] owns the three editable inputs and the derived bedtime.
//! Every setter keeps its value in range and recomputes the bedtime
//! immediately; none of them can fail. A failed prediction raises an
//! [`Alert`] and leaves the last good bedtime in place.

use serde::{Deserialize, Serialize};

use crate::inputs::{BedtimeInputs, CoffeeAmount, SleepAmount, WakeTime};
use crate::model::ModelProvider;
use crate::predictor::{Bedtime, BedtimePredictor};

pub const PREDICTION_ALERT_TITLE: &str = "Error!";
pub const PREDICTION_ALERT_MESSAGE: &str = "Sorry, there was a problem calculating your bedtime.";

/// Dismissible error dialog state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub visible: bool,
}

impl Alert {
    /// The alert shown when a bedtime cannot be calculated.
    pub fn prediction_failed() -> Self {
        Self {
            title: PREDICTION_ALERT_TITLE.to_string(),
            message: PREDICTION_ALERT_MESSAGE.to_string(),
            visible: true,
        }
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }
}

pub struct BedtimeForm<P> {
    predictor: BedtimePredictor<P>,
    inputs: BedtimeInputs,
    bedtime: Option<Bedtime>,
    alert: Alert,
}

impl<P: ModelProvider> BedtimeForm<P> {
    /// Form with default inputs (07:00, 8 hours, 1 cup).
    pub fn new(predictor: BedtimePredictor<P>) -> Self {
        Self::with_inputs(predictor, BedtimeInputs::default())
    }

    pub fn with_inputs(predictor: BedtimePredictor<P>, inputs: BedtimeInputs) -> Self {
        let mut form = Self {
            predictor,
            inputs,
            bedtime: None,
            alert: Alert::default(),
        };
        form.recompute();
        form
    }

    pub fn inputs(&self) -> &BedtimeInputs {
        &self.inputs
    }

    /// Most recent successful prediction, if any.
    pub fn bedtime(&self) -> Option<Bedtime> {
        self.bedtime
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    pub fn dismiss_alert(&mut self) {
        self.alert.dismiss();
    }

    pub fn set_wake_time(&mut self, wake_time: WakeTime) {
        self.update(self.inputs.with_wake_time(wake_time));
    }

    /// Set desired sleep, clamped to the stepper range.
    pub fn set_sleep_amount(&mut self, hours: f64) {
        self.update(self.inputs.with_sleep_amount(SleepAmount::clamped(hours)));
    }

    pub fn increment_sleep(&mut self) {
        self.update(
            self.inputs
                .with_sleep_amount(self.inputs.sleep_amount.increment()),
        );
    }

    pub fn decrement_sleep(&mut self) {
        self.update(
            self.inputs
                .with_sleep_amount(self.inputs.sleep_amount.decrement()),
        );
    }

    /// Set coffee cups, clamped to 1..=20.
    pub fn set_coffee_amount(&mut self, cups: u32) {
        self.update(self.inputs.with_coffee_amount(CoffeeAmount::clamped(cups)));
    }

    /// Select a picker row. Rows past the last one are ignored.
    pub fn select_coffee_index(&mut self, index: usize) {
        match CoffeeAmount::from_picker_index(index) {
            Some(coffee) => self.update(self.inputs.with_coffee_amount(coffee)),
            None => tracing::debug!(index, "ignoring coffee picker index outside range"),
        }
    }

    pub fn increment_coffee(&mut self) {
        self.update(
            self.inputs
                .with_coffee_amount(self.inputs.coffee_amount.increment()),
        );
    }

    pub fn decrement_coffee(&mut self) {
        self.update(
            self.inputs
                .with_coffee_amount(self.inputs.coffee_amount.decrement()),
        );
    }

    fn update(&mut self, inputs: BedtimeInputs) {
        self.inputs = inputs;
        self.recompute();
    }

    fn recompute(&mut self) {
        match self.predictor.predict_inputs(&self.inputs) {
            Ok(bedtime) => self.bedtime = Some(bedtime),
            Err(_) => self.alert = Alert::prediction_failed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::model::{ModelSource, SleepFeatures, SleepModel};
    use chrono::NaiveTime;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Sleep needed equals desired sleep; can be switched off.
    #[derive(Clone)]
    struct Switchable {
        broken: Rc<Cell<bool>>,
    }

    struct Echo;

    impl SleepModel for Echo {
        fn predict_sleep_hours(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
            Ok(features.estimated_sleep)
        }
    }

    impl ModelProvider for Switchable {
        fn load(&self) -> Result<Box<dyn SleepModel>, ModelError> {
            if self.broken.get() {
                Err(ModelError::ParseFailed("switched off".into()))
            } else {
                Ok(Box::new(Echo))
            }
        }
    }

    fn switchable() -> (BedtimeForm<Switchable>, Rc<Cell<bool>>) {
        let broken = Rc::new(Cell::new(false));
        let provider = Switchable {
            broken: Rc::clone(&broken),
        };
        (BedtimeForm::new(BedtimePredictor::new(provider)), broken)
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn computes_bedtime_on_creation() {
        let (form, _) = switchable();
        assert_eq!(form.bedtime().unwrap().as_time(), time(23, 0));
        assert!(!form.alert().visible);
    }

    #[test]
    fn setters_recompute_eagerly() {
        let (mut form, _) = switchable();
        form.set_wake_time(WakeTime::new(6, 30).unwrap());
        assert_eq!(form.bedtime().unwrap().as_time(), time(22, 30));
        form.increment_sleep();
        assert_eq!(form.bedtime().unwrap().as_time(), time(22, 15));
        form.set_sleep_amount(6.0);
        assert_eq!(form.bedtime().unwrap().as_time(), time(0, 30));
    }

    #[test]
    fn setters_clamp_out_of_range_values() {
        let (mut form, _) = switchable();
        form.set_sleep_amount(20.0);
        assert_eq!(form.inputs().sleep_amount.hours(), 12.0);
        form.set_coffee_amount(0);
        assert_eq!(form.inputs().coffee_amount.cups(), 1);
        form.set_coffee_amount(50);
        assert_eq!(form.inputs().coffee_amount.cups(), 20);
        form.increment_coffee();
        assert_eq!(form.inputs().coffee_amount.cups(), 20);
    }

    #[test]
    fn picker_index_maps_to_cups() {
        let (mut form, _) = switchable();
        form.select_coffee_index(4);
        assert_eq!(form.inputs().coffee_amount.cups(), 5);
        form.select_coffee_index(20);
        assert_eq!(form.inputs().coffee_amount.cups(), 5);
    }

    #[test]
    fn failure_raises_alert_and_keeps_previous_bedtime() {
        let (mut form, broken) = switchable();
        let before = form.bedtime();

        broken.set(true);
        form.set_sleep_amount(9.0);

        assert_eq!(form.bedtime(), before);
        assert_eq!(form.alert().title, "Error!");
        assert_eq!(
            form.alert().message,
            "Sorry, there was a problem calculating your bedtime."
        );
        assert!(form.alert().visible);

        form.dismiss_alert();
        assert!(!form.alert().visible);

        broken.set(false);
        form.decrement_sleep();
        assert_eq!(form.bedtime().unwrap().as_time(), time(22, 15));
        assert!(!form.alert().visible);
    }

    #[test]
    fn missing_artifact_leaves_bedtime_unset() {
        let dir = tempfile::tempdir().unwrap();
        let source = ModelSource::Artifact(dir.path().join("missing.toml"));
        let form = BedtimeForm::new(BedtimePredictor::new(source));
        assert!(form.bedtime().is_none());
        assert!(form.alert().visible);
    }
}
