//! Properties of bedtime prediction across the whole input domain.

use betterrest_core::{
    Bedtime, BedtimeInputs, BedtimePredictor, CoffeeAmount, LinearSleepModel, ModelError,
    ModelProvider, ModelSource, PredictionError, SleepAmount, SleepFeatures, SleepModel, WakeTime,
};
use proptest::prelude::*;

const DAY_MS: i64 = 86_400_000;

/// Milliseconds from bedtime forward to wake time, wrapping at midnight.
fn gap_ms(wake: WakeTime, bedtime: Bedtime) -> i64 {
    (wake.as_time() - bedtime.as_time())
        .num_milliseconds()
        .rem_euclid(DAY_MS)
}

/// A model whose output is linear in the features but can leave (0, 24h).
struct Wild;

impl SleepModel for Wild {
    fn predict_sleep_hours(&self, f: &SleepFeatures) -> Result<f64, ModelError> {
        Ok(f.estimated_sleep * 2.5 - f.coffee)
    }
}

impl ModelProvider for Wild {
    fn load(&self) -> Result<Box<dyn SleepModel>, ModelError> {
        Ok(Box::new(Wild))
    }
}

#[test]
fn every_stepper_position_yields_earlier_bedtime() {
    let predictor = BedtimePredictor::new(ModelSource::Builtin);
    let wake = WakeTime::new(7, 0).unwrap();
    for sleep in SleepAmount::all() {
        for coffee in CoffeeAmount::all() {
            let bedtime = predictor.predict(wake, sleep, coffee).unwrap();
            let gap = gap_ms(wake, bedtime);
            assert!(gap > 0 && gap < DAY_MS, "sleep={sleep} coffee={coffee}");
        }
    }
}

#[test]
fn unruly_model_either_fails_cleanly_or_stays_before_wake() {
    let predictor = BedtimePredictor::new(Wild);
    let wake = WakeTime::new(7, 0).unwrap();
    let mut failures = 0;
    for sleep in SleepAmount::all() {
        for coffee in CoffeeAmount::all() {
            match predictor.predict(wake, sleep, coffee) {
                Ok(bedtime) => {
                    let gap = gap_ms(wake, bedtime);
                    assert!(gap > 0 && gap < DAY_MS);
                }
                Err(PredictionError) => failures += 1,
            }
        }
    }
    // 4 hours * 2.5 - 20 cups is negative, 12 * 2.5 - 1 is over a day
    assert!(failures > 0);
}

#[test]
fn midnight_wake_wraps_to_previous_evening() {
    let predictor = BedtimePredictor::new(ModelSource::Builtin);
    let wake = WakeTime::new(0, 0).unwrap();
    let bedtime = predictor
        .predict(wake, SleepAmount::try_new(4.0).unwrap(), CoffeeAmount::default())
        .unwrap();
    let gap = gap_ms(wake, bedtime);
    assert!(gap > 0 && gap < DAY_MS);
    assert!(bedtime.as_time() > wake.as_time());
}

#[test]
fn default_scenario_is_before_seven() {
    let predictor = BedtimePredictor::new(ModelSource::Builtin);
    let coffee = CoffeeAmount::from_picker_index(0).unwrap();
    let bedtime = predictor
        .predict(WakeTime::default(), SleepAmount::default(), coffee)
        .unwrap();
    assert_eq!(bedtime.to_string(), "11:00 PM");
}

#[test]
fn unloadable_artifact_is_a_prediction_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("SleepCalculator.toml");
    std::fs::write(&path, "name = ").unwrap();

    let predictor = BedtimePredictor::new(ModelSource::Artifact(path));
    let err = predictor
        .predict_inputs(&BedtimeInputs::default())
        .unwrap_err();
    assert_eq!(err.to_string(), "there was a problem calculating your bedtime");
}

#[test]
fn artifact_with_narrow_domain_rejects_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("narrow.toml");
    let mut model = LinearSleepModel::builtin();
    if let Some(domain) = model.domain.as_mut() {
        domain.coffee = [1.0, 5.0];
    }
    std::fs::write(&path, model.to_toml_string().unwrap()).unwrap();

    let predictor = BedtimePredictor::new(ModelSource::Artifact(path));
    let inputs = BedtimeInputs::default();
    assert!(predictor.predict_inputs(&inputs).is_ok());
    let heavy = inputs.with_coffee_amount(CoffeeAmount::try_new(6).unwrap());
    assert_eq!(predictor.predict_inputs(&heavy), Err(PredictionError));
}

fn sleep_amounts() -> impl Strategy<Value = SleepAmount> {
    (0u32..=32).prop_map(|i| SleepAmount::try_new(4.0 + f64::from(i) * 0.25).unwrap())
}

proptest! {
    #[test]
    fn bedtime_strictly_precedes_wake(
        hour in 0u32..24,
        minute in 0u32..60,
        sleep in sleep_amounts(),
        cups in 1u32..=20,
    ) {
        let predictor = BedtimePredictor::new(ModelSource::Builtin);
        let wake = WakeTime::new(hour, minute).unwrap();
        let coffee = CoffeeAmount::try_new(cups).unwrap();
        let bedtime = predictor.predict(wake, sleep, coffee).unwrap();
        let gap = gap_ms(wake, bedtime);
        prop_assert!(gap > 0 && gap < DAY_MS);
    }

    #[test]
    fn prediction_is_idempotent(
        hour in 0u32..24,
        minute in 0u32..60,
        sleep in sleep_amounts(),
        cups in 1u32..=20,
    ) {
        let predictor = BedtimePredictor::new(ModelSource::Builtin);
        let inputs = BedtimeInputs::new(
            WakeTime::new(hour, minute).unwrap(),
            sleep,
            CoffeeAmount::try_new(cups).unwrap(),
        );
        prop_assert_eq!(predictor.estimate(&inputs), predictor.estimate(&inputs));
    }

    #[test]
    fn clamped_inputs_never_leave_their_range(hours in -100.0f64..100.0, cups in 0u32..1000) {
        let sleep = SleepAmount::clamped(hours);
        prop_assert!((SleepAmount::MIN..=SleepAmount::MAX).contains(&sleep.hours()));
        prop_assert!(SleepAmount::try_new(sleep.hours()).is_ok());
        let coffee = CoffeeAmount::clamped(cups);
        prop_assert!((CoffeeAmount::MIN..=CoffeeAmount::MAX).contains(&coffee.cups()));
    }
}
