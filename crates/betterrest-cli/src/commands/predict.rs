//! One-shot bedtime prediction.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use betterrest_core::{
    Alert, BedtimeInputs, BedtimePredictor, CoffeeAmount, Config, CoreError, ModelSource,
    SleepAmount, ValidationError,
};

use super::form::render_form;

#[derive(Args, Debug, Default)]
pub struct PredictArgs {
    /// Desired wake-up time (HH:MM, 24h)
    #[arg(long)]
    pub wake: Option<String>,
    /// Desired hours of sleep (4-12 in 0.25 steps)
    #[arg(long)]
    pub sleep: Option<f64>,
    /// Cups of coffee per day (1-20)
    #[arg(long, conflicts_with = "coffee_index")]
    pub coffee: Option<u32>,
    /// Zero-based row of the coffee picker (0 = 1 cup)
    #[arg(long)]
    pub coffee_index: Option<usize>,
    /// Model artifact to use instead of the configured one
    #[arg(long)]
    pub model: Option<PathBuf>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PredictOutput {
    #[serde(flatten)]
    inputs: BedtimeInputs,
    coffee_index: usize,
    bedtime: String,
    required_sleep_hours: f64,
}

/// Apply command-line overrides on top of configured defaults.
fn resolve_inputs(config: &Config, args: &PredictArgs) -> Result<BedtimeInputs, CoreError> {
    let mut inputs = config.inputs()?;
    if let Some(wake) = &args.wake {
        inputs = inputs.with_wake_time(wake.parse()?);
    }
    if let Some(hours) = args.sleep {
        inputs = inputs.with_sleep_amount(SleepAmount::try_new(hours)?);
    }
    if let Some(cups) = args.coffee {
        inputs = inputs.with_coffee_amount(CoffeeAmount::try_new(cups)?);
    }
    if let Some(index) = args.coffee_index {
        let coffee = CoffeeAmount::from_picker_index(index).ok_or_else(|| {
            ValidationError::InvalidValue {
                field: "coffee_index".to_string(),
                message: format!("must be between 0 and {}, got {index}", CoffeeAmount::MAX - 1),
            }
        })?;
        inputs = inputs.with_coffee_amount(coffee);
    }
    Ok(inputs)
}

pub fn run(args: PredictArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let inputs = resolve_inputs(&config, &args)?;
    let source = args
        .model
        .clone()
        .map(ModelSource::Artifact)
        .unwrap_or_else(|| config.model_source());

    let predictor = BedtimePredictor::new(source);
    let prediction = match predictor.estimate(&inputs) {
        Ok(prediction) => prediction,
        Err(_) => {
            let alert = Alert::prediction_failed();
            eprintln!("{}", alert.title);
            eprintln!("{}", alert.message);
            std::process::exit(1);
        }
    };

    let clock = config.display.clock;
    if args.json {
        let output = PredictOutput {
            coffee_index: inputs.coffee_amount.picker_index(),
            inputs,
            bedtime: prediction.bedtime.format_short(clock),
            required_sleep_hours: prediction.required_sleep_hours,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_form(&inputs, Some(prediction.bedtime), clock));
    }
    Ok(())
}
