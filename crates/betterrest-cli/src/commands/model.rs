//! Sleep model commands.

use std::path::PathBuf;

use clap::Subcommand;

use betterrest_core::{
    BedtimeInputs, Config, LinearSleepModel, ModelProvider, ModelSource, SleepFeatures, SleepModel,
};

#[derive(Subcommand)]
pub enum ModelAction {
    /// Print the model currently in use
    Show,
    /// Write the built-in model as a TOML artifact
    Export {
        /// Output file (stdout if omitted)
        path: Option<PathBuf>,
    },
    /// Validate an artifact and run it on the default inputs
    Check {
        /// Artifact to check
        path: PathBuf,
    },
}

pub fn run(action: ModelAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ModelAction::Show => {
            let config = Config::load()?;
            match config.model_source() {
                ModelSource::Builtin => {
                    println!("# built-in model");
                    print!("{}", LinearSleepModel::builtin().to_toml_string()?);
                }
                ModelSource::Artifact(path) => {
                    println!("# {}", path.display());
                    print!("{}", LinearSleepModel::load(&path)?.to_toml_string()?);
                }
            }
        }
        ModelAction::Export { path } => {
            let text = LinearSleepModel::builtin().to_toml_string()?;
            match path {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    tracing::info!(path = %path.display(), "exported built-in model");
                    println!("model written to {}", path.display());
                }
                None => print!("{text}"),
            }
        }
        ModelAction::Check { path } => {
            // Errors here keep their detail: this is a diagnostic command.
            let model = ModelSource::Artifact(path.clone()).load()?;
            let features = SleepFeatures::from_inputs(&BedtimeInputs::default());
            let hours = model.predict_sleep_hours(&features)?;
            println!("ok: {}", path.display());
            println!("  required sleep at defaults: {hours:.2} hours");
        }
    }
    Ok(())
}
