//! Model providers.
//!
//! A provider hands out a fresh model for every prediction. Nothing is
//! cached, so an artifact edited on disk is picked up by the next call.

use std::path::PathBuf;

use super::{LinearSleepModel, SleepModel};
use crate::error::ModelError;

/// Loads a model on demand.
pub trait ModelProvider {
    fn load(&self) -> Result<Box<dyn SleepModel>, ModelError>;
}

impl<P: ModelProvider + ?Sized> ModelProvider for &P {
    fn load(&self) -> Result<Box<dyn SleepModel>, ModelError> {
        (**self).load()
    }
}

/// Where the application gets its model from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelSource {
    /// Compiled-in coefficients.
    #[default]
    Builtin,
    /// TOML artifact read from disk on every load.
    Artifact(PathBuf),
}

impl ModelProvider for ModelSource {
    fn load(&self) -> Result<Box<dyn SleepModel>, ModelError> {
        match self {
            ModelSource::Builtin => Ok(Box::new(LinearSleepModel::builtin())),
            ModelSource::Artifact(path) => {
                tracing::debug!(path = %path.display(), "loading model artifact");
                Ok(Box::new(LinearSleepModel::load(path)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SleepFeatures;

    const FEATURES: SleepFeatures = SleepFeatures {
        wake: 25_200.0,
        estimated_sleep: 8.0,
        coffee: 1.0,
    };

    #[test]
    fn builtin_source_always_loads() {
        let model = ModelSource::Builtin.load().unwrap();
        assert!(model.predict_sleep_hours(&FEATURES).is_ok());
    }

    #[test]
    fn artifact_source_fails_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = ModelSource::Artifact(dir.path().join("SleepCalculator.toml"));
        assert!(matches!(
            source.load().err(),
            Some(ModelError::LoadFailed { .. })
        ));
    }

    #[test]
    fn artifact_source_rereads_file_each_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.toml");
        let mut model = LinearSleepModel::builtin();
        std::fs::write(&path, model.to_toml_string().unwrap()).unwrap();

        let source = ModelSource::Artifact(path.clone());
        let first = source.load().unwrap().predict_sleep_hours(&FEATURES).unwrap();

        model.coefficients.intercept += 1.0;
        std::fs::write(&path, model.to_toml_string().unwrap()).unwrap();
        let second = source.load().unwrap().predict_sleep_hours(&FEATURES).unwrap();

        assert!((second - first - 1.0).abs() < 1e-9);
    }
}
