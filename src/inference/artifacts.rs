use crate::domain::ports::{FeatureTransform, ProbabilityModel};
use crate::inference::classifier::{LogisticModel, ModelArtifact};
use crate::inference::transformer::FeatureTransformer;
use crate::utils::error::{Result, ScoringError};
use serde::de::DeserializeOwned;
use std::path::Path;

/// 啟動時載入的兩個產出檔；任何一個失敗即中止啟動
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub transformer: FeatureTransformer,
    pub model: LogisticModel,
}

impl ModelArtifacts {
    pub fn load<P: AsRef<Path>>(transformer_path: P, model_path: P) -> Result<Self> {
        let transformer_path = transformer_path.as_ref();
        let model_path = model_path.as_ref();

        let transformer: FeatureTransformer = read_json(transformer_path)?;
        transformer
            .check()
            .map_err(|e| ScoringError::artifact(transformer_path.display().to_string(), e))?;

        let artifact: ModelArtifact = read_json(model_path)?;
        let model = LogisticModel::try_from(artifact)
            .map_err(|e| ScoringError::artifact(model_path.display().to_string(), e))?;

        Self::from_parts(transformer, model)
            .map_err(|e| ScoringError::artifact(model_path.display().to_string(), e.to_string()))
    }

    pub fn from_parts(transformer: FeatureTransformer, model: LogisticModel) -> Result<Self> {
        if transformer.output_width() != model.input_width() {
            return Err(ScoringError::ConfigError {
                message: format!(
                    "transformer produces {} features but model expects {}",
                    transformer.output_width(),
                    model.input_width()
                ),
            });
        }
        Ok(Self { transformer, model })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ScoringError::artifact(path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&content)
        .map_err(|e| ScoringError::artifact(path.display().to_string(), e.to_string()))
}
