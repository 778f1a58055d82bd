use crate::domain::model::{CustomerRecord, PredictRequest, PredictionResult, CHURN_THRESHOLD};
use crate::domain::ports::{FeatureTransform, ProbabilityModel};
use crate::inference::artifacts::ModelArtifacts;
use crate::utils::error::{Result, ScoringError};
use serde::Serialize;

/// 單筆預測服務。啟動時建立一次，之後只讀不寫，可在多個 worker 間共享。
pub struct ScoringService {
    transform: Box<dyn FeatureTransform>,
    model: Box<dyn ProbabilityModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub features: Vec<String>,
    pub input_width: usize,
    pub threshold: f64,
}

impl ScoringService {
    pub fn new(transform: Box<dyn FeatureTransform>, model: Box<dyn ProbabilityModel>) -> Self {
        Self { transform, model }
    }

    pub fn from_artifacts(artifacts: ModelArtifacts) -> Self {
        Self::new(Box::new(artifacts.transformer), Box::new(artifacts.model))
    }

    /// 解析 `{"customer": {...}}` 後預測
    pub fn predict_body(&self, body: &[u8]) -> Result<PredictionResult> {
        let request: PredictRequest =
            serde_json::from_slice(body).map_err(|e| ScoringError::RequestError {
                message: e.to_string(),
            })?;
        self.predict(&request.customer)
    }

    pub fn predict(&self, record: &CustomerRecord) -> Result<PredictionResult> {
        let features = self.transform.transform(record)?;
        let probability = self.model.predict_proba(&features)?;

        if !(0.0..=1.0).contains(&probability) {
            return Err(ScoringError::inference(format!(
                "probability {} is outside [0, 1]",
                probability
            )));
        }

        Ok(PredictionResult::from_probability(probability))
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            features: self.transform.feature_names(),
            input_width: self.model.input_width(),
            threshold: CHURN_THRESHOLD,
        }
    }
}
