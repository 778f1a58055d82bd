use crate::domain::ports::ProbabilityModel;
use crate::utils::error::{Result, ScoringError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression {
        intercept: f64,
        coefficients: Vec<f64>,
    },
}

/// 邏輯迴歸：p = sigmoid(w·x + b)
#[derive(Debug, Clone)]
pub struct LogisticModel {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LogisticModel {
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> std::result::Result<Self, String> {
        if coefficients.is_empty() {
            return Err("model has no coefficients".to_string());
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err("model parameters must be finite".to_string());
        }
        Ok(Self {
            intercept,
            coefficients,
        })
    }
}

impl TryFrom<ModelArtifact> for LogisticModel {
    type Error = String;

    fn try_from(artifact: ModelArtifact) -> std::result::Result<Self, Self::Error> {
        match artifact {
            ModelArtifact::LogisticRegression {
                intercept,
                coefficients,
            } => Self::new(intercept, coefficients),
        }
    }
}

impl ProbabilityModel for LogisticModel {
    fn input_width(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(ScoringError::inference(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }

        let logit = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>();

        let probability = 1.0 / (1.0 + (-logit).exp());
        if probability.is_nan() {
            return Err(ScoringError::inference("model produced NaN"));
        }
        Ok(probability)
    }
}
