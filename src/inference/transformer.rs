use crate::domain::model::{CustomerRecord, FieldValue};
use crate::domain::ports::FeatureTransform;
use crate::utils::error::{Result, ScoringError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategory {
    #[default]
    Ignore,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSpec {
    /// 標準化：(x - mean) / scale，缺值時以 fill_value 補
    Numeric {
        name: String,
        mean: f64,
        scale: f64,
        #[serde(default)]
        fill_value: Option<f64>,
    },
    /// One-hot 編碼
    Categorical {
        name: String,
        categories: Vec<String>,
        #[serde(default)]
        handle_unknown: UnknownCategory,
    },
}

impl ColumnSpec {
    pub fn name(&self) -> &str {
        match self {
            Self::Numeric { name, .. } | Self::Categorical { name, .. } => name,
        }
    }

    fn width(&self) -> usize {
        match self {
            Self::Numeric { .. } => 1,
            Self::Categorical { categories, .. } => categories.len(),
        }
    }

    fn encode(&self, value: Option<&FieldValue>, out: &mut Vec<f64>) -> Result<()> {
        match self {
            Self::Numeric {
                name,
                mean,
                scale,
                fill_value,
            } => {
                let raw = match value {
                    Some(v) => v.as_f64().ok_or_else(|| {
                        ScoringError::transform(format!(
                            "could not convert '{}' to a number for column '{}'",
                            v, name
                        ))
                    })?,
                    None => fill_value.ok_or_else(|| {
                        ScoringError::transform(format!("missing required column '{}'", name))
                    })?,
                };
                out.push((raw - mean) / scale);
            }
            Self::Categorical {
                name,
                categories,
                handle_unknown,
            } => {
                let position = value.and_then(|v| {
                    let text = v.to_string();
                    categories.iter().position(|c| *c == text)
                });
                if position.is_none() && *handle_unknown == UnknownCategory::Error {
                    return Err(ScoringError::transform(match value {
                        Some(v) => format!("unknown category '{}' in column '{}'", v, name),
                        None => format!("missing required column '{}'", name),
                    }));
                }
                let start = out.len();
                out.resize(start + categories.len(), 0.0);
                if let Some(i) = position {
                    out[start + i] = 1.0;
                }
            }
        }
        Ok(())
    }

    fn validate(&self) -> std::result::Result<(), String> {
        match self {
            Self::Numeric {
                name, mean, scale, ..
            } => {
                if !mean.is_finite() || !scale.is_finite() || *scale == 0.0 {
                    return Err(format!(
                        "column '{}' needs a finite mean and a finite non-zero scale",
                        name
                    ));
                }
            }
            Self::Categorical {
                name, categories, ..
            } => {
                if categories.is_empty() {
                    return Err(format!("column '{}' has no categories", name));
                }
                let unique: HashSet<&String> = categories.iter().collect();
                if unique.len() != categories.len() {
                    return Err(format!("column '{}' has duplicate categories", name));
                }
            }
        }
        Ok(())
    }
}

/// 由 transformer 產出檔載入的欄位轉換器；未列出的欄位（例如客戶 ID）會被忽略
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureTransformer {
    pub columns: Vec<ColumnSpec>,
}

impl FeatureTransformer {
    pub fn new(columns: Vec<ColumnSpec>) -> std::result::Result<Self, String> {
        let transformer = Self { columns };
        transformer.check()?;
        Ok(transformer)
    }

    pub(crate) fn check(&self) -> std::result::Result<(), String> {
        if self.columns.is_empty() {
            return Err("transformer defines no columns".to_string());
        }
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name()) {
                return Err(format!("column '{}' is defined twice", column.name()));
            }
            column.validate()?;
        }
        Ok(())
    }
}

impl FeatureTransform for FeatureTransformer {
    fn feature_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    fn output_width(&self) -> usize {
        self.columns.iter().map(ColumnSpec::width).sum()
    }

    fn transform(&self, record: &CustomerRecord) -> Result<Vec<f64>> {
        let mut features = Vec::with_capacity(self.output_width());
        for column in &self.columns {
            column.encode(record.get(column.name()), &mut features)?;
        }
        Ok(features)
    }
}
