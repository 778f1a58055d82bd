use crate::domain::model::{CustomerRecord, InputTable, ScoringOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<InputTable>;
    async fn transform(&self, table: InputTable) -> Result<ScoringOutcome>;
    async fn load(&self, outcome: &ScoringOutcome) -> Result<String>;
}

/// 特徵轉換：把原始欄位轉成模型可用的數值向量
pub trait FeatureTransform: Send + Sync {
    fn feature_names(&self) -> Vec<String>;
    fn output_width(&self) -> usize;
    fn transform(&self, record: &CustomerRecord) -> Result<Vec<f64>>;
}

/// 已訓練的二元分類器，回傳正類（流失）機率
pub trait ProbabilityModel: Send + Sync {
    fn input_width(&self) -> usize;
    fn predict_proba(&self, features: &[f64]) -> Result<f64>;
}
