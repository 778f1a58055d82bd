use crate::domain::model::{CustomerRecord, PredictRequest, PredictionResult};
use crate::utils::error::Result;
use reqwest::{Client, StatusCode};
use std::error::Error as _;
use std::fmt;
use std::time::Duration;

/// 單列失敗的兩種情形
#[derive(Debug)]
pub enum RowFailure {
    /// 服務有回應但狀態碼不是 200
    Status(StatusCode),
    /// 連線失敗、逾時或回應內容無法解析
    Transport(String),
}

impl fmt::Display for RowFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "Status {}", status.as_u16()),
            Self::Transport(detail) => f.write_str(detail),
        }
    }
}

/// 預測端點的 HTTP 客戶端；每次呼叫只嘗試一次
#[derive(Debug, Clone)]
pub struct ScoringClient {
    client: Client,
    endpoint: String,
}

impl ScoringClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn predict(
        &self,
        record: CustomerRecord,
    ) -> std::result::Result<PredictionResult, RowFailure> {
        let request = PredictRequest { customer: record };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| RowFailure::Transport(describe(&e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RowFailure::Status(status));
        }

        response
            .json::<PredictionResult>()
            .await
            .map_err(|e| RowFailure::Transport(describe(&e)))
    }
}

/// reqwest 的錯誤訊息不含底層原因，把 source 串起來
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
