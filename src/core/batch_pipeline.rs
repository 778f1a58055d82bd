use crate::core::scoring_client::{RowFailure, ScoringClient};
use crate::core::table::{read_table, write_table};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{BatchSummary, CustomerRecord, InputTable, ScoredRow, ScoringOutcome};
use crate::utils::error::Result;

/// 逐列呼叫預測端點的批次流程。列序號一律為 0 起算的資料列索引（不含表頭）。
pub struct BatchScoringPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: ScoringClient,
}

impl<S: Storage, C: ConfigProvider> BatchScoringPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = ScoringClient::new(config.endpoint(), config.request_timeout())?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BatchScoringPipeline<S, C> {
    async fn extract(&self) -> Result<InputTable> {
        tracing::debug!("Reading input table: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;
        read_table(&data)
    }

    async fn transform(&self, table: InputTable) -> Result<ScoringOutcome> {
        let mut summary = BatchSummary::new(table.len());
        let mut scored_rows = Vec::new();

        tracing::debug!(
            "Scoring {} rows against {}",
            table.len(),
            self.client.endpoint()
        );

        // 依序呼叫，一列完成後才處理下一列
        for (idx, cells) in table.rows.into_iter().enumerate() {
            let record = CustomerRecord::from_row(&table.headers, &cells);

            match self.client.predict(record).await {
                Ok(prediction) => {
                    summary.record_success(prediction.churn_probability);
                    scored_rows.push(ScoredRow { cells, prediction });
                }
                Err(failure @ RowFailure::Status(_)) => {
                    tracing::warn!("Failed at row {}: {}", idx, failure);
                    summary.record_failure();
                }
                Err(failure @ RowFailure::Transport(_)) => {
                    tracing::error!("Exception at row {}: {}", idx, failure);
                    summary.record_failure();
                }
            }
        }

        Ok(ScoringOutcome {
            headers: table.headers,
            scored_rows,
            summary,
        })
    }

    async fn load(&self, outcome: &ScoringOutcome) -> Result<String> {
        let data = write_table(&outcome.headers, &outcome.scored_rows)?;

        tracing::debug!(
            "Writing {} scored rows ({} bytes) to {}",
            outcome.scored_rows.len(),
            data.len(),
            self.config.output_path()
        );
        self.storage
            .write_file(self.config.output_path(), &data)
            .await?;

        Ok(self.config.output_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BatchConfig;
    use crate::utils::error::ScoringError;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ScoringError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn config(endpoint: String) -> BatchConfig {
        let mut config = BatchConfig::with_input("customers.csv");
        config.endpoint = endpoint;
        config.output = "scored.csv".to_string();
        config.timeout_secs = 5;
        config
    }

    #[tokio::test]
    async fn test_rows_are_sent_without_missing_fields() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/predict").json_body(serde_json::json!({
                "customer": {"customerID": "0001-A", "Contract": "One year"}
            }));
            then.status(200).json_body(serde_json::json!({
                "churn_probability": 0.12,
                "churn_prediction": "No"
            }));
        });

        let storage = MockStorage::with_file("customers.csv", "customerID,tenure,Contract\n0001-A,,One year\n");
        let pipeline = BatchScoringPipeline::new(storage.clone(), config(server.url("/predict"))).unwrap();

        let table = pipeline.extract().await.unwrap();
        let outcome = pipeline.transform(table).await.unwrap();

        api_mock.assert();
        assert_eq!(outcome.summary.successes(), 1);
        assert_eq!(outcome.scored_rows[0].cells, vec!["0001-A", "", "One year"]);

        let path = pipeline.load(&outcome).await.unwrap();
        assert_eq!(path, "scored.csv");
        let written = String::from_utf8(storage.get_file("scored.csv").await.unwrap()).unwrap();
        assert_eq!(
            written,
            "customerID,tenure,Contract,churn_probability,churn_prediction\n0001-A,,One year,0.12,No\n"
        );
    }

    #[tokio::test]
    async fn test_failed_rows_are_counted_and_dropped() {
        let server = MockServer::start();
        let ok_mock = server.mock(|when, then| {
            when.method(POST).path("/predict").body_contains("good");
            then.status(200).json_body(serde_json::json!({
                "churn_probability": 0.8,
                "churn_prediction": "Yes"
            }));
        });
        let bad_mock = server.mock(|when, then| {
            when.method(POST).path("/predict").body_contains("broken");
            then.status(500).json_body(serde_json::json!({"error": "bad row"}));
        });

        let storage = MockStorage::with_file(
            "customers.csv",
            "customerID\ngood-1\nbroken-2\ngood-3\nbroken-4\n",
        );
        let pipeline = BatchScoringPipeline::new(storage, config(server.url("/predict"))).unwrap();

        let table = pipeline.extract().await.unwrap();
        let outcome = pipeline.transform(table).await.unwrap();

        ok_mock.assert_hits(2);
        bad_mock.assert_hits(2);
        assert_eq!(outcome.summary.total, 4);
        assert_eq!(outcome.summary.failures, 2);
        assert_eq!(outcome.summary.successes() + outcome.summary.failures, 4);
        assert_eq!(outcome.scored_rows.len(), outcome.summary.successes());
        assert_eq!(outcome.scored_rows[0].cells, vec!["good-1"]);
        assert_eq!(outcome.scored_rows[1].cells, vec!["good-3"]);
        assert!((outcome.summary.average_probability() - 0.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_missing_input_is_fatal() {
        let storage = MockStorage::with_file("other.csv", "a\n1\n");
        let pipeline =
            BatchScoringPipeline::new(storage, config("http://127.0.0.1:1/predict".to_string()))
                .unwrap();
        assert!(pipeline.extract().await.is_err());
    }
}
