pub mod cli;
pub mod service_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_at_least, validate_endpoint, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/predict";
pub const DEFAULT_OUTPUT_PATH: &str = "scored_customers.csv";
pub const DEFAULT_LOG_FILE: &str = "logs/batch_log.txt";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "churn-batch")]
#[command(about = "Score a CSV of customers against the churn scoring service")]
pub struct BatchConfig {
    #[arg(long, help = "Path to input CSV file")]
    pub input: String,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: String,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: String,

    #[arg(long, default_value = "30", help = "Per-row request timeout in seconds")]
    pub timeout_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl BatchConfig {
    /// 其餘欄位使用預設值
    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output: DEFAULT_OUTPUT_PATH.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            timeout_secs: 30,
            verbose: false,
        }
    }
}

impl ConfigProvider for BatchConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_endpoint("endpoint", &self.endpoint)?;
        validate_path("output", &self.output)?;
        validate_path("log_file", &self.log_file)?;
        validate_at_least("timeout_secs", self.timeout_secs, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_defaults() {
        let config = BatchConfig::parse_from(["churn-batch", "--input", "customers.csv"]);
        assert_eq!(config.input, "customers.csv");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.output, DEFAULT_OUTPUT_PATH);
        assert_eq!(config.log_file, DEFAULT_LOG_FILE);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_input_is_required() {
        assert!(BatchConfig::try_parse_from(["churn-batch"]).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = BatchConfig::with_input("customers.csv");
        config.endpoint = "localhost:8000".to_string();
        assert!(config.validate().is_err());

        let mut config = BatchConfig::with_input("customers.csv");
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
