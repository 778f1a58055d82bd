use crate::utils::error::{Result, ScoringError};
use crate::utils::validation::{
    validate_non_empty, validate_path, validate_at_least, validate_range, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_TRANSFORMER_PATH: &str = "app/transformer.json";
pub const DEFAULT_MODEL_PATH: &str = "app/model.json";

/// 命令列參數；未指定者依序取設定檔、預設值
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "churn-server")]
#[command(about = "Serve churn predictions over HTTP")]
pub struct ServiceArgs {
    #[arg(long, help = "Optional TOML configuration file")]
    pub config: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, help = "Feature transformer artifact (JSON)")]
    pub transformer: Option<String>,

    #[arg(long, help = "Model artifact (JSON)")]
    pub model: Option<String>,

    #[arg(long)]
    pub workers: Option<usize>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// 設定檔格式
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 8000
/// workers = 4
///
/// [artifacts]
/// transformer = "app/transformer.json"
/// model = "app/model.json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceFileConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub artifacts: ArtifactSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactSection {
    pub transformer: Option<String>,
    pub model: Option<String>,
}

impl ServiceFileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// 合併後的服務設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub transformer_path: String,
    pub model_path: String,
    pub workers: Option<usize>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            transformer_path: DEFAULT_TRANSFORMER_PATH.to_string(),
            model_path: DEFAULT_MODEL_PATH.to_string(),
            workers: None,
        }
    }
}

impl ServiceArgs {
    pub fn resolve(&self) -> Result<ServiceConfig> {
        let file = match &self.config {
            Some(path) => ServiceFileConfig::from_file(path).map_err(|e| {
                ScoringError::ConfigError {
                    message: format!("{}: {}", path, e),
                }
            })?,
            None => ServiceFileConfig::default(),
        };
        Ok(self.merge(file))
    }

    fn merge(&self, file: ServiceFileConfig) -> ServiceConfig {
        let defaults = ServiceConfig::default();
        ServiceConfig {
            host: self.host.clone().or(file.server.host).unwrap_or(defaults.host),
            port: self.port.or(file.server.port).unwrap_or(defaults.port),
            transformer_path: self
                .transformer
                .clone()
                .or(file.artifacts.transformer)
                .unwrap_or(defaults.transformer_path),
            model_path: self
                .model
                .clone()
                .or(file.artifacts.model)
                .unwrap_or(defaults.model_path),
            workers: self.workers.or(file.server.workers),
        }
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty("host", &self.host)?;
        validate_range("port", self.port, 1, u16::MAX)?;
        validate_path("transformer", &self.transformer_path)?;
        validate_path("model", &self.model_path)?;
        if let Some(workers) = self.workers {
            validate_at_least("workers", workers as u64, 1)?;
        }
        Ok(())
    }
}
