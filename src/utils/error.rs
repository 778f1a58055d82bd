use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed input table at line {line}: {message}")]
    TableError { line: u64, message: String },

    #[error("Failed to load artifact '{path}': {message}")]
    ArtifactError { path: String, message: String },

    #[error("Invalid request: {message}")]
    RequestError { message: String },

    #[error("Feature transform failed: {message}")]
    TransformError { message: String },

    #[error("Inference failed: {message}")]
    InferenceError { message: String },
}

impl ScoringError {
    pub fn transform(message: impl Into<String>) -> Self {
        Self::TransformError {
            message: message.into(),
        }
    }

    pub fn inference(message: impl Into<String>) -> Self {
        Self::InferenceError {
            message: message.into(),
        }
    }

    pub fn artifact(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ArtifactError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) => "Could not reach the scoring service".to_string(),
            Self::CsvError(e) => format!("The input table could not be read: {}", e),
            Self::IoError(e) => format!("File operation failed: {}", e),
            Self::ArtifactError { path, .. } => {
                format!("Model artifact '{}' could not be loaded", path)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            Self::TableError { line, .. } => {
                format!("The input table has a malformed row at line {}", line)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check that the scoring service is running and the endpoint is correct",
            Self::CsvError(_) | Self::TableError { .. } => "Make sure the input file is a CSV with a header row",
            Self::IoError(_) => "Check that the path exists and is writable",
            Self::RequestError { .. } => {
                "Send a JSON body of the form {\"customer\": {...}}"
            }
            Self::TomlError(_) | Self::ConfigError { .. } => "Fix the configuration file syntax",
            Self::InvalidConfigValueError { .. } => "Run with --help to see the accepted options",
            Self::ArtifactError { .. } => {
                "Verify the transformer and model artifact paths and that they were exported together"
            }
            Self::TransformError { .. } => "Check the customer fields against /model/info",
            Self::InferenceError { .. } => "Re-export the model artifact",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_include_context() {
        let err = ScoringError::artifact("app/model.json", "No such file");
        assert_eq!(
            err.to_string(),
            "Failed to load artifact 'app/model.json': No such file"
        );
        assert!(err.user_friendly_message().contains("app/model.json"));
    }
}
