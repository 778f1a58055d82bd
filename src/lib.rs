pub mod core;
pub mod domain;
pub mod inference;
pub mod utils;

#[cfg(feature = "cli")]
pub mod config;

#[cfg(feature = "server")]
pub mod api;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, BatchConfig};

#[cfg(feature = "cli")]
pub use config::service_config::{ServiceArgs, ServiceConfig};

pub use crate::core::{batch_pipeline::BatchScoringPipeline, etl::BatchEngine};
pub use domain::model::{BatchReport, ChurnLabel, CustomerRecord, FieldValue, PredictionResult};
pub use inference::{ModelArtifacts, ScoringService};
pub use utils::error::{Result, ScoringError};
