pub mod batch_pipeline;
pub mod etl;
pub mod scoring_client;
pub mod table;

pub use crate::domain::model::{InputTable, ScoringOutcome};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
