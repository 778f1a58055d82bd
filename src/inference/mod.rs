pub mod artifacts;
pub mod classifier;
pub mod predictor;
pub mod transformer;

pub use artifacts::ModelArtifacts;
pub use classifier::LogisticModel;
pub use predictor::ScoringService;
pub use transformer::{ColumnSpec, FeatureTransformer, UnknownCategory};
