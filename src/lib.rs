//! churn-predict: employee churn prediction from a pre-trained classifier.
//!
//! Nine form inputs are assembled into a feature record laid out exactly as
//! the model was trained on, run through a gradient boosted tree classifier,
//! and turned into a LEAVE / STAY verdict with a confidence.
//!
//! # Key Types
//!
//! - [`EmployeeFeatures`] / [`FeatureRecord`] - Form inputs and the assembled record
//! - [`ChurnClassifier`] / [`BinaryClassifier`] - The loaded model and its seam
//! - [`Prediction`] / [`InferenceError`] - Adapter output and its only failure kind
//! - [`ModelCache`] - Load-once model holder
//!
//! # Pipeline
//!
//! ```ignore
//! use churn_predict::{assemble, infer, shared_model, EmployeeFeatures, DEFAULT_MODEL_PATH};
//!
//! let classifier = shared_model(DEFAULT_MODEL_PATH)?;
//! let record = assemble(&EmployeeFeatures::default());
//! let prediction = infer(classifier.as_ref(), &record)?;
//! println!("{}", churn_predict::report::render(&prediction));
//! ```

pub mod cache;
pub mod inference;
pub mod model;
pub mod persist;
pub mod record;
pub mod report;
pub mod repr;
pub mod schema;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use cache::{DEFAULT_MODEL_PATH, ModelCache, shared_model};
pub use inference::{InferenceError, Prediction, infer, predict_employee};
pub use model::{BinaryClassifier, ChurnClassifier, ChurnLabel};
pub use persist::ReadError;
pub use record::{
    CATEGORICAL_POSITIONS, Department, EmployeeFeatures, FEATURE_COLUMNS, FeatureRecord,
    FeatureValue, SalaryLevel, assemble,
};
pub use schema::{FeatureMeta, FeatureSchema, FeatureType};
