//! Inference adapter: run a classifier on a single feature record.
//!
//! # Module Structure
//!
//! - [`error`]: [`InferenceError`], the single failure kind of the pipeline
//! - [`encode`]: record/schema matching and categorical encoding
//! - [`adapter`]: [`Prediction`] and the [`infer`] entry points
//!
//! # Quick Start
//!
//! ```ignore
//! use churn_predict::inference::infer;
//! use churn_predict::record::{assemble, EmployeeFeatures};
//!
//! let classifier = churn_predict::cache::shared_model(path)?;
//! let prediction = infer(classifier.as_ref(), &assemble(&EmployeeFeatures::default()))?;
//! println!("{}", prediction.confidence());
//! ```

pub mod adapter;
pub mod encode;
pub mod error;

pub use adapter::{Prediction, infer, infer_cached, predict_employee};
pub use encode::encode_record;
pub use error::InferenceError;
