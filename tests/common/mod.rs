//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use churn_predict::ChurnClassifier;
use serde_json::Value;

/// The classifier artifact shipped with the crate.
pub fn model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/churn_model.json")
}

pub fn load_model() -> ChurnClassifier {
    ChurnClassifier::load_json(model_path()).expect("load shipped artifact")
}

/// The shipped artifact as a mutable JSON value.
pub fn model_value() -> Value {
    let bytes = std::fs::read(model_path()).expect("read artifact");
    serde_json::from_slice(&bytes).expect("parse artifact json")
}
