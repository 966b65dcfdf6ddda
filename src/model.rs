//! The churn classifier and the classifier seam used by the adapter.
//!
//! [`ChurnClassifier`] is the in-memory form of the trained artifact: the
//! feature schema it was trained on, a tree forest producing a raw margin,
//! the output transform turning that margin into a probability, and the
//! decision threshold. The threshold belongs to the artifact; nothing in this
//! crate chooses or tunes it.

use std::fmt;

use ndarray::ArrayView1;

use crate::inference::{InferenceError, encode_record};
use crate::record::FeatureRecord;
use crate::repr::gbdt::Forest;
use crate::schema::FeatureSchema;

// =============================================================================
// Labels
// =============================================================================

/// Discrete class predicted by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChurnLabel {
    /// Class 0: the employee stays.
    Stay = 0,
    /// Class 1 (positive class): the employee leaves.
    Leave = 1,
}

impl ChurnLabel {
    /// Numeric class index.
    #[inline]
    pub fn class_index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChurnLabel::Stay => f.write_str("STAY"),
            ChurnLabel::Leave => f.write_str("LEAVE"),
        }
    }
}

// =============================================================================
// Output transform
// =============================================================================

/// Transformation from raw margin to positive-class probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputTransform {
    /// Margin already is a probability; clamped into `[0, 1]`.
    Identity,
    /// Logistic sigmoid of the margin.
    #[default]
    Sigmoid,
}

impl OutputTransform {
    /// Apply the transform to a raw margin.
    pub fn apply(self, margin: f64) -> f64 {
        match self {
            OutputTransform::Identity => margin.clamp(0.0, 1.0),
            OutputTransform::Sigmoid => sigmoid(margin),
        }
    }
}

/// Sigmoid function: 1 / (1 + exp(-x))
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

// =============================================================================
// Classifier seam
// =============================================================================

/// A pre-trained binary classifier queried one record at a time.
///
/// Both methods reject records that do not match the classifier's training
/// schema with an [`InferenceError`].
pub trait BinaryClassifier {
    /// Feature schema the classifier was trained on.
    fn schema(&self) -> &FeatureSchema;

    /// Discrete class prediction.
    fn predict(&self, record: &FeatureRecord) -> Result<ChurnLabel, InferenceError>;

    /// Class probabilities `[p(stay), p(leave)]`.
    fn predict_proba(&self, record: &FeatureRecord) -> Result<[f64; 2], InferenceError>;
}

// =============================================================================
// ChurnClassifier
// =============================================================================

/// Gradient boosted tree classifier loaded from the model artifact.
///
/// Immutable once constructed; shared read-only between callers.
#[derive(Debug, Clone)]
pub struct ChurnClassifier {
    schema: FeatureSchema,
    forest: Forest,
    transform: OutputTransform,
    decision_threshold: f64,
}

impl ChurnClassifier {
    /// Assemble a classifier from already validated parts.
    pub fn new(
        schema: FeatureSchema,
        forest: Forest,
        transform: OutputTransform,
        decision_threshold: f64,
    ) -> Self {
        Self {
            schema,
            forest,
            transform,
            decision_threshold,
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn transform(&self) -> OutputTransform {
        self.transform
    }

    /// Positive-class probability above which [`ChurnLabel::Leave`] is predicted.
    pub fn decision_threshold(&self) -> f64 {
        self.decision_threshold
    }

    /// Raw margin for an encoded row.
    pub fn margin(&self, row: ArrayView1<'_, f32>) -> f64 {
        f64::from(self.forest.margin(row))
    }

    /// Positive-class probability for an encoded row.
    pub fn positive_probability(&self, row: ArrayView1<'_, f32>) -> f64 {
        self.transform.apply(self.margin(row))
    }

    /// Label for a positive-class probability.
    pub fn label_for(&self, probability: f64) -> ChurnLabel {
        if probability > self.decision_threshold {
            ChurnLabel::Leave
        } else {
            ChurnLabel::Stay
        }
    }
}

impl BinaryClassifier for ChurnClassifier {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, record: &FeatureRecord) -> Result<ChurnLabel, InferenceError> {
        let row = encode_record(&self.schema, record)?;
        Ok(self.label_for(self.positive_probability(row.view())))
    }

    fn predict_proba(&self, record: &FeatureRecord) -> Result<[f64; 2], InferenceError> {
        let row = encode_record(&self.schema, record)?;
        let p = self.positive_probability(row.view());
        Ok([1.0 - p, p])
    }
}
