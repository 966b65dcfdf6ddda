//! Prediction entry points.

use log::debug;

use super::error::InferenceError;
use crate::cache::ModelCache;
use crate::model::{BinaryClassifier, ChurnLabel};
use crate::record::{EmployeeFeatures, FeatureRecord, assemble};

/// Result of one prediction: the classifier's label and its positive-class
/// probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Discrete prediction, as emitted by the classifier.
    pub label: ChurnLabel,
    /// Probability of [`ChurnLabel::Leave`], in `[0, 1]`.
    pub probability: f64,
}

impl Prediction {
    /// Probability of the predicted class.
    ///
    /// `probability` for a leave prediction, its complement for stay.
    pub fn confidence(&self) -> f64 {
        match self.label {
            ChurnLabel::Leave => self.probability,
            ChurnLabel::Stay => 1.0 - self.probability,
        }
    }
}

/// Run `classifier` on a single record.
///
/// The label is taken from the classifier's own discrete prediction and the
/// probability from its class probabilities; neither is derived from the
/// other here.
pub fn infer<C>(classifier: &C, record: &FeatureRecord) -> Result<Prediction, InferenceError>
where
    C: BinaryClassifier + ?Sized,
{
    let label = classifier.predict(record)?;
    let [_, probability] = classifier.predict_proba(record)?;
    debug!("predicted {label} with p(leave) = {probability:.4}");
    Ok(Prediction { label, probability })
}

/// Run the classifier held by `cache` on a record.
///
/// Fails with [`InferenceError::ModelNotLoaded`] if nothing has been loaded.
pub fn infer_cached<C>(
    cache: &ModelCache<C>,
    record: &FeatureRecord,
) -> Result<Prediction, InferenceError>
where
    C: BinaryClassifier,
{
    let classifier = cache.get().ok_or(InferenceError::ModelNotLoaded)?;
    infer(classifier.as_ref(), record)
}

/// Assemble the form inputs and run `classifier` on them.
pub fn predict_employee<C>(
    classifier: &C,
    input: &EmployeeFeatures,
) -> Result<Prediction, InferenceError>
where
    C: BinaryClassifier + ?Sized,
{
    infer(classifier, &assemble(input))
}
