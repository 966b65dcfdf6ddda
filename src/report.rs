//! Interpretation of a prediction into the operator-facing message.

use std::fmt;

use crate::inference::Prediction;
use crate::model::ChurnLabel;

pub const TITLE: &str = "Employee Churn Prediction";

pub const DESCRIPTION: &str =
    "Predict whether an employee will leave the company based on HR and performance data.";

/// Shown for every failed prediction, whatever the cause.
pub const FAILURE_MESSAGE: &str = "Prediction failed. Please check model and input format.";

/// How a verdict should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The employee is predicted to leave.
    Alert,
    /// The employee is predicted to stay.
    Reassuring,
}

/// A prediction ready for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub label: ChurnLabel,
    /// Probability of the predicted class, in `[0, 1]`.
    pub confidence: f64,
}

impl Verdict {
    pub fn severity(&self) -> Severity {
        match self.label {
            ChurnLabel::Leave => Severity::Alert,
            ChurnLabel::Stay => Severity::Reassuring,
        }
    }
}

impl From<&Prediction> for Verdict {
    fn from(prediction: &Prediction) -> Self {
        Self {
            label: prediction.label,
            confidence: prediction.confidence(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.label {
            ChurnLabel::Leave => "LEAVE the company",
            ChurnLabel::Stay => "STAY with the company",
        };
        write!(
            f,
            "Prediction: Employee will {outcome} (Confidence: {})",
            format_percent(self.confidence)
        )
    }
}

/// Format a fraction as a percentage with two decimals, e.g. `0.6321` → `63.21%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Message for a prediction.
pub fn render(prediction: &Prediction) -> String {
    Verdict::from(prediction).to_string()
}
