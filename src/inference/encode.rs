//! Record/schema matching and encoding into the row the trees consume.
//!
//! The record must match the training schema exactly: same column count,
//! identical names in identical order, and the same categorical positions.
//! Categorical values are encoded as their index in the feature's vocabulary.

use log::debug;
use ndarray::Array1;

use super::error::InferenceError;
use crate::record::{FeatureRecord, FeatureValue};
use crate::schema::{FeatureSchema, FeatureType};

/// Check `record` against `schema` and encode it as an `f32` row.
pub fn encode_record(
    schema: &FeatureSchema,
    record: &FeatureRecord,
) -> Result<Array1<f32>, InferenceError> {
    check_layout(schema, record).inspect_err(|e| debug!("rejected feature record: {e}"))?;

    let mut row = Array1::<f32>::zeros(schema.n_features());
    for ((slot, meta), (column, value)) in row.iter_mut().zip(schema.iter()).zip(record.iter()) {
        *slot = match (meta.feature_type, value) {
            (FeatureType::Numeric, FeatureValue::Float(v)) => *v as f32,
            (FeatureType::Numeric, FeatureValue::Int(v)) => *v as f32,
            (FeatureType::Categorical, FeatureValue::Category(label)) => meta
                .category_id(label)
                .map(|id| id as f32)
                .ok_or_else(|| InferenceError::UnknownCategory {
                    column: column.to_string(),
                    value: label.clone(),
                })?,
            (feature_type, found) => {
                return Err(InferenceError::ValueType {
                    column: column.to_string(),
                    expected: if feature_type.is_categorical() {
                        "categorical"
                    } else {
                        "numeric"
                    },
                    found: found.to_string(),
                });
            }
        };
    }

    Ok(row)
}

fn check_layout(schema: &FeatureSchema, record: &FeatureRecord) -> Result<(), InferenceError> {
    if record.len() != schema.n_features() {
        return Err(InferenceError::ColumnCount {
            expected: schema.n_features(),
            found: record.len(),
        });
    }

    for (position, (expected, found)) in schema.names().zip(record.columns()).enumerate() {
        if expected != found {
            if let Some(trained_at) = schema.position_of(found) {
                debug!("column `{found}` given at {position}, trained at {trained_at}");
            }
            return Err(InferenceError::ColumnName {
                position,
                expected: expected.to_string(),
                found: found.clone(),
            });
        }
    }

    let expected = schema.categorical_positions();
    if expected != record.categorical_positions() {
        return Err(InferenceError::CategoricalPositions {
            expected,
            found: record.categorical_positions().to_vec(),
        });
    }

    Ok(())
}
