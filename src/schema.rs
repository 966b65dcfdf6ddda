//! Training-time column schema.
//!
//! A [`FeatureSchema`] is the ordered list of columns a classifier was trained
//! on. Categorical columns carry their vocabulary: the position of a label in
//! it is the id the trees split on.

use std::collections::HashMap;

/// Whether a column holds numbers or category labels.
///
/// Both reach the trees as `f32`; a categorical value is sent as its
/// vocabulary index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FeatureType {
    #[default]
    Numeric,
    Categorical,
}

impl FeatureType {
    #[inline]
    pub fn is_categorical(&self) -> bool {
        matches!(self, FeatureType::Categorical)
    }
}

/// One training column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureMeta {
    /// Name exactly as spelled in the training data.
    pub name: String,
    pub feature_type: FeatureType,
    /// Vocabulary, indexed by category id. Empty for numeric columns.
    pub categories: Vec<String>,
}

impl FeatureMeta {
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn categorical<I, S>(name: impl Into<String>, vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            feature_type: FeatureType::Categorical,
            categories: vocabulary.into_iter().map(Into::into).collect(),
        }
    }

    /// Id of `label` in the vocabulary. Labels match case-sensitively.
    pub fn category_id(&self, label: &str) -> Option<u32> {
        self.categories
            .iter()
            .position(|c| c == label)
            .map(|id| id as u32)
    }
}

/// Columns a model expects, in order.
#[derive(Clone, Debug, Default)]
pub struct FeatureSchema {
    features: Vec<FeatureMeta>,
    by_name: HashMap<String, usize>,
}

impl FeatureSchema {
    pub fn from_features(features: Vec<FeatureMeta>) -> Self {
        let by_name = features
            .iter()
            .enumerate()
            .map(|(i, meta)| (meta.name.clone(), i))
            .collect();
        Self { features, by_name }
    }

    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    pub fn get(&self, index: usize) -> Option<&FeatureMeta> {
        self.features.get(index)
    }

    /// Type of column `index`; out-of-range columns read as numeric.
    pub fn feature_type(&self, index: usize) -> FeatureType {
        self.get(index).map_or(FeatureType::Numeric, |m| m.feature_type)
    }

    /// Position of the column called `name`.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|m| m.name.as_str())
    }

    /// Positions of the categorical columns, ascending.
    pub fn categorical_positions(&self) -> Vec<usize> {
        self.features
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.feature_type.is_categorical().then_some(i))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureMeta> {
        self.features.iter()
    }
}
