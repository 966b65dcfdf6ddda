//! Serde mirror of the artifact JSON.
//!
//! Nothing here is validated; [`super::convert`] turns these into runtime
//! types and refuses anything inconsistent.

use serde::{Deserialize, Serialize};

/// What the model was trained to do. Only binary classification loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKindSchema {
    Regression,
    BinaryClassification,
    MulticlassClassification,
    Ranking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureTypeSchema {
    Numeric,
    Categorical,
}

/// `meta`: the training columns. The three lists run in column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetaSchema {
    pub task: TaskKindSchema,
    pub num_features: usize,
    pub feature_names: Vec<String>,
    pub feature_types: Vec<FeatureTypeSchema>,
    /// Vocabulary of each categorical column, `null` for numeric ones.
    pub categories: Vec<Option<Vec<String>>>,
}

/// Leaf payload, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LeafValuesSchema {
    Scalar { values: Vec<f64> },
    /// Multi-output leaves; parsed so they can be refused with a clear message.
    Vector { values: Vec<Vec<f64>> },
}

/// Right-going category ids of each categorical node.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CategoriesSchema {
    pub node_indices: Vec<u32>,
    /// Parallel to `node_indices`.
    pub category_sets: Vec<Vec<u32>>,
}

/// One tree, one array entry per node. A `children_left` of 0 marks a leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSchema {
    pub num_nodes: u32,
    pub split_indices: Vec<u32>,
    pub thresholds: Vec<f64>,
    pub children_left: Vec<u32>,
    pub children_right: Vec<u32>,
    /// Direction of a missing value, `true` for left.
    pub default_left: Vec<bool>,
    pub leaf_values: LeafValuesSchema,
    #[serde(default, skip_serializing_if = "has_no_categories")]
    pub categories: CategoriesSchema,
}

fn has_no_categories(c: &CategoriesSchema) -> bool {
    c.node_indices.is_empty()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestSchema {
    pub trees: Vec<TreeSchema>,
    pub n_groups: usize,
    /// One entry per output group.
    pub base_score: Vec<f64>,
}

/// Mapping from raw margin to the positive-class probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTransformSchema {
    Identity,
    Sigmoid,
    Softmax,
}

/// The whole artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSchema {
    pub meta: ModelMetaSchema,
    pub forest: ForestSchema,
    pub output_transform: OutputTransformSchema,
    /// A positive-class probability strictly above this yields label 1.
    #[serde(default = "default_decision_threshold")]
    pub decision_threshold: f64,
}

fn default_decision_threshold() -> f64 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_snake_case_names() {
        let task: TaskKindSchema = serde_json::from_str(r#""binary_classification""#).unwrap();
        assert_eq!(task, TaskKindSchema::BinaryClassification);
        let ft: FeatureTypeSchema = serde_json::from_str(r#""categorical""#).unwrap();
        assert_eq!(ft, FeatureTypeSchema::Categorical);
        assert!(serde_json::from_str::<TaskKindSchema>(r#""BinaryClassification""#).is_err());
    }

    #[test]
    fn leaves_are_tagged_by_type() {
        let leaves: LeafValuesSchema =
            serde_json::from_str(r#"{"type": "scalar", "values": [0.5, -0.5]}"#).unwrap();
        assert!(matches!(leaves, LeafValuesSchema::Scalar { ref values } if values.len() == 2));
    }

    #[test]
    fn categories_skip_when_empty() {
        let tree = TreeSchema {
            num_nodes: 1,
            split_indices: vec![0],
            thresholds: vec![0.0],
            children_left: vec![0],
            children_right: vec![0],
            default_left: vec![true],
            leaf_values: LeafValuesSchema::Scalar { values: vec![1.0] },
            categories: CategoriesSchema::default(),
        };

        let json = serde_json::to_string(&tree).unwrap();
        assert!(!json.contains("categories"));

        let parsed: TreeSchema = serde_json::from_str(&json).unwrap();
        assert!(parsed.categories.node_indices.is_empty());
    }

    #[test]
    fn decision_threshold_defaults() {
        let json = r#"{
            "meta": {
                "task": "binary_classification",
                "num_features": 0,
                "feature_names": [],
                "feature_types": [],
                "categories": []
            },
            "forest": { "trees": [], "n_groups": 1, "base_score": [0.0] },
            "output_transform": "sigmoid"
        }"#;

        let schema: ClassifierSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.decision_threshold, 0.5);
        assert_eq!(schema.output_transform, OutputTransformSchema::Sigmoid);
    }
}
