//! Conversion from artifact schema types to runtime types.
//!
//! Every conversion validates the structural invariants the runtime types
//! rely on, so a successfully converted classifier never indexes out of
//! bounds during traversal.

use super::error::ReadError;
use super::schema::{
    ClassifierSchema, FeatureTypeSchema, ForestSchema, LeafValuesSchema, ModelMetaSchema,
    OutputTransformSchema, TaskKindSchema, TreeSchema,
};
use crate::model::{ChurnClassifier, OutputTransform};
use crate::repr::gbdt::{CategorySets, Forest, SplitType, Tree, TreeArrays};
use crate::schema::{FeatureMeta, FeatureSchema};

// =============================================================================
// Metadata
// =============================================================================

impl TryFrom<ModelMetaSchema> for FeatureSchema {
    type Error = ReadError;

    fn try_from(meta: ModelMetaSchema) -> Result<Self, Self::Error> {
        let n = meta.num_features;
        for (what, len) in [
            ("feature_names", meta.feature_names.len()),
            ("feature_types", meta.feature_types.len()),
            ("categories", meta.categories.len()),
        ] {
            if len != n {
                return Err(ReadError::Validation(format!(
                    "{what} has {len} entries, expected num_features = {n}"
                )));
            }
        }

        let features = meta
            .feature_names
            .into_iter()
            .zip(meta.feature_types)
            .zip(meta.categories)
            .map(|((name, ft), vocab)| match (ft, vocab) {
                (FeatureTypeSchema::Numeric, None) => Ok(FeatureMeta::numeric(name)),
                (FeatureTypeSchema::Categorical, Some(vocab)) if !vocab.is_empty() => {
                    Ok(FeatureMeta::categorical(name, vocab))
                }
                (FeatureTypeSchema::Categorical, _) => Err(ReadError::Validation(format!(
                    "categorical feature `{name}` has no category vocabulary"
                ))),
                (FeatureTypeSchema::Numeric, Some(_)) => Err(ReadError::Validation(format!(
                    "numeric feature `{name}` has a category vocabulary"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureSchema::from_features(features))
    }
}

// =============================================================================
// Tree conversions
// =============================================================================

impl TryFrom<TreeSchema> for Tree {
    type Error = ReadError;

    fn try_from(schema: TreeSchema) -> Result<Self, Self::Error> {
        let n_nodes = schema.num_nodes as usize;

        let leaf_values: Vec<f32> = match schema.leaf_values {
            LeafValuesSchema::Scalar { values } => values.into_iter().map(|v| v as f32).collect(),
            LeafValuesSchema::Vector { .. } => {
                return Err(ReadError::Validation(
                    "vector leaves are not supported for binary classification".into(),
                ));
            }
        };

        for (what, len) in [
            ("split_indices", schema.split_indices.len()),
            ("thresholds", schema.thresholds.len()),
            ("children_left", schema.children_left.len()),
            ("children_right", schema.children_right.len()),
            ("default_left", schema.default_left.len()),
            ("leaf_values", leaf_values.len()),
        ] {
            if len != n_nodes {
                return Err(ReadError::Validation(format!(
                    "{what} has {len} entries, expected num_nodes = {n_nodes}"
                )));
            }
        }

        let cats = schema.categories;
        if cats.node_indices.len() != cats.category_sets.len() {
            return Err(ReadError::Validation(format!(
                "{} categorical nodes but {} category sets",
                cats.node_indices.len(),
                cats.category_sets.len()
            )));
        }

        let mut split_types = vec![SplitType::Numeric; n_nodes];
        let mut node_sets = Vec::with_capacity(cats.node_indices.len());
        for (node, set) in cats.node_indices.into_iter().zip(cats.category_sets) {
            match schema.children_left.get(node as usize) {
                Some(0) => {
                    return Err(ReadError::Validation(format!(
                        "category set attached to leaf node {node}"
                    )));
                }
                Some(_) => split_types[node as usize] = SplitType::Categorical,
                None => {
                    return Err(ReadError::Validation(format!(
                        "category set attached to missing node {node}"
                    )));
                }
            }
            node_sets.push((node, set));
        }

        let categories = if node_sets.is_empty() {
            CategorySets::none()
        } else {
            CategorySets::from_nodes(n_nodes, &node_sets)
        };

        let arrays = TreeArrays {
            split_features: schema.split_indices,
            thresholds: schema.thresholds.into_iter().map(|t| t as f32).collect(),
            left: schema.children_left,
            right: schema.children_right,
            default_left: schema.default_left,
            leaf_values,
            split_types,
        };
        Ok(Tree::new(arrays, categories))
    }
}

// =============================================================================
// Forest conversions
// =============================================================================

impl TryFrom<ForestSchema> for Forest {
    type Error = ReadError;

    fn try_from(schema: ForestSchema) -> Result<Self, Self::Error> {
        if schema.n_groups != 1 {
            return Err(ReadError::Validation(format!(
                "binary classifier needs exactly one output group, got {}",
                schema.n_groups
            )));
        }
        let [base_score] = schema.base_score[..] else {
            return Err(ReadError::Validation(format!(
                "base_score has {} entries, expected n_groups = 1",
                schema.base_score.len()
            )));
        };

        let mut forest = Forest::new(base_score as f32);
        for (index, tree_schema) in schema.trees.into_iter().enumerate() {
            let tree = Tree::try_from(tree_schema)?;
            tree.validate()
                .map_err(|source| ReadError::Tree { index, source })?;
            forest.push_tree(tree);
        }

        Ok(forest)
    }
}

// =============================================================================
// Classifier
// =============================================================================

impl TryFrom<ClassifierSchema> for ChurnClassifier {
    type Error = ReadError;

    fn try_from(schema: ClassifierSchema) -> Result<Self, Self::Error> {
        if schema.meta.task != TaskKindSchema::BinaryClassification {
            return Err(ReadError::Validation(format!(
                "expected a binary_classification model, got {:?}",
                schema.meta.task
            )));
        }

        let transform = match schema.output_transform {
            OutputTransformSchema::Sigmoid => OutputTransform::Sigmoid,
            OutputTransformSchema::Identity => OutputTransform::Identity,
            OutputTransformSchema::Softmax => {
                return Err(ReadError::Validation(
                    "softmax output is not valid for a binary classifier".into(),
                ));
            }
        };

        let threshold = schema.decision_threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(ReadError::Validation(format!(
                "decision_threshold must lie in (0, 1), got {threshold}"
            )));
        }

        let features = FeatureSchema::try_from(schema.meta)?;
        for (index, tree) in schema.forest.trees.iter().enumerate() {
            check_categorical_splits(index, tree, &features)?;
        }
        let forest = Forest::try_from(schema.forest)?;

        for (index, tree) in forest.trees().enumerate() {
            if let Some(max) = tree.max_split_feature()
                && max as usize >= features.n_features()
            {
                return Err(ReadError::Validation(format!(
                    "tree {index} splits on feature {max}, model has {} features",
                    features.n_features()
                )));
            }
        }

        Ok(ChurnClassifier::new(features, forest, transform, threshold))
    }
}

/// Categorical splits must read a categorical column and name only ids from
/// its vocabulary. Runs on the raw schema, before any bitset is packed.
fn check_categorical_splits(
    index: usize,
    tree: &TreeSchema,
    features: &FeatureSchema,
) -> Result<(), ReadError> {
    let cats = &tree.categories;
    for (node, set) in cats.node_indices.iter().zip(&cats.category_sets) {
        let Some(&feature) = tree.split_indices.get(*node as usize) else {
            // Missing nodes are reported by the tree conversion.
            continue;
        };
        let Some(meta) = features.get(feature as usize) else {
            return Err(ReadError::Validation(format!(
                "tree {index} node {node} splits on feature {feature}, model has {} features",
                features.n_features()
            )));
        };
        if !meta.feature_type.is_categorical() {
            return Err(ReadError::Validation(format!(
                "tree {index} node {node} has a categorical split on numeric feature `{}`",
                meta.name
            )));
        }
        if let Some(&id) = set.iter().find(|&&id| id as usize >= meta.categories.len()) {
            return Err(ReadError::Validation(format!(
                "tree {index} node {node} sends category {id} right, `{}` has {} categories",
                meta.name,
                meta.categories.len()
            )));
        }
    }
    Ok(())
}
