//! Immutable structure-of-arrays decision tree.
//!
//! Node 0 is the root. A node whose left child is 0 is a leaf, since the root
//! can never be anyone's child.

use ndarray::ArrayView1;

use super::NodeId;
use super::categories::{CategorySets, category_id};

/// How a node routes a present value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitType {
    /// Left if `value < threshold`.
    #[default]
    Numeric,
    /// Right if the category is in the node's set.
    Categorical,
}

/// Broken tree shapes found by [`Tree::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeShapeError {
    #[error("tree has no nodes")]
    Empty,
    #[error("node {node} {side} child {child} out of bounds ({n_nodes} nodes)")]
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },
    #[error("node {node} is its own child")]
    SelfLoop { node: NodeId },
    #[error("node {node} has more than one parent")]
    SharedChild { node: NodeId },
    #[error("cycle through node {node}")]
    Cycle { node: NodeId },
    #[error("node {node} is unreachable from the root")]
    Unreachable { node: NodeId },
    #[error("{n_spans} category spans for {n_nodes} nodes")]
    CategorySpans { n_spans: usize, n_nodes: usize },
}

/// Parallel per-node arrays a [`Tree`] is built from.
#[derive(Debug, Clone, Default)]
pub struct TreeArrays {
    pub split_features: Vec<u32>,
    pub thresholds: Vec<f32>,
    pub left: Vec<NodeId>,
    pub right: Vec<NodeId>,
    pub default_left: Vec<bool>,
    pub leaf_values: Vec<f32>,
    pub split_types: Vec<SplitType>,
}

#[derive(Debug, Clone)]
pub struct Tree {
    split_features: Box<[u32]>,
    thresholds: Box<[f32]>,
    left: Box<[NodeId]>,
    right: Box<[NodeId]>,
    default_left: Box<[bool]>,
    leaf_values: Box<[f32]>,
    split_types: Box<[SplitType]>,
    categories: CategorySets,
}

impl Tree {
    /// Build a tree. All arrays must have one entry per node.
    pub fn new(arrays: TreeArrays, categories: CategorySets) -> Self {
        let n = arrays.left.len();
        debug_assert!(
            [
                arrays.split_features.len(),
                arrays.thresholds.len(),
                arrays.right.len(),
                arrays.default_left.len(),
                arrays.leaf_values.len(),
                arrays.split_types.len(),
            ]
            .iter()
            .all(|&len| len == n),
            "tree arrays differ in length"
        );

        Self {
            split_features: arrays.split_features.into(),
            thresholds: arrays.thresholds.into(),
            left: arrays.left.into(),
            right: arrays.right.into(),
            default_left: arrays.default_left.into(),
            leaf_values: arrays.leaf_values.into(),
            split_types: arrays.split_types.into(),
            categories,
        }
    }

    /// A single leaf.
    pub fn constant(value: f32) -> Self {
        Self::new(
            TreeArrays {
                split_features: vec![0],
                thresholds: vec![0.0],
                left: vec![0],
                right: vec![0],
                default_left: vec![true],
                leaf_values: vec![value],
                split_types: vec![SplitType::Numeric],
            },
            CategorySets::none(),
        )
    }

    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.left.len()
    }

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.left[node as usize] == 0
    }

    #[inline]
    pub fn split_feature(&self, node: NodeId) -> u32 {
        self.split_features[node as usize]
    }

    #[inline]
    pub fn split_type(&self, node: NodeId) -> SplitType {
        self.split_types[node as usize]
    }

    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f32 {
        self.leaf_values[node as usize]
    }

    /// Largest feature index any split reads, `None` for a lone leaf.
    pub fn max_split_feature(&self) -> Option<u32> {
        (0..self.n_nodes() as NodeId)
            .filter(|&node| !self.is_leaf(node))
            .map(|node| self.split_feature(node))
            .max()
    }

    /// Child of `node` that `value` is routed to. NaN is missing.
    #[inline]
    fn route(&self, node: NodeId, value: f32) -> NodeId {
        let i = node as usize;
        let go_left = if value.is_nan() {
            self.default_left[i]
        } else {
            match self.split_types[i] {
                SplitType::Numeric => value < self.thresholds[i],
                SplitType::Categorical => !self.categories.goes_right(node, category_id(value)),
            }
        };
        if go_left { self.left[i] } else { self.right[i] }
    }

    /// Leaf reached by `row`. Features past the end of `row` read as missing.
    pub fn leaf_for(&self, row: ArrayView1<'_, f32>) -> NodeId {
        let mut node = 0;
        while !self.is_leaf(node) {
            let value = row
                .get(self.split_feature(node) as usize)
                .copied()
                .unwrap_or(f32::NAN);
            node = self.route(node, value);
        }
        node
    }

    /// Leaf value for `row`.
    #[inline]
    pub fn predict_row(&self, row: ArrayView1<'_, f32>) -> f32 {
        self.leaf_value(self.leaf_for(row))
    }

    /// Check that every node hangs off the root exactly once.
    ///
    /// Traversal of a validated tree always terminates at a leaf.
    pub fn validate(&self) -> Result<(), TreeShapeError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unseen,
            Open,
            Closed,
        }

        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeShapeError::Empty);
        }
        if self.split_types.contains(&SplitType::Categorical)
            && self.categories.n_spans() != n_nodes
        {
            return Err(TreeShapeError::CategorySpans {
                n_spans: self.categories.n_spans(),
                n_nodes,
            });
        }

        let mut marks = vec![Mark::Unseen; n_nodes];
        // (node, children already pushed)
        let mut stack = vec![(0 as NodeId, false)];

        while let Some((node, expanded)) = stack.pop() {
            let i = node as usize;
            if expanded {
                marks[i] = Mark::Closed;
                continue;
            }
            match marks[i] {
                Mark::Unseen => {}
                Mark::Open => return Err(TreeShapeError::Cycle { node }),
                Mark::Closed => return Err(TreeShapeError::SharedChild { node }),
            }
            marks[i] = Mark::Open;
            stack.push((node, true));

            if self.is_leaf(node) {
                continue;
            }
            for (side, child) in [("right", self.right[i]), ("left", self.left[i])] {
                if child == node {
                    return Err(TreeShapeError::SelfLoop { node });
                }
                if child as usize >= n_nodes {
                    return Err(TreeShapeError::ChildOutOfBounds {
                        node,
                        side,
                        child,
                        n_nodes,
                    });
                }
                stack.push((child, false));
            }
        }

        match marks.iter().position(|&m| m == Mark::Unseen) {
            Some(node) => Err(TreeShapeError::Unreachable {
                node: node as NodeId,
            }),
            None => Ok(()),
        }
    }
}
