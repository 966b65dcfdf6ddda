//! Gradient boosted decision trees.

/// Index of a node within its tree's arrays.
pub type NodeId = u32;

pub mod categories;
pub mod forest;
pub mod tree;

pub use categories::{CategorySets, category_id, pack_categories};
pub use forest::Forest;
pub use tree::{SplitType, Tree, TreeArrays, TreeShapeError};
