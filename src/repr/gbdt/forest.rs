//! A single-output forest of additive trees.

use ndarray::ArrayView1;

use super::Tree;

/// Trees whose leaf values add up, on top of a base score, to the raw margin.
#[derive(Debug, Clone)]
pub struct Forest {
    trees: Vec<Tree>,
    base_score: f32,
}

impl Forest {
    pub fn new(base_score: f32) -> Self {
        Self {
            trees: Vec::new(),
            base_score,
        }
    }

    pub fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Raw margin of one encoded row.
    pub fn margin(&self, row: ArrayView1<'_, f32>) -> f32 {
        self.trees
            .iter()
            .fold(self.base_score, |acc, tree| acc + tree.predict_row(row))
    }
}
