//! Category sets for categorical splits.
//!
//! Each categorical node owns a packed bitset of the category ids sent to its
//! RIGHT child; every other category goes left. Bit `c % 32` of word `c / 32`
//! stands for category `c`.

/// Per-tree storage of categorical split sets.
///
/// Words of all nodes live in one flat buffer. `spans[node]` is the
/// `(offset, len)` of that node's words; non-categorical nodes have an empty
/// span.
#[derive(Debug, Clone, Default)]
pub struct CategorySets {
    words: Box<[u32]>,
    spans: Box<[(u32, u32)]>,
}

impl CategorySets {
    /// No categorical nodes.
    pub fn none() -> Self {
        Self::default()
    }

    /// Pack the right-going category ids of each listed node.
    ///
    /// Node ids must be below `n_nodes`.
    pub fn from_nodes(n_nodes: usize, sets: &[(u32, Vec<u32>)]) -> Self {
        let mut words = Vec::new();
        let mut spans = vec![(0u32, 0u32); n_nodes];

        for (node, ids) in sets {
            let packed = pack_categories(ids);
            spans[*node as usize] = (words.len() as u32, packed.len() as u32);
            words.extend(packed);
        }

        Self {
            words: words.into_boxed_slice(),
            spans: spans.into_boxed_slice(),
        }
    }

    /// Whether `category` is in the right-going set of `node`.
    ///
    /// Unknown nodes and ids beyond the stored words are not in any set.
    #[inline]
    pub fn goes_right(&self, node: u32, category: u32) -> bool {
        self.words_for(node)
            .get((category / 32) as usize)
            .is_some_and(|word| word & (1 << (category % 32)) != 0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of node spans (one per tree node once any set is stored).
    #[inline]
    pub fn n_spans(&self) -> usize {
        self.spans.len()
    }

    /// Packed words of `node`, empty for non-categorical nodes.
    pub fn words_for(&self, node: u32) -> &[u32] {
        match self.spans.get(node as usize) {
            Some(&(offset, len)) => &self.words[offset as usize..(offset + len) as usize],
            None => &[],
        }
    }
}

/// Category id of an encoded categorical value.
///
/// The encoder writes vocabulary indices, so the value is a small
/// non-negative integer.
#[inline]
pub fn category_id(value: f32) -> u32 {
    debug_assert!(
        value >= 0.0 && value.fract() == 0.0,
        "encoded category must be a non-negative integer, got {value}"
    );
    value as u32
}

/// Pack category ids into 32-bit words, lowest id in the lowest bit.
pub fn pack_categories(ids: &[u32]) -> Vec<u32> {
    let n_words = ids.iter().max().map_or(0, |&max| (max / 32 + 1) as usize);
    let mut words = vec![0u32; n_words];
    for &id in ids {
        words[(id / 32) as usize] |= 1 << (id % 32);
    }
    words
}
