//! Huffman tree construction.
//!
//! Leaves are pushed into the [`MinHeap`] in ascending symbol order, then the
//! two lightest nodes are merged repeatedly (first extracted on the left)
//! until one root remains. Each internal node owns its two children through a
//! `Box`; the whole tree is dropped with the [`HuffmanTree`] that holds it.

use crate::frequency::FrequencyTable;
use crate::heap::{MinHeap, Weighted};

/// A node of the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    /// Join two subtrees; `left` is the one extracted first.
    pub fn merge(left: HuffNode, right: HuffNode) -> Self {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } | HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// Child reached by following `bit` (false = left, true = right).
    ///
    /// Leaves have no children and return `None`.
    pub fn child(&self, bit: bool) -> Option<&HuffNode> {
        match self {
            HuffNode::Leaf { .. } => None,
            HuffNode::Internal { left, right, .. } => Some(if bit { &**right } else { &**left }),
        }
    }
}

impl Weighted for HuffNode {
    fn weight(&self) -> u64 {
        HuffNode::weight(self)
    }
}

/// A complete tree with at least one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Build the tree for every symbol with a non-zero count.
    ///
    /// Returns `None` for an all-zero table. With one distinct symbol the
    /// root is that symbol's leaf.
    pub fn build(table: &FrequencyTable) -> Option<Self> {
        let mut heap = MinHeap::with_capacity(table.distinct_symbols());
        for (symbol, count) in table.symbols() {
            heap.insert(HuffNode::leaf(symbol, count));
        }

        while heap.len() > 1 {
            let a = heap.extract_min()?;
            let b = heap.extract_min()?;
            heap.insert(HuffNode::merge(a, b));
        }

        let root = heap.extract_min()?;
        log::debug!(
            "built huffman tree: {} leaves, root weight {}",
            table.distinct_symbols(),
            root.weight()
        );
        Some(Self { root })
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Root weight, equal to the total number of encoded symbols.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// True when only one distinct symbol was present.
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes().filter(|(n, _)| n.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.nodes().map(|(_, d)| d).max().unwrap_or(0)
    }

    /// Pre-order walk yielding each node with its depth.
    fn nodes(&self) -> impl Iterator<Item = (&HuffNode, usize)> {
        let mut stack = vec![(&self.root, 0usize)];
        std::iter::from_fn(move || {
            let (node, depth) = stack.pop()?;
            if let HuffNode::Internal { left, right, .. } = node {
                stack.push((&**right, depth + 1));
                stack.push((&**left, depth + 1));
            }
            Some((node, depth))
        })
    }
}
