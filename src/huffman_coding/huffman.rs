use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::trace;

use crate::tools::freq_count::FrequencyTable;

/// What a node holds: a symbol (leaf) or the arena indices of its two children.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum NodeData {
    Kids(usize, usize),
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Node {
    pub weight: u64,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u64, node_data: NodeData) -> Node {
        Node { weight, node_data }
    }

    #[cfg(test)]
    fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }
}

/// A Huffman tree stored as an arena of nodes. Children are referenced by index, and the root is the
/// last node created.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: usize,
}

impl HuffmanTree {
    /// Build the tree for a frequency table. Returns None for an empty table.
    ///
    /// Nodes are popped from a min-heap keyed on (weight, arena index). Leaves take the indices
    /// 0..K in table order and every merged node is appended after them, so ties between equal weights
    /// always go to the node created first. The first node popped becomes the left child, the second
    /// the right. Rebuilding from the same table therefore yields the same tree every time.
    pub fn build(table: &FrequencyTable) -> Option<HuffmanTree> {
        let leaves = table.len();
        let mut nodes: Vec<Node> = Vec::with_capacity((2 * leaves).saturating_sub(1));
        let mut heap = BinaryHeap::with_capacity(leaves);

        for &(sym, weight) in table.entries() {
            heap.push(Reverse((weight, nodes.len())));
            nodes.push(Node::new(weight, NodeData::Leaf(sym)));
        }

        // Pare the heap down to one single node, merging the two lightest each time.
        while heap.len() > 1 {
            let Reverse((left_weight, left)) = heap.pop()?;
            let Reverse((right_weight, right)) = heap.pop()?;
            let weight = left_weight + right_weight;
            heap.push(Reverse((weight, nodes.len())));
            nodes.push(Node::new(weight, NodeData::Kids(left, right)));
        }

        let Reverse((_, root)) = heap.pop()?;
        trace!(
            "Built huffman tree: {} leaves, {} nodes, root weight {}",
            leaves,
            nodes.len(),
            nodes[root].weight
        );
        Some(HuffmanTree { nodes, root })
    }

    /// Index of the root node.
    pub fn root(&self) -> usize {
        self.root
    }

    pub(crate) fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    #[cfg(test)]
    fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of leaves, which is the number of distinct symbols.
    #[cfg(test)]
    fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    #[cfg(test)]
    fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0_usize)];
        while let Some((idx, depth)) = stack.pop() {
            match self.nodes[idx].node_data {
                NodeData::Kids(left, right) => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
                NodeData::Leaf(_) => deepest = deepest.max(depth),
            }
        }
        deepest
    }
}
