//! Statistics and introspection for radix trees.
//!
//! Useful for understanding how well keys compress, how wide nodes fan out, and for
//! checking tree structure while debugging.

use std::collections::HashMap;

use crate::node::Node;
use crate::tree::RadixTree;

pub trait TreeStatsTrait {
    fn get_tree_stats(&self) -> TreeStats;
}

#[derive(Debug, Default)]
pub struct TreeStats {
    /// Every node, the root included.
    pub num_nodes: usize,
    pub num_values: usize,
    /// Nodes with at least one child.
    pub num_inner_nodes: usize,
    /// Nodes without children.
    pub num_leaves: usize,
    pub max_height: usize,
    pub max_fanout: usize,
    /// Sum of all node prefix lengths: the bytes the tree actually stores for keys.
    pub total_prefix_bytes: usize,
    /// Number of nodes per child count.
    pub fanout_histogram: HashMap<usize, usize>,
}

impl TreeStats {
    fn record<V>(&mut self, node: &Node<V>, height: usize) {
        self.num_nodes += 1;
        self.max_height = self.max_height.max(height);
        self.total_prefix_bytes += node.prefix().len();
        if node.has_value() {
            self.num_values += 1;
        }

        let fanout = node.num_children();
        if fanout == 0 {
            self.num_leaves += 1;
        } else {
            self.num_inner_nodes += 1;
        }
        self.max_fanout = self.max_fanout.max(fanout);
        *self.fanout_histogram.entry(fanout).or_default() += 1;
    }

    /// Average number of children of nodes that have any.
    pub fn mean_fanout(&self) -> f64 {
        if self.num_inner_nodes == 0 {
            return 0.0;
        }
        // Every node but the root hangs off exactly one edge.
        (self.num_nodes - 1) as f64 / self.num_inner_nodes as f64
    }
}

impl<V> TreeStatsTrait for RadixTree<V> {
    fn get_tree_stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut stack = vec![(self.root(), 1)];
        while let Some((node, height)) = stack.pop() {
            stats.record(node, height);
            stack.extend(node.edges().iter().map(|e| (e.node(), height + 1)));
        }
        stats
    }
}
