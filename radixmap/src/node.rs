use std::ops::ControlFlow;

use tracing::trace;

use crate::error::VisitError;
use crate::iter::PreOrder;
use crate::partials::Partial;

/// A labeled link from a node to the child it owns. The label is always the first byte of the
/// child's prefix.
pub struct Edge<V> {
    pub(crate) label: u8,
    pub(crate) node: Node<V>,
}

impl<V> Edge<V> {
    pub(crate) fn new(node: Node<V>) -> Self {
        debug_assert!(!node.prefix.is_empty(), "edge to a node without prefix");
        Self {
            label: node.prefix.at(0),
            node,
        }
    }

    pub fn label(&self) -> u8 {
        self.label
    }

    pub fn node(&self) -> &Node<V> {
        &self.node
    }
}

pub struct Node<V> {
    pub(crate) prefix: Partial,
    pub(crate) value: Option<V>,
    // Sorted by label, labels unique.
    pub(crate) edges: Vec<Edge<V>>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self::new_inner(Partial::default())
    }
}

/// Outcome of descending from a node along a key, see [`Node::find`].
pub struct Find<'a, V> {
    /// The whole key was consumed by fully matched node prefixes.
    pub exact: bool,
    /// Number of key bytes consumed by fully matched node prefixes.
    pub consumed: usize,
    /// The deepest value-bearing node on the matched path, with the length of its key.
    pub last_value: Option<(usize, &'a Node<V>)>,
    /// The last node reached. When the descent stopped on a prefix mismatch this is the
    /// mismatching child.
    pub last_node: &'a Node<V>,
}

impl<V> Node<V> {
    #[inline]
    pub(crate) fn new_leaf(prefix: &[u8], value: V) -> Self {
        Self {
            prefix: Partial::from_slice(prefix),
            value: Some(value),
            edges: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn new_inner(prefix: Partial) -> Self {
        Self {
            prefix,
            value: None,
            edges: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &[u8] {
        self.prefix.to_slice()
    }

    pub fn edges(&self) -> &[Edge<V>] {
        &self.edges
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    pub fn num_children(&self) -> usize {
        self.edges.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    fn edge_position(&self, label: u8) -> Result<usize, usize> {
        self.edges.binary_search_by_key(&label, |e| e.label)
    }

    /// Child reached through the edge labeled `label`.
    pub fn get_edge(&self, label: u8) -> Option<&Node<V>> {
        let idx = self.edge_position(label).ok()?;
        Some(&self.edges[idx].node)
    }

    pub(crate) fn get_edge_mut(&mut self, label: u8) -> Option<&mut Node<V>> {
        let idx = self.edge_position(label).ok()?;
        Some(&mut self.edges[idx].node)
    }

    pub(crate) fn add_edge(&mut self, edge: Edge<V>) {
        match self.edge_position(edge.label) {
            Ok(_) => panic!("adding duplicate edge {:#04x}", edge.label),
            Err(idx) => self.edges.insert(idx, edge),
        }
    }

    /// Swaps the child under `label` for `node`, returning the old child.
    ///
    /// The label must already exist: callers only rewire edges they have just descended
    /// through, so a miss means the tree is corrupt.
    pub(crate) fn update_edge(&mut self, label: u8, node: Node<V>) -> Node<V> {
        match self.edge_position(label) {
            Ok(idx) => std::mem::replace(&mut self.edges[idx].node, node),
            Err(_) => panic!("replacing missing edge {:#04x}", label),
        }
    }

    pub(crate) fn del_edge(&mut self, label: u8) -> Option<Node<V>> {
        let idx = self.edge_position(label).ok()?;
        Some(self.edges.remove(idx).node)
    }

    /// Folds the only child into this node. The child's prefix is appended to ours and its
    /// value and edges replace ours.
    pub(crate) fn merge_child(&mut self) {
        debug_assert_eq!(self.edges.len(), 1);
        let Some(Edge { node: child, .. }) = self.edges.pop() else {
            unreachable!("merging a node without children");
        };
        trace!(
            prefix_len = self.prefix.len(),
            child_prefix_len = child.prefix.len(),
            "merging child"
        );
        self.prefix.extend_with(&child.prefix);
        self.value = child.value;
        self.edges = child.edges;
    }

    /// Descends from this node along `key`, consuming one full node prefix per step. This
    /// node's own prefix counts as already consumed.
    pub fn find<'a>(&'a self, key: &[u8]) -> Find<'a, V> {
        let mut node = self;
        let mut search = key;
        let mut last_value = None;
        loop {
            if node.has_value() {
                last_value = Some((key.len() - search.len(), node));
            }

            if search.is_empty() {
                break;
            }

            let Some(child) = node.get_edge(search[0]) else {
                break;
            };
            node = child;

            match child.prefix.strip_from(search) {
                Some(rest) => search = rest,
                None => break,
            }
        }

        Find {
            exact: search.is_empty(),
            consumed: key.len() - search.len(),
            last_value,
            last_node: node,
        }
    }

    /// Pre-order walk of this subtree, calling `f` with the full key and value of every
    /// value-bearing node in increasing key order. `prefix` is the key leading up to this
    /// node, not including its own prefix.
    ///
    /// Returns `Break` if `f` asked to stop.
    pub fn walk<F>(&self, prefix: &[u8], mut f: F) -> ControlFlow<()>
    where
        F: FnMut(&[u8], &V) -> ControlFlow<()>,
    {
        let mut cursor = PreOrder::new(Some(self), prefix);
        while let Some(value) = cursor.advance() {
            f(cursor.key(), value)?;
        }
        ControlFlow::Continue(())
    }

    /// Number of value-bearing nodes in this subtree, this node included.
    pub fn count_values(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.has_value() {
                count += 1;
            }
            stack.extend(node.edges.iter().map(|e| &e.node));
        }
        count
    }

    /// Calls `f` on this node and then every node below it, depth first in key order. The
    /// first error stops the visit.
    pub fn visit_nodes<E, F>(&self, mut f: F) -> Result<(), VisitError<E>>
    where
        F: FnMut(&Node<V>) -> Result<(), E>,
    {
        self.visit_nodes_with(&mut f)
    }

    fn visit_nodes_with<E, F>(&self, f: &mut F) -> Result<(), VisitError<E>>
    where
        F: FnMut(&Node<V>) -> Result<(), E>,
    {
        f(self).map_err(VisitError::node)?;

        for edge in &self.edges {
            edge.node
                .visit_nodes_with(f)
                .map_err(VisitError::descend)?;
        }

        Ok(())
    }

    /// Calls `f` with the full key of every value-bearing node in this subtree. `prefix` is the
    /// key leading up to this node. The first error stops the visit.
    pub fn visit_values<E, F>(&self, prefix: &[u8], mut f: F) -> Result<(), VisitError<E>>
    where
        F: FnMut(&[u8], &Node<V>) -> Result<(), E>,
    {
        let mut key = prefix.to_vec();
        self.visit_values_with(&mut key, &mut f)
    }

    fn visit_values_with<E, F>(&self, key: &mut Vec<u8>, f: &mut F) -> Result<(), VisitError<E>>
    where
        F: FnMut(&[u8], &Node<V>) -> Result<(), E>,
    {
        let depth = key.len();
        key.extend_from_slice(self.prefix.to_slice());

        if self.has_value() {
            f(key, self).map_err(VisitError::node)?;
        }

        for edge in &self.edges {
            edge.node
                .visit_values_with(key, f)
                .map_err(VisitError::descend)?;
        }

        key.truncate(depth);
        Ok(())
    }
}
