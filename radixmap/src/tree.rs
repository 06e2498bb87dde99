//! Radix tree implementation.
//!
//! This module contains [`RadixTree`], an ordered dictionary from byte-string keys to values in
//! which chains of single-child nodes are collapsed into one node carrying the shared bytes.

use std::collections::HashMap;
use std::fmt;
use std::ops::ControlFlow;

use tracing::{debug, trace};

use crate::error::VisitError;
use crate::iter::Iter;
use crate::node::{Edge, Find, Node};
use crate::partials::{Partial, key_str_rep};

/// An ordered, prefix-compressed dictionary keyed by byte strings.
///
/// Every node stores the run of key bytes it consumes beyond its parent and, optionally, the
/// value of the key that ends there. Edges are kept sorted by their first byte, so traversal
/// yields keys in increasing lexicographic order.
///
/// Structural invariants maintained by every mutating operation:
///
/// - a non-root node either holds a value or has at least two children;
/// - the root has an empty prefix and is never merged away;
/// - [`RadixTree::len`] is the number of value-bearing nodes.
///
/// The tree does no internal locking. Wrap it in a mutex if it has to be shared.
///
/// ## Examples
///
/// ```rust
/// use radixmap::RadixTree;
///
/// let mut tree = RadixTree::new();
/// tree.insert("foo", 1);
/// tree.insert("foobar", 2);
/// tree.insert("food", 3);
///
/// assert_eq!(tree.get("food"), Some(&3));
/// assert_eq!(tree.longest_prefix("foodie"), Some((&b"food"[..], &3)));
///
/// let keys: Vec<_> = tree.prefix_iter("foo").map(|(k, _)| k).collect();
/// assert_eq!(keys, vec![b"foo".to_vec(), b"foobar".to_vec(), b"food".to_vec()]);
/// ```
pub struct RadixTree<V> {
    root: Node<V>,
    size: usize,
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RadixTree<V> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            size: 0,
        }
    }

    /// Create a tree holding every entry of `entries`. Later duplicates replace earlier ones.
    pub fn from_map<K, I>(entries: I) -> Self
    where
        K: AsRef<[u8]>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut tree = Self::new();
        tree.extend(entries);
        tree
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The root node, for read-only inspection of the structure.
    pub fn root(&self) -> &Node<V> {
        &self.root
    }

    /// Insert a key-value pair.
    ///
    /// # Returns
    ///
    /// - `Some(old_value)` if the key was already present and its value was replaced
    /// - `None` if this was a new key
    pub fn insert<K>(&mut self, key: K, value: V) -> Option<V>
    where
        K: AsRef<[u8]>,
    {
        let mut search = key.as_ref();
        let mut node = &mut self.root;
        loop {
            // Key exhausted: the value lives on this node.
            if search.is_empty() {
                let old = node.value.replace(value);
                if old.is_none() {
                    self.size += 1;
                }
                return old;
            }

            let label = search[0];
            let (common, child_prefix_len) = match node.get_edge(label) {
                Some(child) => (
                    child.prefix.prefix_length_slice(search),
                    child.prefix.len(),
                ),
                None => {
                    trace!(suffix_len = search.len(), "adding leaf");
                    node.add_edge(Edge::new(Node::new_leaf(search, value)));
                    self.size += 1;
                    return None;
                }
            };

            if common == child_prefix_len {
                search = &search[common..];
                let Some(child) = node.get_edge_mut(label) else {
                    unreachable!("edge vanished during descent");
                };
                node = child;
                continue;
            }

            // The key diverges inside the child's prefix. Put a node holding the shared bytes
            // between us and the child, and hang the child and the new key off it.
            trace!(common, child_prefix_len, "splitting node");
            let mut split = Node::new_inner(Partial::from_slice(&search[..common]));

            let mut existing = node.update_edge(label, Node::default());
            existing.prefix.trim_front(common);
            split.add_edge(Edge::new(existing));

            let rest = &search[common..];
            if rest.is_empty() {
                split.value = Some(value);
            } else {
                split.add_edge(Edge::new(Node::new_leaf(rest, value)));
            }

            node.update_edge(label, split);
            self.size += 1;
            return None;
        }
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove<K>(&mut self, key: K) -> Option<V>
    where
        K: AsRef<[u8]>,
    {
        let key = key.as_ref();

        // The empty key lives on the root, which is never compacted.
        let removed = if key.is_empty() {
            self.root.value.take()?
        } else {
            Self::remove_below(&mut self.root, key, true)?
        };

        self.size -= 1;
        Some(removed)
    }

    /// Removes `search` from the subtree under `parent` and restores compaction on the way out.
    fn remove_below(parent: &mut Node<V>, search: &[u8], parent_is_root: bool) -> Option<V> {
        let label = search[0];
        let child = parent.get_edge_mut(label)?;
        let rest = child.prefix.strip_from(search)?;

        let removed = if rest.is_empty() {
            let removed = child.value.take()?;
            if child.edges.is_empty() {
                // A leaf with no value has no reason to exist.
                parent.del_edge(label);
            } else if child.edges.len() == 1 {
                child.merge_child();
            }
            removed
        } else {
            Self::remove_below(child, rest, false)?
        };

        // Dropping a leaf may have left the parent with a single child and nothing else.
        if !parent_is_root && !parent.has_value() && parent.edges.len() == 1 {
            parent.merge_child();
        }

        Some(removed)
    }

    /// Remove every key starting with `prefix`, returning how many were removed.
    ///
    /// Costs the length of the path to the prefix plus the size of the removed subtree, rather
    /// than one descent per removed key.
    pub fn remove_prefix<K>(&mut self, prefix: K) -> usize
    where
        K: AsRef<[u8]>,
    {
        let prefix = prefix.as_ref();

        let removed = if prefix.is_empty() {
            let removed = self.root.count_values();
            self.root = Node::default();
            removed
        } else {
            Self::remove_prefix_below(&mut self.root, prefix, true)
        };

        debug!(removed, prefix = %key_str_rep(prefix), "removed prefix");
        self.size -= removed;
        removed
    }

    fn remove_prefix_below(parent: &mut Node<V>, search: &[u8], parent_is_root: bool) -> usize {
        let label = search[0];
        let Some(child) = parent.get_edge_mut(label) else {
            return 0;
        };

        let removed = if child.prefix.starts_with(search) {
            // The prefix ends at or inside this child: the whole subtree goes.
            let removed = child.count_values();
            parent.del_edge(label);
            removed
        } else if let Some(rest) = child.prefix.strip_from(search) {
            Self::remove_prefix_below(child, rest, false)
        } else {
            return 0;
        };

        if !parent_is_root && !parent.has_value() && parent.edges.len() == 1 {
            parent.merge_child();
        }

        removed
    }

    /// Descend from the root along `key`. See [`Node::find`].
    pub fn find<K>(&self, key: K) -> Find<'_, V>
    where
        K: AsRef<[u8]>,
    {
        self.root.find(key.as_ref())
    }

    /// Get the value stored for exactly `key`.
    pub fn get<K>(&self, key: K) -> Option<&V>
    where
        K: AsRef<[u8]>,
    {
        let found = self.root.find(key.as_ref());
        if !found.exact {
            return None;
        }
        found.last_node.value()
    }

    pub fn get_mut<K>(&mut self, key: K) -> Option<&mut V>
    where
        K: AsRef<[u8]>,
    {
        let mut search = key.as_ref();
        let mut node = &mut self.root;
        while !search.is_empty() {
            let child = node.get_edge_mut(search[0])?;
            search = child.prefix.strip_from(search)?;
            node = child;
        }
        node.value.as_mut()
    }

    pub fn contains_key<K>(&self, key: K) -> bool
    where
        K: AsRef<[u8]>,
    {
        self.get(key).is_some()
    }

    /// The longest stored key that is a prefix of `key`, with its value.
    ///
    /// The returned key borrows from `key`.
    pub fn longest_prefix<'k, K>(&self, key: &'k K) -> Option<(&'k [u8], &V)>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        let (len, node) = self.root.find(key).last_value?;
        Some((&key[..len], node.value()?))
    }

    /// The smallest key in the tree and its value.
    pub fn minimum(&self) -> Option<(Vec<u8>, &V)> {
        let mut node = &self.root;
        let mut key = Vec::new();
        loop {
            // A node's own key sorts before everything below it.
            if let Some(value) = node.value() {
                return Some((key, value));
            }
            node = node.edges.first()?.node();
            key.extend_from_slice(node.prefix());
        }
    }

    /// The largest key in the tree and its value.
    pub fn maximum(&self) -> Option<(Vec<u8>, &V)> {
        let mut node = &self.root;
        let mut key = Vec::new();
        while let Some(edge) = node.edges.last() {
            node = edge.node();
            key.extend_from_slice(node.prefix());
        }
        node.value().map(|value| (key, value))
    }

    /// Visit every entry in increasing key order until `f` breaks.
    pub fn walk<F>(&self, f: F) -> ControlFlow<()>
    where
        F: FnMut(&[u8], &V) -> ControlFlow<()>,
    {
        self.root.walk(b"", f)
    }

    /// Visit every entry whose key starts with `prefix`, in increasing key order, until `f`
    /// breaks.
    pub fn walk_prefix<K, F>(&self, prefix: K, f: F) -> ControlFlow<()>
    where
        K: AsRef<[u8]>,
        F: FnMut(&[u8], &V) -> ControlFlow<()>,
    {
        let prefix = prefix.as_ref();
        match self.seek_prefix(prefix) {
            Some((above, node)) => node.walk(&prefix[..above], f),
            None => ControlFlow::Continue(()),
        }
    }

    /// Visit the entries whose keys are prefixes of `key`, shortest first, until `f` breaks.
    ///
    /// This is the mirror image of [`RadixTree::walk_prefix`]: it walks the ancestors of `key`
    /// rather than its descendants.
    pub fn walk_path<K, F>(&self, key: K, mut f: F) -> ControlFlow<()>
    where
        K: AsRef<[u8]>,
        F: FnMut(&[u8], &V) -> ControlFlow<()>,
    {
        let key = key.as_ref();
        let mut node = &self.root;
        let mut search = key;
        loop {
            if let Some(value) = node.value() {
                f(&key[..key.len() - search.len()], value)?;
            }

            if search.is_empty() {
                return ControlFlow::Continue(());
            }

            let Some(child) = node.get_edge(search[0]) else {
                return ControlFlow::Continue(());
            };
            let Some(rest) = child.prefix.strip_from(search) else {
                return ControlFlow::Continue(());
            };
            search = rest;
            node = child;
        }
    }

    /// Iterate over all entries in increasing key order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(Some(&self.root), b"")
    }

    /// Iterate over the entries whose key starts with `prefix`, in increasing key order.
    pub fn prefix_iter<K>(&self, prefix: K) -> Iter<'_, V>
    where
        K: AsRef<[u8]>,
    {
        let prefix = prefix.as_ref();
        match self.seek_prefix(prefix) {
            Some((above, node)) => Iter::new(Some(node), &prefix[..above]),
            None => Iter::new(None, b""),
        }
    }

    /// Call `f` on every node, root first. The first error aborts the visit.
    pub fn visit_nodes<E, F>(&self, f: F) -> Result<(), VisitError<E>>
    where
        F: FnMut(&Node<V>) -> Result<(), E>,
    {
        self.root.visit_nodes(f)
    }

    /// Call `f` on every value-bearing node with its full key. The first error aborts the visit.
    pub fn visit_values<E, F>(&self, f: F) -> Result<(), VisitError<E>>
    where
        F: FnMut(&[u8], &Node<V>) -> Result<(), E>,
    {
        self.root.visit_values(b"", f)
    }

    /// Finds the subtree holding every key that starts with `prefix`. Returns its top node and
    /// the length of the part of `prefix` that lies above that node.
    fn seek_prefix(&self, prefix: &[u8]) -> Option<(usize, &Node<V>)> {
        let mut node = &self.root;
        let mut above = 0;
        let mut search = prefix;
        loop {
            if search.is_empty() {
                return Some((above, node));
            }

            let child = node.get_edge(search[0])?;
            let consumed = prefix.len() - search.len();
            if let Some(rest) = child.prefix.strip_from(search) {
                above = consumed;
                search = rest;
                node = child;
            } else if child.prefix.starts_with(search) {
                // The prefix ends in the middle of this child's bytes.
                return Some((consumed, child));
            } else {
                return None;
            }
        }
    }
}

impl<V: Clone> RadixTree<V> {
    /// Copy every entry into a `HashMap`.
    pub fn to_map(&self) -> HashMap<Vec<u8>, V> {
        let mut out = HashMap::with_capacity(self.size);
        let _ = self.walk(|k, v| {
            out.insert(k.to_vec(), v.clone());
            ControlFlow::Continue(())
        });
        out
    }
}

impl<K: AsRef<[u8]>, V> Extend<(K, V)> for RadixTree<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for RadixTree<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(iter)
    }
}

impl<'a, V> IntoIterator for &'a RadixTree<V> {
    type Item = (Vec<u8>, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Debug for RadixTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (key_str_rep(&k), v)))
            .finish()
    }
}
