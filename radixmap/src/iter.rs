use crate::node::Node;

/// Explicit-stack pre-order traversal that rebuilds full keys as it goes.
///
/// The key buffer is shared: each stack entry remembers how long the key was above its node,
/// and the buffer is truncated back to that length before the node's prefix is appended.
pub(crate) struct PreOrder<'a, V> {
    stack: Vec<(usize, &'a Node<V>)>,
    key: Vec<u8>,
}

impl<'a, V> PreOrder<'a, V> {
    pub(crate) fn new(node: Option<&'a Node<V>>, prefix: &[u8]) -> Self {
        Self {
            stack: node.map(|n| (prefix.len(), n)).into_iter().collect(),
            key: prefix.to_vec(),
        }
    }

    /// Moves to the next value-bearing node and returns its value. Its key is then available
    /// from [`PreOrder::key`].
    pub(crate) fn advance(&mut self) -> Option<&'a V> {
        while let Some((depth, node)) = self.stack.pop() {
            self.key.truncate(depth);
            self.key.extend_from_slice(node.prefix());

            // Reversed so the lowest label is popped first.
            let depth = self.key.len();
            self.stack
                .extend(node.edges().iter().rev().map(|e| (depth, e.node())));

            if let Some(value) = node.value() {
                return Some(value);
            }
        }
        None
    }

    pub(crate) fn key(&self) -> &[u8] {
        &self.key
    }
}

/// Iterator over `(key, value)` pairs in increasing key order.
pub struct Iter<'a, V> {
    inner: PreOrder<'a, V>,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(node: Option<&'a Node<V>>, prefix: &[u8]) -> Self {
        Self {
            inner: PreOrder::new(node, prefix),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Vec<u8>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.inner.advance()?;
        Some((self.inner.key().to_vec(), value))
    }
}

impl<V> std::iter::FusedIterator for Iter<'_, V> {}
