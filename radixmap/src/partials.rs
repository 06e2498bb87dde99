//! Compressed prefix storage for tree nodes.

use std::cmp::min;
use std::fmt;

/// The run of key bytes a node consumes beyond its parent.
///
/// Every non-root node's partial is non-empty and starts with the label of the
/// edge that leads to it.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Partial {
    data: Vec<u8>,
}

impl Partial {
    pub fn from_slice(src: &[u8]) -> Self {
        Self { data: src.to_vec() }
    }

    /// Returns a partial holding the first `length` bytes.
    pub fn partial_before(&self, length: usize) -> Self {
        assert!(length <= self.data.len());
        Self::from_slice(&self.data[..length])
    }

    /// Drops the first `start` bytes in place.
    pub fn trim_front(&mut self, start: usize) {
        assert!(start <= self.data.len());
        self.data.drain(..start);
    }

    /// Appends another partial, as happens when a child is folded into its parent.
    pub fn extend_with(&mut self, other: &Partial) {
        self.data.extend_from_slice(&other.data);
    }

    #[inline(always)]
    pub fn at(&self, pos: usize) -> u8 {
        self.data[pos]
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the length of the common prefix between `self` and `slice`.
    pub fn prefix_length_slice(&self, slice: &[u8]) -> usize {
        let len = min(self.data.len(), slice.len());
        let mut idx = 0;
        while idx < len {
            if self.data[idx] != slice[idx] {
                break;
            }
            idx += 1;
        }
        idx
    }

    /// Returns the part of `key` left after this partial, if the partial is a prefix of it.
    #[inline]
    pub fn strip_from<'k>(&self, key: &'k [u8]) -> Option<&'k [u8]> {
        key.strip_prefix(self.data.as_slice())
    }

    /// True if `key` is a (possibly empty) prefix of this partial.
    #[inline]
    pub fn starts_with(&self, key: &[u8]) -> bool {
        self.data.starts_with(key)
    }

    pub fn to_slice(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for Partial {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<&[u8]> for Partial {
    fn from(src: &[u8]) -> Self {
        Self::from_slice(src)
    }
}

impl fmt::Debug for Partial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", key_str_rep(&self.data))
    }
}

/// Hex rendering of key bytes, e.g. `[66 6f 6f]`.
pub fn key_str_rep(k: &[u8]) -> String {
    let s = k
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ");
    format!("[{}]", s)
}
