//! # radixmap
//!
//! An ordered, prefix-compressed dictionary (radix tree) from byte-string keys to values.
//!
//! Runs of key bytes shared by every key below a node are stored once on that node, and
//! single-child chains are collapsed as keys are removed. Children are kept sorted by their
//! first byte, which gives ordered iteration, cheap minimum/maximum, longest-prefix lookup,
//! and prefix-scoped walks and bulk removal.
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use radixmap::RadixTree;
//!
//! let mut tree = RadixTree::new();
//! tree.insert("romane", 1);
//! tree.insert("romanus", 2);
//! tree.insert("rubens", 3);
//!
//! let mut seen = vec![];
//! let _ = tree.walk_prefix("rom", |k, v| {
//!     seen.push((String::from_utf8_lossy(k).into_owned(), *v));
//!     ControlFlow::Continue(())
//! });
//! assert_eq!(seen, vec![("romane".to_string(), 1), ("romanus".to_string(), 2)]);
//!
//! assert_eq!(tree.remove_prefix("rom"), 2);
//! assert_eq!(tree.len(), 1);
//! ```
//!
//! The tree is single-threaded: share it behind a lock if several threads need it.

pub mod error;
pub mod iter;
pub mod keys;
mod node;
pub mod partials;
pub mod stats;
pub mod tree;

#[cfg(test)]
mod proptests;

pub use error::{VisitError, VisitPhase};
pub use iter::Iter;
pub use keys::VectorKey;
pub use node::{Edge, Find, Node};
pub use stats::{TreeStats, TreeStatsTrait};
pub use tree::RadixTree;
