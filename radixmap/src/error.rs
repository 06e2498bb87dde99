use thiserror::Error;

/// Where in a structural visit the user function failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisitPhase {
    /// The function failed on the node the visit was started from.
    Node,
    /// The function failed somewhere below it, while descending into children.
    Descend,
}

/// A failure reported by a visitor function, annotated with how many levels of
/// descent it travelled through before reaching the caller.
///
/// Renders the way the failure unwound, innermost last:
/// `can't traverse inner nodes: can't process node: <error>`.
#[derive(Debug, Error)]
#[error("{}can't process node: {error}", descent_context(.depth))]
pub struct VisitError<E> {
    depth: usize,
    error: E,
}

fn descent_context(depth: &usize) -> String {
    "can't traverse inner nodes: ".repeat(*depth)
}

impl<E> VisitError<E> {
    pub(crate) fn node(error: E) -> Self {
        Self { depth: 0, error }
    }

    pub(crate) fn descend(self) -> Self {
        Self {
            depth: self.depth + 1,
            error: self.error,
        }
    }

    pub fn phase(&self) -> VisitPhase {
        if self.depth == 0 {
            VisitPhase::Node
        } else {
            VisitPhase::Descend
        }
    }

    /// Number of recursive descents between the visit's starting node and the failing node.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn inner(&self) -> &E {
        &self.error
    }

    pub fn into_inner(self) -> E {
        self.error
    }
}
