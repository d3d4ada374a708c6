//! Trellis node addressing.
//!
//! A node is either the virtual start that precedes layer 0 or a
//! `(layer, candidate)` pair. Score and connector tables are keyed by pairs of
//! nodes; [`Edge::classify`] sorts such a pair into the two legal shapes and
//! drops everything else.

use std::fmt;

/// A position in the trellis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Node {
    /// Virtual start node preceding layer 0.
    Start,
    /// Candidate `candidate` in layer `layer`.
    At { layer: usize, candidate: usize },
}

impl Node {
    /// Shorthand for [`Node::At`].
    #[inline]
    pub const fn at(layer: usize, candidate: usize) -> Self {
        Node::At { layer, candidate }
    }

    /// Convert the signed indices a host application hands over.
    ///
    /// A negative layer is the virtual start, whatever the candidate. A
    /// negative candidate on a real layer is not a node and yields `None`.
    pub fn from_raw(layer: i64, candidate: i64) -> Option<Self> {
        if layer < 0 {
            return Some(Node::Start);
        }
        let layer = usize::try_from(layer).ok()?;
        let candidate = usize::try_from(candidate).ok()?;
        Some(Node::At { layer, candidate })
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        matches!(self, Node::Start)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Start => write!(f, "start"),
            Node::At { layer, candidate } => write!(f, "({layer}, {candidate})"),
        }
    }
}

/// A transition that fits inside a `K × N` trellis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Virtual start to candidate `0` of layer 0.
    Head(usize),
    /// `(layer, from)` to `(layer + 1, to)`.
    Link { layer: usize, from: usize, to: usize },
}

impl Edge {
    /// Classify a `(src, dst)` pair against `k` candidates and `n` layers.
    ///
    /// Returns `None` for every other shape, including candidates `>= k` and
    /// layers that skip or run past the end.
    pub fn classify(src: Node, dst: Node, k: usize, n: usize) -> Option<Self> {
        match (src, dst) {
            (
                Node::Start,
                Node::At {
                    layer: 0,
                    candidate,
                },
            ) if candidate < k => Some(Edge::Head(candidate)),
            (
                Node::At {
                    layer: l0,
                    candidate: from,
                },
                Node::At {
                    layer: l1,
                    candidate: to,
                },
            ) if l0.checked_add(1) == Some(l1) && l1 < n && from < k && to < k => {
                Some(Edge::Link {
                    layer: l0,
                    from,
                    to,
                })
            }
            _ => None,
        }
    }

    /// The `(src, dst)` node pair this edge connects.
    pub fn nodes(&self) -> (Node, Node) {
        match *self {
            Edge::Head(c) => (Node::Start, Node::at(0, c)),
            Edge::Link { layer, from, to } => (Node::at(layer, from), Node::at(layer + 1, to)),
        }
    }
}
