//! Error types returned by the trellis, the lookup tables and the decoder.
//!
//! Configuration errors (`InvalidDimensions`, `LayerCountMismatch`,
//! `TooManyRoads`, `EmptyConnector`, `ConnectorMismatch`) come out of
//! construction and the two setup calls. Everything else is a per-query error
//! and never changes the decoder's state.

use crate::node::Node;

/// Result alias with [`ViterbiError`] as the default error type.
pub type Result<T, E = ViterbiError> = std::result::Result<T, E>;

/// Every failure the crate can report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViterbiError {
    /// `K` must be at least 1 and `N` at least 2.
    #[error("invalid trellis dimensions: K = {k}, N = {n}")]
    InvalidDimensions { k: usize, n: usize },

    /// The road lists do not have one entry per layer.
    #[error("expected road ids for {expected} layers, got {actual}")]
    LayerCountMismatch { expected: usize, actual: usize },

    /// A layer lists more road ids than there are candidates.
    #[error("invalid road ids at layer {layer}: {count} ids for {max} candidates")]
    TooManyRoads {
        layer: usize,
        count: usize,
        max: usize,
    },

    /// A query or setup call needs the road table, which is not built.
    #[error("road table is not initialized")]
    RoadsNotInitialized,

    /// A connector entry carried no road ids.
    #[error("empty connector for {from} -> {to}")]
    EmptyConnector { from: Node, to: Node },

    /// A connector's endpoints disagree with the road table.
    #[error("connector for {from} -> {to} does not match the road table")]
    ConnectorMismatch { from: Node, to: Node },

    /// `road_path` was called with no candidates.
    #[error("empty node path")]
    EmptyNodePath,

    /// A node path has the wrong number of layers.
    #[error("node path has {actual} layers, expected {expected}")]
    PathLength { expected: usize, actual: usize },

    /// A node path references a candidate that does not exist.
    #[error("candidate {candidate} at layer {layer} is out of range")]
    CandidateOutOfRange { layer: usize, candidate: usize },

    /// A node path uses a head or link that has no score.
    #[error("no score for transition {from} -> {to}")]
    MissingTransition { from: Node, to: Node },

    /// Every complete path scores `-inf`.
    #[error("no path with a finite score")]
    NoPath,

    /// Road-anchored inference needs both the road and connector tables.
    #[error("road and connector tables must both be set up")]
    NotConfigured,

    /// Road-anchored inference was given an empty target.
    #[error("target road path is empty")]
    EmptyTarget,

    /// No candidate assignment stitches into the target road path.
    #[error("no candidate assignment reproduces the target road path")]
    NoConsistentAssignment,
}
