//! Fast Viterbi decoding over a layered candidate trellis.
//!
//! This crate decodes one candidate per observation layer for map-matching
//! style problems: every layer (a trajectory sample) offers up to `K`
//! candidates (nearby road segments), consecutive layers are joined by scored
//! links, and each candidate stands for a road id.
//!
//! ## Core idea
//! 1. Build a [`Trellis`] from a sparse score table keyed by [`Node`] pairs.
//! 2. Decode the best-scoring candidate sequence with plain Viterbi, or
//! 3. attach a road table and a connector table and ask for the assignment
//!    whose stitched road path is exactly an observed road sequence.
//!
//! ## Quick start
//! ```
//! use fast_viterbi::{FastViterbi, Node};
//!
//! let scores = vec![
//!     ((Node::Start, Node::at(0, 0)), 5.0),
//!     ((Node::Start, Node::at(0, 1)), 1.0),
//!     ((Node::at(0, 0), Node::at(1, 0)), 2.0),
//!     ((Node::at(0, 0), Node::at(1, 1)), 1.0),
//!     ((Node::at(1, 0), Node::at(2, 0)), 3.0),
//!     ((Node::at(1, 1), Node::at(2, 1)), 4.0),
//! ];
//! let mut fv = FastViterbi::new(2, 3, scores).unwrap();
//! assert_eq!(fv.inference().unwrap(), vec![0, 0, 0]);
//!
//! fv.setup_roads(&[vec![100, 101], vec![101, 102], vec![102, 103]]).unwrap();
//! assert_eq!(fv.road_path(&[0, 0, 0]).unwrap(), vec![100, 101, 102]);
//! ```
//!
//! ## Cargo features
//! - `parallel`: fan the road-anchored sweep out over rayon.
//! - `tracing`: emit spans and events through the `tracing` crate.

pub mod builder;
pub mod connectors;
pub mod decoder;
pub mod error;
pub mod node;
pub mod roads;
pub mod seq;
pub mod trellis;
pub mod utils;

pub use crate::builder::FastViterbiBuilder;
pub use crate::connectors::ConnectorTable;
pub use crate::decoder::{FastViterbi, RoadMatch};
pub use crate::error::{Result, ViterbiError};
pub use crate::node::Node;
pub use crate::roads::RoadTable;
pub use crate::seq::Seq;
pub use crate::trellis::{Frontier, Trellis};
pub use crate::utils::{RoadId, UNSET_ROAD};
