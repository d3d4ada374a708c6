//! Path accumulator for road-anchored decoding.
//!
//! A [`Seq`] pairs the candidates chosen so far (`node_path`) with the road ids
//! stitched together so far (`road_path`). Values are never modified once
//! built; every extension returns a fresh `Seq`, so copies held in the
//! per-layer sets of a sweep never alias.
//!
//! Equality and hashing look at `node_path` only. Two partial decodings that
//! picked the same candidates are the same entry in a `HashSet<Seq>`, whatever
//! their road bookkeeping says.

use std::hash::{Hash, Hasher};

use crate::utils::{extend_dedup, RoadId};

#[derive(Clone, Debug, Default)]
pub struct Seq {
    node_path: Vec<usize>,
    road_path: Vec<RoadId>,
}

impl Seq {
    pub fn new(node_path: Vec<usize>, road_path: Vec<RoadId>) -> Self {
        Self {
            node_path,
            road_path,
        }
    }

    /// Seed at the virtual start: one candidate in layer 0 and its road.
    pub fn start(candidate: usize, road: RoadId) -> Self {
        Self::new(vec![candidate], vec![road])
    }

    #[inline]
    pub fn node_path(&self) -> &[usize] {
        &self.node_path
    }

    #[inline]
    pub fn road_path(&self) -> &[RoadId] {
        &self.road_path
    }

    /// Candidate chosen in the most recent layer.
    #[inline]
    pub fn last_node(&self) -> Option<usize> {
        self.node_path.last().copied()
    }

    /// Number of layers covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.node_path.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.node_path.is_empty()
    }

    /// Plain concatenation of more candidates and more road ids.
    pub fn patch(&self, more_nodes: &[usize], more_roads: &[RoadId]) -> Seq {
        let mut nodes = Vec::with_capacity(self.node_path.len() + more_nodes.len());
        nodes.extend_from_slice(&self.node_path);
        nodes.extend_from_slice(more_nodes);
        let mut roads = Vec::with_capacity(self.road_path.len() + more_roads.len());
        roads.extend_from_slice(&self.road_path);
        roads.extend_from_slice(more_roads);
        Seq::new(nodes, roads)
    }

    /// Advance one layer to `candidate` through `connector`.
    ///
    /// The connector's first id repeats the road already at the end of
    /// `road_path` and is dropped; the rest is appended with consecutive
    /// repeats collapsed.
    pub fn extend_stitched(&self, candidate: usize, connector: &[RoadId]) -> Seq {
        let tail = connector.get(1..).unwrap_or(&[]);
        let mut nodes = Vec::with_capacity(self.node_path.len() + 1);
        nodes.extend_from_slice(&self.node_path);
        nodes.push(candidate);
        let mut roads = Vec::with_capacity(self.road_path.len() + tail.len());
        roads.extend_from_slice(&self.road_path);
        extend_dedup(&mut roads, tail);
        Seq::new(nodes, roads)
    }

    /// Split back into `(node_path, road_path)`.
    pub fn into_parts(self) -> (Vec<usize>, Vec<RoadId>) {
        (self.node_path, self.road_path)
    }
}

impl PartialEq for Seq {
    fn eq(&self, other: &Self) -> bool {
        self.node_path == other.node_path
    }
}

impl Eq for Seq {}

impl Hash for Seq {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node_path.hash(state);
    }
}
