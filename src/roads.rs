//! Per-layer road id lookup.
//!
//! A flat `N × K` grid: `ids[layer * K + candidate]` is the road that
//! candidate stands for, or [`UNSET_ROAD`] if the layer listed fewer than `K`
//! ids.

use crate::error::{Result, ViterbiError};
use crate::utils::{extend_dedup, RoadId, UNSET_ROAD};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoadTable {
    k: usize,
    n: usize,
    ids: Vec<RoadId>,
}

impl RoadTable {
    /// Build from one list of road ids per layer.
    ///
    /// `roads.len()` must equal `n` and no list may be longer than `k`.
    pub fn new(k: usize, n: usize, roads: &[Vec<RoadId>]) -> Result<Self> {
        if roads.len() != n {
            return Err(ViterbiError::LayerCountMismatch {
                expected: n,
                actual: roads.len(),
            });
        }
        let mut ids = vec![UNSET_ROAD; n * k];
        for (layer, row) in roads.iter().enumerate() {
            if row.len() > k {
                return Err(ViterbiError::TooManyRoads {
                    layer,
                    count: row.len(),
                    max: k,
                });
            }
            ids[layer * k..layer * k + row.len()].copy_from_slice(row);
        }
        Ok(Self { k, n, ids })
    }

    #[inline]
    pub fn num_candidates(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn num_layers(&self) -> usize {
        self.n
    }

    /// Road of `(layer, candidate)`; `None` outside the grid.
    #[inline]
    pub fn get(&self, layer: usize, candidate: usize) -> Option<RoadId> {
        if layer >= self.n || candidate >= self.k {
            return None;
        }
        Some(self.ids[layer * self.k + candidate])
    }

    /// All `K` roads of one layer.
    pub fn row(&self, layer: usize) -> &[RoadId] {
        if layer >= self.n {
            return &[];
        }
        &self.ids[layer * self.k..(layer + 1) * self.k]
    }

    /// Road ids visited by a node path, consecutive repeats collapsed.
    ///
    /// `node_path[i]` is looked up in layer `i`. The path may cover fewer than
    /// `N` layers but not more.
    pub fn road_path(&self, node_path: &[usize]) -> Result<Vec<RoadId>> {
        if node_path.is_empty() {
            return Err(ViterbiError::EmptyNodePath);
        }
        if node_path.len() > self.n {
            return Err(ViterbiError::PathLength {
                expected: self.n,
                actual: node_path.len(),
            });
        }
        let mut path = Vec::with_capacity(node_path.len());
        for (layer, &candidate) in node_path.iter().enumerate() {
            let road = self
                .get(layer, candidate)
                .ok_or(ViterbiError::CandidateOutOfRange { layer, candidate })?;
            extend_dedup(&mut path, &[road]);
        }
        Ok(path)
    }
}
