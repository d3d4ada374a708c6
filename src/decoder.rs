//! The decoder: a trellis plus the road and connector tables.
//!
//! [`FastViterbi`] runs two kinds of inference:
//! - [`FastViterbi::inference`]: plain Viterbi over the trellis scores.
//! - [`FastViterbi::inference_with_roads`]: finds the candidate assignment
//!   whose stitched road path is exactly a given target road path.
//!
//! Setup methods take `&mut self` and queries take `&self`, so once setup is
//! done a decoder can be shared across threads for concurrent queries.

use std::collections::HashSet;

use crate::connectors::ConnectorTable;
use crate::error::{Result, ViterbiError};
use crate::node::Node;
use crate::roads::RoadTable;
use crate::seq::Seq;
use crate::trellis::Trellis;
use crate::utils::{cmp_scores, RoadId};

/// Accumulators alive at one layer, indexed by the candidate they end at.
type LiveSet = Vec<HashSet<Seq>>;

/// One assignment that reproduces a target road path.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadMatch {
    /// Chosen candidate per layer.
    pub node_path: Vec<usize>,
    /// Stitched road path; equal to the target.
    pub road_path: Vec<RoadId>,
    /// Total trellis score of `node_path`.
    pub score: f64,
}

#[derive(Clone, Debug)]
pub struct FastViterbi {
    trellis: Trellis,
    roads: Option<RoadTable>,
    connectors: Option<ConnectorTable>,
}

impl FastViterbi {
    /// Build the trellis for `k` candidates over `n` layers.
    ///
    /// See [`Trellis::new`] for how the score table is read.
    pub fn new<I>(k: usize, n: usize, scores: I) -> Result<Self>
    where
        I: IntoIterator<Item = ((Node, Node), f64)>,
    {
        Trellis::new(k, n, scores).map(Self::from_trellis)
    }

    pub fn from_trellis(trellis: Trellis) -> Self {
        Self {
            trellis,
            roads: None,
            connectors: None,
        }
    }

    #[inline]
    pub fn num_candidates(&self) -> usize {
        self.trellis.num_candidates()
    }

    #[inline]
    pub fn num_layers(&self) -> usize {
        self.trellis.num_layers()
    }

    pub fn trellis(&self) -> &Trellis {
        &self.trellis
    }

    pub fn roads(&self) -> Option<&RoadTable> {
        self.roads.as_ref()
    }

    pub fn connectors(&self) -> Option<&ConnectorTable> {
        self.connectors.as_ref()
    }

    /// Running score totals along a complete node path.
    pub fn scores(&self, node_path: &[usize]) -> Result<Vec<f64>> {
        self.trellis.scores(node_path)
    }

    /// Best candidate per layer, ignoring roads.
    pub fn inference(&self) -> Result<Vec<usize>> {
        self.trellis.inference()
    }

    /// Replace the road table.
    ///
    /// The connector table is always dropped, since it was checked against the
    /// old roads. On error the road table is left unset.
    pub fn setup_roads(&mut self, roads: &[Vec<RoadId>]) -> Result<()> {
        self.connectors = None;
        self.roads = None;
        let table = RoadTable::new(self.num_candidates(), self.num_layers(), roads).map_err(
            |err| {
                #[cfg(feature = "tracing")]
                tracing::warn!(%err, "rejecting road table");
                err
            },
        )?;
        self.roads = Some(table);
        Ok(())
    }

    /// Replace the connector table.
    ///
    /// Needs the road table. On error the connector table is left unset; no
    /// partially validated table is kept.
    pub fn setup_connectors<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = ((Node, Node), Vec<RoadId>)>,
    {
        self.connectors = None;
        let roads = self.roads.as_ref().ok_or(ViterbiError::RoadsNotInitialized)?;
        let table = ConnectorTable::new(roads, entries).map_err(|err| {
            #[cfg(feature = "tracing")]
            tracing::warn!(%err, "rejecting connector table");
            err
        })?;
        #[cfg(feature = "tracing")]
        tracing::debug!(connectors = table.len(), "connector table ready");
        self.connectors = Some(table);
        Ok(())
    }

    /// Road ids along a node path, consecutive repeats collapsed.
    pub fn road_path(&self, node_path: &[usize]) -> Result<Vec<RoadId>> {
        self.roads
            .as_ref()
            .ok_or(ViterbiError::RoadsNotInitialized)?
            .road_path(node_path)
    }

    /// The assignment whose stitched road path equals `target`.
    ///
    /// When several assignments qualify, the one with the highest total score
    /// wins, then the lexicographically smallest node path. A NaN total ranks
    /// below every other score.
    pub fn inference_with_roads(&self, target: &[RoadId]) -> Result<RoadMatch> {
        self.matches(target)?
            .into_iter()
            .next()
            .ok_or(ViterbiError::NoConsistentAssignment)
    }

    /// Every assignment whose stitched road path equals `target`, best first.
    ///
    /// Fails with [`ViterbiError::NoConsistentAssignment`] rather than
    /// returning an empty list.
    pub fn matches(&self, target: &[RoadId]) -> Result<Vec<RoadMatch>> {
        let (roads, connectors) = match (&self.roads, &self.connectors) {
            (Some(roads), Some(connectors)) if !connectors.is_empty() => (roads, connectors),
            _ => return Err(ViterbiError::NotConfigured),
        };
        if target.is_empty() {
            return Err(ViterbiError::EmptyTarget);
        }

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "road_anchored_inference",
            k = self.num_candidates(),
            n = self.num_layers(),
            target_len = target.len()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let survivors = self.sweep(roads, connectors, target);
        #[cfg(feature = "tracing")]
        tracing::debug!(survivors = survivors.len(), "road-anchored sweep finished");
        if survivors.is_empty() {
            return Err(ViterbiError::NoConsistentAssignment);
        }

        let mut ranked = survivors
            .into_iter()
            .map(|seq| {
                let totals = self.trellis.scores(seq.node_path())?;
                let score = totals.last().copied().unwrap_or(f64::NEG_INFINITY);
                let (node_path, road_path) = seq.into_parts();
                Ok(RoadMatch {
                    node_path,
                    road_path,
                    score,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        ranked.sort_by(|a, b| {
            cmp_scores(b.score, a.score).then_with(|| a.node_path.cmp(&b.node_path))
        });
        Ok(ranked)
    }

    /// Forward sweep keeping only accumulators whose road path is a prefix of
    /// `target`; returns the complete ones that match it exactly.
    fn sweep(&self, roads: &RoadTable, connectors: &ConnectorTable, target: &[RoadId]) -> Vec<Seq> {
        let k = self.num_candidates();
        let mut live: LiveSet = vec![HashSet::new(); k];
        for (c, _) in self.trellis.heads() {
            if roads.get(0, c) == Some(target[0]) {
                live[c].insert(Seq::start(c, target[0]));
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            seeds = live.iter().map(HashSet::len).sum::<usize>(),
            "seeded layer 0"
        );

        for layer in 0..self.num_layers() - 1 {
            if live.iter().all(HashSet::is_empty) {
                return Vec::new();
            }
            #[cfg(feature = "tracing")]
            let _step = tracing::trace_span!("stitch_layer", layer).entered();
            let mut next: LiveSet = vec![HashSet::new(); k];
            for batch in self.expand_layer(connectors, target, layer, &live) {
                for (to, seq) in batch {
                    next[to].insert(seq);
                }
            }
            live = next;
        }

        live.into_iter()
            .flatten()
            .filter(|seq| seq.road_path() == target)
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn expand_layer(
        &self,
        connectors: &ConnectorTable,
        target: &[RoadId],
        layer: usize,
        live: &[HashSet<Seq>],
    ) -> Vec<Vec<(usize, Seq)>> {
        use rayon::prelude::*;
        live.par_iter()
            .enumerate()
            .map(|(from, seqs)| self.expand_source(connectors, target, layer, from, seqs))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn expand_layer(
        &self,
        connectors: &ConnectorTable,
        target: &[RoadId],
        layer: usize,
        live: &[HashSet<Seq>],
    ) -> Vec<Vec<(usize, Seq)>> {
        live.iter()
            .enumerate()
            .map(|(from, seqs)| self.expand_source(connectors, target, layer, from, seqs))
            .collect()
    }

    /// Extend every accumulator ending at `(layer, from)` along each scored
    /// link that has a connector, keeping those still on `target`.
    fn expand_source(
        &self,
        connectors: &ConnectorTable,
        target: &[RoadId],
        layer: usize,
        from: usize,
        seqs: &HashSet<Seq>,
    ) -> Vec<(usize, Seq)> {
        let mut out = Vec::new();
        if seqs.is_empty() {
            return out;
        }
        for &(to, _) in self.trellis.links(layer, from) {
            let Some(connector) = connectors.link(layer, from, to) else {
                continue;
            };
            for seq in seqs {
                if stays_on_target(seq.road_path(), connector, target) {
                    out.push((to, seq.extend_stitched(to, connector)));
                }
            }
        }
        out
    }
}

/// Whether stitching `connector` onto `road_path` keeps it a prefix of
/// `target`. `road_path` must already be a prefix of `target`.
fn stays_on_target(road_path: &[RoadId], connector: &[RoadId], target: &[RoadId]) -> bool {
    let mut len = road_path.len();
    let mut last = road_path.last().copied();
    for &id in connector.iter().skip(1) {
        if last == Some(id) {
            continue;
        }
        if target.get(len) != Some(&id) {
            return false;
        }
        len += 1;
        last = Some(id);
    }
    true
}
