//! Road id sequences that stitch consecutive candidates together.
//!
//! Each connector is the ordered list of roads travelled from one candidate's
//! road to the next candidate's road, endpoints included. The table is checked
//! against a [`RoadTable`] when it is built and is all-or-nothing: one bad
//! entry rejects the whole table.

use crate::error::{Result, ViterbiError};
use crate::node::{Edge, Node};
use crate::roads::RoadTable;
use crate::utils::RoadId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectorTable {
    k: usize,
    n: usize,
    /// heads[c] = connector from the virtual start to layer-0 candidate c
    heads: Vec<Option<Vec<RoadId>>>,
    /// links[layer * k + from] = (to, connector), sorted by `to`
    links: Vec<Vec<(usize, Vec<RoadId>)>>,
    len: usize,
}

impl ConnectorTable {
    /// Validate and store connector entries.
    ///
    /// - an empty sequence fails with [`ViterbiError::EmptyConnector`];
    /// - a head connector must be exactly `[road(0, c)]`;
    /// - a link connector must start at the source road and end at the
    ///   destination road.
    ///
    /// The last two fail with [`ViterbiError::ConnectorMismatch`]. Entries
    /// that do not fit the trellis shape are dropped.
    pub fn new<I>(roads: &RoadTable, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = ((Node, Node), Vec<RoadId>)>,
    {
        let k = roads.num_candidates();
        let n = roads.num_layers();
        let mut table = Self {
            k,
            n,
            heads: vec![None; k],
            links: vec![Vec::new(); n.saturating_sub(1) * k],
            len: 0,
        };

        for ((src, dst), path) in entries {
            let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
                return Err(ViterbiError::EmptyConnector { from: src, to: dst });
            };
            let Some(edge) = Edge::classify(src, dst, k, n) else {
                #[cfg(feature = "tracing")]
                tracing::trace!(%src, %dst, "dropping connector outside the trellis");
                continue;
            };
            let consistent = match edge {
                Edge::Head(c) => path.len() == 1 && roads.get(0, c) == Some(first),
                Edge::Link { layer, from, to } => {
                    roads.get(layer, from) == Some(first) && roads.get(layer + 1, to) == Some(last)
                }
            };
            if !consistent {
                return Err(ViterbiError::ConnectorMismatch { from: src, to: dst });
            }
            table.insert(edge, path);
        }
        Ok(table)
    }

    fn insert(&mut self, edge: Edge, path: Vec<RoadId>) {
        match edge {
            Edge::Head(c) => {
                if self.heads[c].replace(path).is_none() {
                    self.len += 1;
                }
            }
            Edge::Link { layer, from, to } => {
                let list = &mut self.links[layer * self.k + from];
                match list.binary_search_by_key(&to, |(dst, _)| *dst) {
                    Ok(pos) => list[pos].1 = path,
                    Err(pos) => {
                        list.insert(pos, (to, path));
                        self.len += 1;
                    }
                }
            }
        }
    }

    /// Connector from the virtual start to layer-0 candidate `candidate`.
    pub fn head(&self, candidate: usize) -> Option<&[RoadId]> {
        self.heads.get(candidate)?.as_deref()
    }

    /// Connector for `(layer, from) -> (layer + 1, to)`.
    pub fn link(&self, layer: usize, from: usize, to: usize) -> Option<&[RoadId]> {
        if layer >= self.n.saturating_sub(1) || from >= self.k {
            return None;
        }
        let list = &self.links[layer * self.k + from];
        list.binary_search_by_key(&to, |(dst, _)| *dst)
            .ok()
            .map(|pos| list[pos].1.as_slice())
    }

    /// Connector for an arbitrary node pair, if it is a stored transition.
    pub fn get(&self, src: Node, dst: Node) -> Option<&[RoadId]> {
        match Edge::classify(src, dst, self.k, self.n)? {
            Edge::Head(c) => self.head(c),
            Edge::Link { layer, from, to } => self.link(layer, from, to),
        }
    }

    /// Number of stored connectors.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
