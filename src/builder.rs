//! Fluent construction of a fully configured [`FastViterbi`].
//!
//! ```
//! use fast_viterbi::{FastViterbiBuilder, Node};
//!
//! let fv = FastViterbiBuilder::new(1, 2)
//!     .scores(vec![
//!         ((Node::Start, Node::at(0, 0)), 0.0),
//!         ((Node::at(0, 0), Node::at(1, 0)), -1.0),
//!     ])
//!     .roads(vec![vec![7], vec![8]])
//!     .connectors(vec![((Node::at(0, 0), Node::at(1, 0)), vec![7, 8])])
//!     .build()
//!     .unwrap();
//! assert_eq!(fv.inference_with_roads(&[7, 8]).unwrap().node_path, vec![0, 0]);
//! ```

use crate::error::Result;
use crate::node::Node;
use crate::utils::RoadId;
use crate::FastViterbi;

pub struct FastViterbiBuilder {
    k: usize,
    n: usize,
    scores: Vec<((Node, Node), f64)>,
    roads: Option<Vec<Vec<RoadId>>>,
    connectors: Option<Vec<((Node, Node), Vec<RoadId>)>>,
}

impl FastViterbiBuilder {
    pub fn new(k: usize, n: usize) -> Self {
        Self {
            k,
            n,
            scores: Vec::new(),
            roads: None,
            connectors: None,
        }
    }
    pub fn scores<I>(mut self, scores: I) -> Self
    where
        I: IntoIterator<Item = ((Node, Node), f64)>,
    {
        self.scores.extend(scores);
        self
    }
    pub fn roads(mut self, roads: Vec<Vec<RoadId>>) -> Self {
        self.roads = Some(roads);
        self
    }
    pub fn connectors<I>(mut self, connectors: I) -> Self
    where
        I: IntoIterator<Item = ((Node, Node), Vec<RoadId>)>,
    {
        self.connectors
            .get_or_insert_with(Vec::new)
            .extend(connectors);
        self
    }
    /// Build the trellis, then set up roads and connectors if given.
    ///
    /// Connectors without roads fail with
    /// [`ViterbiError::RoadsNotInitialized`](crate::ViterbiError::RoadsNotInitialized).
    pub fn build(self) -> Result<FastViterbi> {
        let mut fv = FastViterbi::new(self.k, self.n, self.scores)?;
        if let Some(roads) = &self.roads {
            fv.setup_roads(roads)?;
        }
        if let Some(connectors) = self.connectors {
            fv.setup_connectors(connectors)?;
        }
        Ok(fv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ViterbiError;

    #[test]
    fn propagates_dimension_errors() {
        let err = FastViterbiBuilder::new(0, 2).build().unwrap_err();
        assert_eq!(err, ViterbiError::InvalidDimensions { k: 0, n: 2 });
    }

    #[test]
    fn connectors_without_roads_fail() {
        let err = FastViterbiBuilder::new(1, 2)
            .connectors(vec![((Node::Start, Node::at(0, 0)), vec![1])])
            .build()
            .unwrap_err();
        assert_eq!(err, ViterbiError::RoadsNotInitialized);
    }

    #[test]
    fn scores_accumulate_across_calls() {
        let fv = FastViterbiBuilder::new(1, 2)
            .scores(vec![((Node::Start, Node::at(0, 0)), 1.0)])
            .scores(vec![((Node::at(0, 0), Node::at(1, 0)), 2.0)])
            .build()
            .unwrap();
        assert_eq!(fv.scores(&[0, 0]).unwrap(), vec![1.0, 3.0]);
        assert!(fv.roads().is_none());
    }
}
