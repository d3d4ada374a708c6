//! Layered candidate graph and unconstrained Viterbi decoding.
//!
//! Graph structure: layers `0..N`, `K` candidates per layer, a virtual start
//! feeding layer 0 through head scores, and scored links only from layer `i`
//! to layer `i + 1`. Links live in a flat `(N-1) × K` array of adjacency
//! lists (`links[layer * K + from]`), each kept sorted by destination.
//!
//! Frontier: best cumulative score per candidate in the current layer.

use crate::error::{Result, ViterbiError};
use crate::node::{Edge, Node};

/// Outgoing `(destination candidate, score)` pairs of one candidate.
pub type Links = Vec<(usize, f64)>;

#[derive(Clone, Debug)]
pub struct Trellis {
    k: usize,
    n: usize,
    /// heads[c] = score of starting at layer-0 candidate c, if any
    heads: Vec<Option<f64>>,
    /// links[layer * k + from] = edges into layer + 1, sorted by destination
    links: Vec<Links>,
}

/// Best cumulative score per candidate at one layer (`-inf` = unreachable).
#[derive(Clone, Debug, PartialEq)]
pub struct Frontier {
    pub best: Vec<f64>,
}

impl Trellis {
    /// Build from a sparse score table.
    ///
    /// Only `(Start, (0, c))` and `((n, c), (n + 1, c'))` entries inside the
    /// `K × N` grid are kept; every other entry is dropped without error. A
    /// repeated transition keeps the last score seen.
    pub fn new<I>(k: usize, n: usize, scores: I) -> Result<Self>
    where
        I: IntoIterator<Item = ((Node, Node), f64)>,
    {
        if k == 0 || n < 2 {
            return Err(ViterbiError::InvalidDimensions { k, n });
        }
        let mut heads = vec![None; k];
        let mut links: Vec<Links> = vec![Vec::new(); (n - 1) * k];
        for ((src, dst), score) in scores {
            match Edge::classify(src, dst, k, n) {
                Some(Edge::Head(c)) => heads[c] = Some(score),
                Some(Edge::Link { layer, from, to }) => {
                    let list = &mut links[layer * k + from];
                    match list.binary_search_by_key(&to, |&(dst, _)| dst) {
                        Ok(pos) => list[pos].1 = score,
                        Err(pos) => list.insert(pos, (to, score)),
                    }
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(%src, %dst, "dropping score outside the trellis");
                }
            }
        }
        Ok(Self { k, n, heads, links })
    }

    /// Number of candidates per layer, `K`.
    #[inline]
    pub fn num_candidates(&self) -> usize {
        self.k
    }

    /// Number of layers, `N`.
    #[inline]
    pub fn num_layers(&self) -> usize {
        self.n
    }

    /// Head score of layer-0 candidate `candidate`.
    #[inline]
    pub fn head_score(&self, candidate: usize) -> Option<f64> {
        self.heads.get(candidate).copied().flatten()
    }

    /// All defined head scores, by ascending candidate.
    pub fn heads(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.heads
            .iter()
            .enumerate()
            .filter_map(|(c, score)| score.map(|s| (c, s)))
    }

    /// Outgoing links of `(layer, from)`, sorted by destination.
    ///
    /// Empty for the last layer and for out-of-range indices.
    #[inline]
    pub fn links(&self, layer: usize, from: usize) -> &[(usize, f64)] {
        if layer >= self.n.saturating_sub(1) || from >= self.k {
            return &[];
        }
        &self.links[layer * self.k + from]
    }

    /// Score of `(layer, from) -> (layer + 1, to)`.
    pub fn link_score(&self, layer: usize, from: usize, to: usize) -> Option<f64> {
        let list = self.links(layer, from);
        list.binary_search_by_key(&to, |&(dst, _)| dst)
            .ok()
            .map(|pos| list[pos].1)
    }

    /// Running totals of the score along a complete node path.
    ///
    /// `result[0]` is the head score of `node_path[0]`; each later entry adds
    /// the link score of one more step.
    pub fn scores(&self, node_path: &[usize]) -> Result<Vec<f64>> {
        if node_path.len() != self.n {
            return Err(ViterbiError::PathLength {
                expected: self.n,
                actual: node_path.len(),
            });
        }
        if let Some((layer, &candidate)) =
            node_path.iter().enumerate().find(|&(_, &c)| c >= self.k)
        {
            return Err(ViterbiError::CandidateOutOfRange { layer, candidate });
        }

        let first = node_path[0];
        let mut acc = self
            .head_score(first)
            .ok_or(ViterbiError::MissingTransition {
                from: Node::Start,
                to: Node::at(0, first),
            })?;
        let mut out = Vec::with_capacity(self.n);
        out.push(acc);
        for (layer, pair) in node_path.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            let step = self
                .link_score(layer, from, to)
                .ok_or(ViterbiError::MissingTransition {
                    from: Node::at(layer, from),
                    to: Node::at(layer + 1, to),
                })?;
            acc += step;
            out.push(acc);
        }
        Ok(out)
    }

    /// Frontier at layer 0: head scores, `-inf` where none was given.
    pub fn init_frontier(&self) -> Frontier {
        let best = self
            .heads
            .iter()
            .map(|h| h.unwrap_or(f64::NEG_INFINITY))
            .collect();
        Frontier { best }
    }

    /// One Viterbi step from `layer` to `layer + 1`.
    ///
    /// Returns the next frontier and, per destination, the source candidate
    /// that achieved its best score. Sources are visited in ascending order
    /// and only a strictly better score replaces the incumbent, so ties keep
    /// the lowest source.
    pub fn forward_step(&self, layer: usize, frontier: &Frontier) -> (Frontier, Vec<Option<usize>>) {
        let mut best = vec![f64::NEG_INFINITY; self.k];
        let mut back = vec![None; self.k];
        for (from, &base) in frontier.best.iter().enumerate().take(self.k) {
            if base == f64::NEG_INFINITY {
                continue;
            }
            for &(to, score) in self.links(layer, from) {
                let cand = base + score;
                if cand > best[to] {
                    best[to] = cand;
                    back[to] = Some(from);
                }
            }
        }
        (Frontier { best }, back)
    }

    /// Unconstrained Viterbi decoding: the best-scoring candidate per layer.
    ///
    /// Fails with [`ViterbiError::NoPath`] when every complete path scores
    /// `-inf`.
    pub fn inference(&self) -> Result<Vec<usize>> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("viterbi_inference", k = self.k, n = self.n);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut frontier = self.init_frontier();
        let mut backpointers = Vec::with_capacity(self.n - 1);
        for layer in 0..self.n - 1 {
            #[cfg(feature = "tracing")]
            let _step = tracing::trace_span!("forward_step", layer).entered();
            let (next, back) = self.forward_step(layer, &frontier);
            backpointers.push(back);
            frontier = next;
        }

        let mut last = None;
        let mut best = f64::NEG_INFINITY;
        for (c, &v) in frontier.best.iter().enumerate() {
            if v > best {
                best = v;
                last = Some(c);
            }
        }
        let mut node = last.ok_or(ViterbiError::NoPath)?;

        let mut path = Vec::with_capacity(self.n);
        path.push(node);
        for back in backpointers.iter().rev() {
            node = back[node].ok_or(ViterbiError::NoPath)?;
            path.push(node);
        }
        path.reverse();

        #[cfg(feature = "tracing")]
        tracing::debug!(score = best, "viterbi path decoded");
        Ok(path)
    }
}
