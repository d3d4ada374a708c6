//! Road id helpers and a total order for scores.

use std::cmp::Ordering;

/// External path identifier attached to a candidate.
pub type RoadId = i64;

/// Road id of a candidate that has none.
pub const UNSET_ROAD: RoadId = -1;

/// Order two scores, with NaN below every number including `-inf`.
///
/// Ranking with this keeps a NaN total from beating a real one, the same
/// way a NaN never wins a `>` comparison in the forward pass.
#[inline]
pub fn cmp_scores(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.total_cmp(&b),
    }
}

/// Append `ids` to `path`, skipping any id equal to the one before it.
#[inline]
pub fn extend_dedup(path: &mut Vec<RoadId>, ids: &[RoadId]) {
    for &id in ids {
        if path.last() != Some(&id) {
            path.push(id);
        }
    }
}

/// Collapse consecutive repeats.
pub fn collapse_repeats(ids: &[RoadId]) -> Vec<RoadId> {
    let mut out = Vec::with_capacity(ids.len());
    extend_dedup(&mut out, ids);
    out
}
