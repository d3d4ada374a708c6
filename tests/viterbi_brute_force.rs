use fast_viterbi::{FastViterbi, Node, ViterbiError};
use proptest::prelude::*;

fn all_paths(k: usize, n: usize) -> Vec<Vec<usize>> {
    let mut paths = vec![Vec::new()];
    for _ in 0..n {
        paths = paths
            .into_iter()
            .flat_map(|p| {
                (0..k).map(move |c| {
                    let mut q = p.clone();
                    q.push(c);
                    q
                })
            })
            .collect();
    }
    paths
}

/// `None` leaves the transition out, `Some(-20)` stands for `-inf`.
fn build_scores(k: usize, n: usize, weights: &[Option<i32>]) -> Vec<((Node, Node), f64)> {
    let mut idx = 0;
    let mut next = || {
        let w = weights.get(idx).copied().flatten();
        idx += 1;
        w.map(|w| if w == -20 { f64::NEG_INFINITY } else { w as f64 })
    };
    let mut scores = Vec::new();
    for c in 0..k {
        if let Some(s) = next() {
            scores.push(((Node::Start, Node::at(0, c)), s));
        }
    }
    for layer in 0..n - 1 {
        for from in 0..k {
            for to in 0..k {
                if let Some(s) = next() {
                    scores.push(((Node::at(layer, from), Node::at(layer + 1, to)), s));
                }
            }
        }
    }
    scores
}

proptest! {
    #[test]
    fn viterbi_matches_exhaustive_search(
        k in 1usize..4,
        n in 2usize..5,
        weights in prop::collection::vec(prop::option::of(-20i32..20), 0usize..60)
    ) {
        let fv = FastViterbi::new(k, n, build_scores(k, n, &weights)).unwrap();

        let mut best: Option<f64> = None;
        for path in all_paths(k, n) {
            let Ok(totals) = fv.scores(&path) else { continue };
            let total = *totals.last().unwrap();
            if total > f64::NEG_INFINITY && best.map_or(true, |b| total > b) {
                best = Some(total);
            }
        }

        match best {
            Some(best) => {
                let path = fv.inference().unwrap();
                prop_assert_eq!(path.len(), n);
                let totals = fv.scores(&path).unwrap();
                prop_assert_eq!(*totals.last().unwrap(), best);
            }
            None => prop_assert_eq!(fv.inference().unwrap_err(), ViterbiError::NoPath),
        }
    }

    #[test]
    fn cumulative_scores_step_by_stored_scores(
        k in 1usize..4,
        n in 2usize..5,
        weights in prop::collection::vec(prop::option::of(-19i32..20), 0usize..60)
    ) {
        let fv = FastViterbi::new(k, n, build_scores(k, n, &weights)).unwrap();
        let trellis = fv.trellis();
        for path in all_paths(k, n) {
            let Ok(totals) = fv.scores(&path) else { continue };
            prop_assert_eq!(totals.len(), n);
            prop_assert_eq!(Some(totals[0]), trellis.head_score(path[0]));
            for layer in 0..n - 1 {
                let step = trellis.link_score(layer, path[layer], path[layer + 1]).unwrap();
                prop_assert_eq!(totals[layer + 1] - totals[layer], step);
            }
        }
    }
}

#[test]
fn scenario_prefers_heavier_head() {
    let scores = vec![
        ((Node::Start, Node::at(0, 0)), 5.0),
        ((Node::Start, Node::at(0, 1)), 1.0),
        ((Node::at(0, 0), Node::at(1, 0)), 2.0),
        ((Node::at(0, 0), Node::at(1, 1)), 1.0),
        ((Node::at(1, 0), Node::at(2, 0)), 3.0),
        ((Node::at(1, 1), Node::at(2, 1)), 4.0),
    ];
    let mut fv = FastViterbi::new(2, 3, scores).unwrap();
    assert_eq!(fv.inference().unwrap(), vec![0, 0, 0]);
    assert_eq!(fv.scores(&[0, 0, 0]).unwrap(), vec![5.0, 7.0, 10.0]);
    fv.setup_roads(&[vec![100, 101], vec![101, 102], vec![102, 103]])
        .unwrap();
    assert_eq!(fv.road_path(&[0, 0, 0]).unwrap(), vec![100, 101, 102]);
}

#[test]
fn raw_host_indices_build_the_same_trellis() {
    let raw: Vec<((i64, i64), (i64, i64), f64)> = vec![
        ((-1, -1), (0, 0), 1.0),
        ((0, 0), (1, 1), 2.0),
        ((0, -3), (1, 0), 9.0),
    ];
    let scores = raw.into_iter().filter_map(|(a, b, s)| {
        Some(((Node::from_raw(a.0, a.1)?, Node::from_raw(b.0, b.1)?), s))
    });
    let fv = FastViterbi::new(2, 2, scores).unwrap();
    assert_eq!(fv.inference().unwrap(), vec![0, 1]);
    assert_eq!(fv.scores(&[0, 1]).unwrap(), vec![1.0, 3.0]);
}

#[test]
fn long_chain_keeps_full_length() {
    let n = 500;
    let mut scores = vec![((Node::Start, Node::at(0, 0)), 0.0)];
    for layer in 0..n - 1 {
        scores.push(((Node::at(layer, 0), Node::at(layer + 1, layer % 2)), -1.0));
        scores.push(((Node::at(layer, 1), Node::at(layer + 1, layer % 2)), -1.0));
    }
    let fv = FastViterbi::new(2, n, scores).unwrap();
    let path = fv.inference().unwrap();
    assert_eq!(path.len(), n);
    assert_eq!(*fv.scores(&path).unwrap().last().unwrap(), -((n - 1) as f64));
}
