use fast_viterbi::{FastViterbi, Node, ViterbiError};

fn dense(k: usize, n: usize, head: f64, step: f64) -> Vec<((Node, Node), f64)> {
    let mut scores: Vec<_> = (0..k)
        .map(|c| ((Node::Start, Node::at(0, c)), head))
        .collect();
    for layer in 0..n - 1 {
        for from in 0..k {
            for to in 0..k {
                scores.push(((Node::at(layer, from), Node::at(layer + 1, to)), step));
            }
        }
    }
    scores
}

#[test]
fn zero_probabilities_are_respected() {
    let scores = vec![
        ((Node::Start, Node::at(0, 0)), 0.0),
        ((Node::Start, Node::at(0, 1)), f64::NEG_INFINITY),
        ((Node::at(0, 0), Node::at(1, 0)), 0.0),
        ((Node::at(0, 0), Node::at(1, 1)), f64::NEG_INFINITY),
        ((Node::at(0, 1), Node::at(1, 1)), 0.0),
        ((Node::at(1, 0), Node::at(2, 0)), 0.0),
        ((Node::at(1, 1), Node::at(2, 1)), 0.0),
    ];
    let fv = FastViterbi::new(2, 3, scores).unwrap();
    let path = fv.inference().unwrap();
    assert_eq!(path, vec![0, 0, 0]);
    assert!(fv.scores(&path).unwrap().iter().all(|s| s.is_finite()));
    assert_eq!(
        *fv.scores(&[1, 1, 1]).unwrap().last().unwrap(),
        f64::NEG_INFINITY
    );
}

#[test]
fn every_path_neg_inf_is_no_path() {
    let fv = FastViterbi::new(3, 4, dense(3, 4, f64::NEG_INFINITY, 0.0)).unwrap();
    assert_eq!(fv.inference().unwrap_err(), ViterbiError::NoPath);
    let fv = FastViterbi::new(3, 4, dense(3, 4, 0.0, f64::NEG_INFINITY)).unwrap();
    assert_eq!(fv.inference().unwrap_err(), ViterbiError::NoPath);
}

#[test]
fn ties_are_deterministic() {
    let fv = FastViterbi::new(3, 6, dense(3, 6, 0.0, -1.0)).unwrap();
    let first = fv.inference().unwrap();
    assert_eq!(first, vec![0; 6]);
    let again = FastViterbi::new(3, 6, dense(3, 6, 0.0, -1.0)).unwrap();
    assert_eq!(again.inference().unwrap(), first);
}

#[test]
fn single_candidate_two_layers() {
    let fv = FastViterbi::new(1, 2, dense(1, 2, -0.5, -0.25)).unwrap();
    assert_eq!(fv.inference().unwrap(), vec![0, 0]);
    assert_eq!(fv.scores(&[0, 0]).unwrap(), vec![-0.5, -0.75]);
}

#[test]
fn huge_layer_indices_are_dropped() {
    let mut scores = dense(1, 2, 0.0, -1.0);
    scores.push(((Node::at(usize::MAX, 0), Node::at(0, 0)), 5.0));
    let mut fv = FastViterbi::new(1, 2, scores).unwrap();
    assert_eq!(fv.trellis().link_score(usize::MAX, 0, 0), None);
    assert_eq!(fv.inference().unwrap(), vec![0, 0]);

    fv.setup_roads(&[vec![1], vec![2]]).unwrap();
    fv.setup_connectors(vec![
        ((Node::at(usize::MAX, 0), Node::at(0, 0)), vec![1]),
        ((Node::at(0, 0), Node::at(1, 0)), vec![1, 2]),
    ])
    .unwrap();
    assert_eq!(fv.connectors().unwrap().len(), 1);
    assert_eq!(fv.connectors().unwrap().link(usize::MAX, 0, 0), None);
    assert_eq!(fv.inference_with_roads(&[1, 2]).unwrap().node_path, vec![0, 0]);
}
