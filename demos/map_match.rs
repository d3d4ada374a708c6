//! Example: matching a short trajectory onto roads.
//!
//! Run with:
//! `cargo run --example map_match --features tracing`

use fast_viterbi::{FastViterbiBuilder, Node};

fn main() {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Three GPS samples, two candidate road segments each.
    //
    // Scores are log-likelihoods; in real use they come from emission and
    // transition models over the road network.
    let scores = vec![
        ((Node::Start, Node::at(0, 0)), (0.7f64).ln()),
        ((Node::Start, Node::at(0, 1)), (0.3f64).ln()),
        ((Node::at(0, 0), Node::at(1, 0)), (0.8f64).ln()),
        ((Node::at(0, 0), Node::at(1, 1)), (0.2f64).ln()),
        ((Node::at(0, 1), Node::at(1, 1)), (0.9f64).ln()),
        ((Node::at(1, 0), Node::at(2, 0)), (0.6f64).ln()),
        ((Node::at(1, 1), Node::at(2, 1)), (0.9f64).ln()),
    ];

    // Road ids per sample and candidate.
    let roads = vec![vec![100, 200], vec![101, 201], vec![102, 201]];

    // Shortest road sequences between candidates of consecutive samples.
    let connectors = vec![
        ((Node::at(0, 0), Node::at(1, 0)), vec![100, 101]),
        ((Node::at(0, 0), Node::at(1, 1)), vec![100, 150, 201]),
        ((Node::at(0, 1), Node::at(1, 1)), vec![200, 201]),
        ((Node::at(1, 0), Node::at(2, 0)), vec![101, 102]),
        ((Node::at(1, 1), Node::at(2, 1)), vec![201]),
    ];

    let fv = FastViterbiBuilder::new(2, 3)
        .scores(scores)
        .roads(roads)
        .connectors(connectors)
        .build()
        .expect("demo tables are consistent");

    let best = fv.inference().expect("trajectory has a finite path");
    println!("Best candidates: {best:?}");
    println!("Road path: {:?}", fv.road_path(&best).unwrap_or_default());
    if let Ok(totals) = fv.scores(&best) {
        println!("Cumulative scores: {totals:?}");
    }

    // Which candidates explain an observed route 100 -> 150 -> 201?
    match fv.inference_with_roads(&[100, 150, 201]) {
        Ok(m) => println!(
            "Route-consistent candidates: {:?} (score {:.3}, roads {:?})",
            m.node_path, m.score, m.road_path
        ),
        Err(err) => println!("No candidates follow the route: {err}"),
    }
}
