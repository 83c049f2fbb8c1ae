use jiff::Timestamp;

use milkrun_core::{matrix::TravelCostMatrix, problem::NodeIdx};

/// Intra-route 2-opt on a full depot-to-depot sequence: repeatedly reverses
/// the segment between two arcs while that shortens the tour, until no
/// improving move remains or the deadline passes. First-improvement,
/// restart after each applied move.
pub(crate) fn improve(nodes: &mut [NodeIdx], matrix: &TravelCostMatrix, deadline: Timestamp) {
    // Two customers minimum for a reversal: [depot, a, b, depot].
    if nodes.len() < 4 {
        return;
    }

    loop {
        if Timestamp::now() >= deadline {
            return;
        }

        if !apply_best_first_move(nodes, matrix) {
            return;
        }
    }
}

fn apply_best_first_move(nodes: &mut [NodeIdx], matrix: &TravelCostMatrix) -> bool {
    let len = nodes.len();

    for i in 0..len - 3 {
        for j in i + 2..len - 1 {
            let current =
                matrix.distance(nodes[i], nodes[i + 1]) + matrix.distance(nodes[j], nodes[j + 1]);
            let candidate =
                matrix.distance(nodes[i], nodes[j]) + matrix.distance(nodes[i + 1], nodes[j + 1]);

            if candidate + 1e-9 < current {
                nodes[i + 1..=j].reverse();
                return true;
            }
        }
    }

    false
}
