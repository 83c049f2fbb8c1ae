use fxhash::FxHashSet;

use milkrun_core::{
    matrix::TravelCostMatrix,
    problem::{DEPOT, DeliveryProblem, NodeIdx},
};

/// Nearest-neighbor construction: each vehicle in turn starts at the depot
/// and repeatedly drives to the closest unrouted customer that still fits
/// its capacity. Returns one customer sequence per vehicle.
pub(crate) fn construct(
    problem: &DeliveryProblem,
    matrix: &TravelCostMatrix,
) -> Vec<Vec<NodeIdx>> {
    let mut remaining: FxHashSet<NodeIdx> = problem.customer_nodes().collect();
    let num_vehicles = problem.fleet().len();

    let mut sequences: Vec<Vec<NodeIdx>> = Vec::with_capacity(num_vehicles);

    for vehicle in problem.fleet().vehicles() {
        let capacity = vehicle.capacity();

        let mut sequence: Vec<NodeIdx> = Vec::new();
        let mut current = DEPOT;
        let mut load: u32 = 0;

        while let Some(next) = nearest_fitting(problem, matrix, &remaining, current, capacity, load)
        {
            remaining.remove(&next);
            load += problem.demand(next);
            sequence.push(next);
            current = next;
        }

        sequences.push(sequence);
    }

    sequences
}

fn nearest_fitting(
    problem: &DeliveryProblem,
    matrix: &TravelCostMatrix,
    remaining: &FxHashSet<NodeIdx>,
    from: NodeIdx,
    capacity: u32,
    load: u32,
) -> Option<NodeIdx> {
    remaining
        .iter()
        .copied()
        .filter(|&node| load + problem.demand(node) <= capacity)
        .min_by(|&a, &b| {
            matrix
                .distance(from, a)
                .total_cmp(&matrix.distance(from, b))
                .then(a.cmp(&b))
        })
}
