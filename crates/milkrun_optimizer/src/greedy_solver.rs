use jiff::Timestamp;
use tracing::{debug, info, warn};

use milkrun_core::{
    fleet::VehicleIdx,
    matrix::TravelCostMatrix,
    problem::{DEPOT, DeliveryProblem, NodeIdx},
    route::VehicleRoute,
};

use crate::{
    nearest_neighbor,
    route_optimizer::{RouteOptimizer, SingleTripSolution, SolveError},
    savings,
    solver_params::{FirstSolutionStrategy, LocalSearchStrategy, SolverParams},
    two_opt,
};

/// Built-in single-trip solver: savings or nearest-neighbor construction,
/// followed by time-boxed intra-route 2-opt.
///
/// The visiting order is always computed over *all* customers: when the
/// construction leaves customers unrouted (their demand no longer fits any
/// single trip), they are appended to the least-loaded vehicle and the
/// solution is flagged capacity-infeasible. The dispatch rounds absorb the
/// excess.
#[derive(Default)]
pub struct GreedySolver;

impl GreedySolver {
    pub fn new() -> Self {
        Self
    }
}

impl RouteOptimizer for GreedySolver {
    fn solve(
        &self,
        problem: &DeliveryProblem,
        matrix: &TravelCostMatrix,
        params: &SolverParams,
    ) -> Result<SingleTripSolution, SolveError> {
        let num_vehicles = problem.fleet().len();

        if num_vehicles == 0 || problem.num_customers() == 0 {
            return Err(SolveError::NoSolution {
                num_locations: problem.num_locations(),
                num_vehicles,
                capacity: problem.fleet().max_capacity().unwrap_or(0),
            });
        }

        let deadline = Timestamp::now() + params.time_limit;

        let max_capacity = problem.fleet().max_capacity().unwrap_or(0);

        let mut sequences = match params.first_solution {
            FirstSolutionStrategy::Savings => savings::construct(problem, matrix, max_capacity),
            FirstSolutionStrategy::NearestNeighbor => nearest_neighbor::construct(problem, matrix),
        };

        force_merge_to_fleet_size(&mut sequences, problem, num_vehicles);
        append_unrouted(&mut sequences, problem, num_vehicles);

        let mut routes = assign_to_vehicles(sequences, problem);

        if params.local_search == LocalSearchStrategy::TwoOpt {
            for route in &mut routes {
                two_opt::improve(route, matrix, deadline);
            }
        }

        let routes: Vec<VehicleRoute> = routes
            .into_iter()
            .enumerate()
            .map(|(vehicle, nodes)| VehicleRoute::new(VehicleIdx::new(vehicle), nodes))
            .collect();

        let total_distance = routes.iter().map(|route| route.distance(matrix)).sum();
        let capacity_feasible = routes.iter().all(|route| {
            let load: u64 = route
                .customers()
                .map(|node| problem.demand(node) as u64)
                .sum();
            load <= problem.fleet().vehicle(route.vehicle()).capacity() as u64
        });

        if capacity_feasible {
            info!(total_distance, "Single-trip solve finished");
        } else {
            warn!(
                total_distance,
                "Single-trip solve finished, but not all routes fit in one trip"
            );
        }

        Ok(SingleTripSolution {
            routes,
            total_distance,
            capacity_feasible,
        })
    }
}

/// Concatenates the two least-loaded sequences until at most one per
/// vehicle remains. Capacity is deliberately ignored here.
fn force_merge_to_fleet_size(
    sequences: &mut Vec<Vec<NodeIdx>>,
    problem: &DeliveryProblem,
    num_vehicles: usize,
) {
    let load = |sequence: &[NodeIdx]| -> u64 {
        sequence
            .iter()
            .map(|&node| problem.demand(node) as u64)
            .sum()
    };

    while sequences.iter().filter(|sequence| !sequence.is_empty()).count() > num_vehicles {
        sequences.sort_by_key(|sequence| load(sequence));
        sequences.retain(|sequence| !sequence.is_empty());

        let mut smallest = sequences.remove(0);
        debug!(
            merged = smallest.len(),
            remaining_routes = sequences.len(),
            "Merging route to fit fleet size"
        );
        sequences[0].append(&mut smallest);
    }
}

/// Appends customers no construction placed (demand larger than any single
/// trip) to the least-loaded sequence so the visiting order covers all of
/// them.
fn append_unrouted(
    sequences: &mut Vec<Vec<NodeIdx>>,
    problem: &DeliveryProblem,
    num_vehicles: usize,
) {
    let mut routed = vec![false; problem.num_locations()];
    for sequence in sequences.iter() {
        for &node in sequence {
            routed[node.get()] = true;
        }
    }

    let load = |sequence: &[NodeIdx]| -> u64 {
        sequence
            .iter()
            .map(|&node| problem.demand(node) as u64)
            .sum()
    };

    for node in problem.customer_nodes() {
        if routed[node.get()] {
            continue;
        }

        warn!(
            node = %node,
            demand = problem.demand(node),
            "Customer does not fit any single trip, appending to least-loaded route"
        );

        if sequences.is_empty() {
            sequences.push(Vec::new());
        }

        let target = (0..sequences.len())
            .min_by_key(|&index| load(&sequences[index]))
            .unwrap_or(0);
        sequences[target].push(node);
    }

    while sequences.len() < num_vehicles {
        sequences.push(Vec::new());
    }
}

/// Pairs the heaviest sequences with the roomiest vehicles and produces one
/// full depot-to-depot node list per vehicle, in vehicle identity order.
fn assign_to_vehicles(
    mut sequences: Vec<Vec<NodeIdx>>,
    problem: &DeliveryProblem,
) -> Vec<Vec<NodeIdx>> {
    let load = |sequence: &[NodeIdx]| -> u64 {
        sequence
            .iter()
            .map(|&node| problem.demand(node) as u64)
            .sum()
    };

    sequences.sort_by_key(|sequence| std::cmp::Reverse(load(sequence)));

    let mut vehicle_order: Vec<usize> = (0..problem.fleet().len()).collect();
    vehicle_order.sort_by_key(|&vehicle| {
        std::cmp::Reverse(problem.fleet().vehicle(VehicleIdx::new(vehicle)).capacity())
    });

    let mut per_vehicle: Vec<Vec<NodeIdx>> = vec![Vec::new(); problem.fleet().len()];
    for (sequence, &vehicle) in sequences.into_iter().zip(vehicle_order.iter()) {
        per_vehicle[vehicle] = sequence;
    }

    per_vehicle
        .into_iter()
        .map(|sequence| {
            let mut nodes = Vec::with_capacity(sequence.len() + 2);
            nodes.push(DEPOT);
            nodes.extend(sequence);
            nodes.push(DEPOT);
            nodes
        })
        .collect()
}
