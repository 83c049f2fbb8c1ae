use milkrun_core::dispatch::{DispatchScheduler, UnservedReason};
use milkrun_core::fleet::{Fleet, VehicleIdx};
use milkrun_core::location::Location;
use milkrun_core::matrix::TravelCostMatrix;
use milkrun_core::problem::{DEPOT, DeliveryProblem, NodeIdx};
use milkrun_core::route::VehicleRoute;

/// Problem with `demands.len() - 1` customers laid out on a line east of the
/// depot, one kilometre apart.
fn line_problem(demands: Vec<u32>, fleet: Fleet) -> (DeliveryProblem, TravelCostMatrix) {
    let locations: Vec<Location> = (0..demands.len())
        .map(|i| Location::from_lon_lat(77.59 + i as f64 * 0.01, 12.97))
        .collect();

    let matrix = TravelCostMatrix::from_haversine(&locations);
    let problem = DeliveryProblem::new(locations, Vec::new(), demands, fleet).unwrap();

    (problem, matrix)
}

fn single_route(num_customers: usize) -> Vec<VehicleRoute> {
    let mut nodes = vec![DEPOT];
    nodes.extend((1..=num_customers).map(NodeIdx::new));
    nodes.push(DEPOT);

    vec![VehicleRoute::new(VehicleIdx::new(0), nodes)]
}

#[test]
fn splits_into_two_rounds_when_demand_exceeds_capacity() {
    // 1 vehicle of capacity 10, 3 customers of demand 4 on route
    // depot -> A -> B -> C -> depot: round 1 serves A and B (load 8),
    // round 2 serves C.
    let (problem, matrix) = line_problem(vec![0, 4, 4, 4], Fleet::uniform(1, 10));
    let routes = single_route(3);

    let outcome = DispatchScheduler::new(&problem, &matrix, &routes)
        .unwrap()
        .run();

    assert!(!outcome.stalled);
    assert_eq!(outcome.rounds.len(), 2);
    assert_eq!(
        outcome.rounds[0].served,
        vec![NodeIdx::new(1), NodeIdx::new(2)]
    );
    assert_eq!(outcome.rounds[1].served, vec![NodeIdx::new(3)]);
    assert_eq!(outcome.rounds[0].trips[0].load, 8);
    assert!(outcome.summary.is_fully_served());
    assert_eq!(outcome.summary.rounds_used, 2);
}

#[test]
fn stalls_immediately_when_single_customer_exceeds_capacity() {
    let (problem, matrix) = line_problem(vec![0, 6], Fleet::uniform(1, 5));
    let routes = single_route(1);

    let outcome = DispatchScheduler::new(&problem, &matrix, &routes)
        .unwrap()
        .run();

    assert!(outcome.stalled);
    assert!(outcome.rounds.is_empty());
    assert_eq!(outcome.summary.served_count, 0);
    assert_eq!(outcome.summary.unserved.len(), 1);
    assert_eq!(outcome.summary.unserved[0].node, NodeIdx::new(1));
    assert_eq!(
        outcome.summary.unserved[0].reason,
        UnservedReason::DemandExceedsCapacity {
            demand: 6,
            capacity: 5
        }
    );
}

#[test]
fn zero_demands_are_served_in_a_single_round() {
    let (problem, matrix) = line_problem(vec![0, 0, 0, 0, 0], Fleet::uniform(1, 1));
    let routes = single_route(4);

    let outcome = DispatchScheduler::new(&problem, &matrix, &routes)
        .unwrap()
        .run();

    assert!(!outcome.stalled);
    assert_eq!(outcome.rounds.len(), 1);
    assert_eq!(outcome.rounds[0].served.len(), 4);
    assert!(outcome.summary.is_fully_served());
}

#[test]
fn full_coverage_in_round_one_when_fleet_capacity_suffices() {
    let (problem, matrix) = line_problem(vec![0, 3, 3, 3, 3], Fleet::uniform(2, 6));

    let routes = vec![
        VehicleRoute::new(
            VehicleIdx::new(0),
            vec![DEPOT, NodeIdx::new(1), NodeIdx::new(2), DEPOT],
        ),
        VehicleRoute::new(
            VehicleIdx::new(1),
            vec![DEPOT, NodeIdx::new(3), NodeIdx::new(4), DEPOT],
        ),
    ];

    let outcome = DispatchScheduler::new(&problem, &matrix, &routes)
        .unwrap()
        .run();

    assert_eq!(outcome.rounds.len(), 1);
    assert!(outcome.summary.is_fully_served());
    assert_eq!(outcome.rounds[0].trips.len(), 2);
}

#[test]
fn served_set_grows_monotonically_across_rounds() {
    let (problem, matrix) = line_problem(vec![0, 5, 5, 5, 5, 5, 5], Fleet::uniform(1, 10));
    let routes = single_route(6);

    let outcome = DispatchScheduler::new(&problem, &matrix, &routes)
        .unwrap()
        .run();

    let mut seen: Vec<NodeIdx> = Vec::new();
    for round in &outcome.rounds {
        for &node in &round.served {
            assert!(!seen.contains(&node), "{node} served twice");
            seen.push(node);
        }
    }
    assert_eq!(seen.len(), 6);
}

#[test]
fn round_count_is_bounded_by_total_demand_over_min_capacity() {
    let (problem, matrix) = line_problem(vec![0, 7, 2, 9, 1, 4], Fleet::uniform(1, 10));
    let routes = single_route(5);

    let outcome = DispatchScheduler::new(&problem, &matrix, &routes)
        .unwrap()
        .run();

    let total_demand: u32 = problem.demands().iter().sum();
    let bound = total_demand.div_ceil(problem.fleet().min_capacity().unwrap());

    assert!(!outcome.stalled);
    assert!(outcome.summary.rounds_used as u32 <= bound);
    assert!(outcome.summary.is_fully_served());
}

#[test]
fn per_round_vehicle_load_never_exceeds_capacity() {
    let (problem, matrix) = line_problem(vec![0, 9, 8, 7, 2, 3, 6, 1], Fleet::uniform(2, 12));

    let routes = vec![
        VehicleRoute::new(
            VehicleIdx::new(0),
            vec![
                DEPOT,
                NodeIdx::new(1),
                NodeIdx::new(2),
                NodeIdx::new(3),
                NodeIdx::new(4),
                DEPOT,
            ],
        ),
        VehicleRoute::new(
            VehicleIdx::new(1),
            vec![DEPOT, NodeIdx::new(5), NodeIdx::new(6), NodeIdx::new(7), DEPOT],
        ),
    ];

    let outcome = DispatchScheduler::new(&problem, &matrix, &routes)
        .unwrap()
        .run();

    for round in &outcome.rounds {
        for trip in &round.trips {
            let load: u32 = trip.stops.iter().map(|stop| stop.demand).sum();
            assert!(load <= 12);
            assert_eq!(load, trip.load);
        }
    }
    assert!(outcome.summary.is_fully_served());
}

#[test]
fn skipped_stop_stays_in_traversal_so_trip_distance_is_full_route_distance() {
    let (problem, matrix) = line_problem(vec![0, 4, 4, 4], Fleet::uniform(1, 10));
    let routes = single_route(3);
    let full_distance = routes[0].distance(&matrix);

    let outcome = DispatchScheduler::new(&problem, &matrix, &routes)
        .unwrap()
        .run();

    // Round 1 skips customer 3 but still walks the whole sequence.
    assert_eq!(outcome.rounds[0].trips[0].distance, full_distance);
    assert_eq!(outcome.rounds[1].trips[0].distance, full_distance);
}

#[test]
fn oversized_customer_is_deferred_but_rest_are_served() {
    // Customer 2 can never fit; the others are delivered over two rounds
    // before the stall is reported.
    let (problem, matrix) = line_problem(vec![0, 4, 11, 4, 4], Fleet::uniform(1, 10));
    let routes = single_route(4);

    let outcome = DispatchScheduler::new(&problem, &matrix, &routes)
        .unwrap()
        .run();

    assert!(outcome.stalled);
    assert_eq!(outcome.summary.served_count, 3);
    assert_eq!(outcome.summary.unserved.len(), 1);
    assert_eq!(outcome.summary.unserved[0].node, NodeIdx::new(2));
    assert!(matches!(
        outcome.summary.unserved[0].reason,
        UnservedReason::DemandExceedsCapacity { demand: 11, .. }
    ));
}

#[test]
fn later_vehicle_picks_up_customer_skipped_by_earlier_vehicle_same_round() {
    // Vehicle 0 fills up on customers 1 and 2; customer 3 is on both routes
    // and is picked up by vehicle 1 within the same round.
    let (problem, matrix) = line_problem(vec![0, 5, 5, 5], Fleet::uniform(2, 10));

    let routes = vec![
        VehicleRoute::new(
            VehicleIdx::new(0),
            vec![DEPOT, NodeIdx::new(1), NodeIdx::new(2), NodeIdx::new(3), DEPOT],
        ),
        VehicleRoute::new(
            VehicleIdx::new(1),
            vec![DEPOT, NodeIdx::new(3), DEPOT],
        ),
    ];

    let outcome = DispatchScheduler::new(&problem, &matrix, &routes)
        .unwrap()
        .run();

    assert_eq!(outcome.rounds.len(), 1);
    assert_eq!(outcome.rounds[0].trips.len(), 2);
    assert_eq!(outcome.rounds[0].trips[1].vehicle, VehicleIdx::new(1));
    assert_eq!(outcome.rounds[0].trips[1].stops[0].node, NodeIdx::new(3));
    assert!(outcome.summary.is_fully_served());
}

#[test]
fn rejects_route_that_does_not_return_to_depot() {
    let (problem, matrix) = line_problem(vec![0, 3], Fleet::uniform(1, 10));
    let routes = vec![VehicleRoute::new(
        VehicleIdx::new(0),
        vec![DEPOT, NodeIdx::new(1)],
    )];

    let result = DispatchScheduler::new(&problem, &matrix, &routes);
    assert!(result.is_err());
}

#[test]
fn rejects_matrix_of_wrong_size() {
    let (problem, _) = line_problem(vec![0, 3, 3], Fleet::uniform(1, 10));
    let small = TravelCostMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
    let routes = single_route(2);

    let result = DispatchScheduler::new(&problem, &small, &routes);
    assert!(result.is_err());
}
