use fxhash::FxHashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    dispatch::report::{
        CoverageSummary, DispatchOutcome, RoundReport, Stop, UnservedCustomer, UnservedReason,
        VehicleTrip,
    },
    matrix::TravelCostMatrix,
    problem::{DEPOT, DeliveryProblem, NodeIdx},
    route::VehicleRoute,
};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no vehicle routes to dispatch")]
    EmptyRoutes,

    #[error("route for vehicle {0} does not start and end at the depot")]
    MalformedRoute(crate::fleet::VehicleIdx),

    #[error("routes must be ordered by increasing vehicle identity")]
    UnorderedRoutes,

    #[error("route references vehicle {vehicle} but the fleet has {fleet} vehicles")]
    UnknownVehicle { vehicle: usize, fleet: usize },

    #[error("matrix covers {matrix} locations but the problem has {problem}")]
    MatrixSizeMismatch { matrix: usize, problem: usize },
}

/// Replays the fixed single-trip visiting orders across successive delivery
/// rounds, peeling off as many not-yet-served customers as capacity allows
/// each round, until every customer is served or a round makes no progress.
///
/// Within a round, customers are offered capacity in the exact order they
/// appear in the fixed route and vehicles run in increasing identity order.
/// This is deliberate first-come-in-route-order greedy packing, not a
/// bin-packing optimum.
pub struct DispatchScheduler<'a> {
    problem: &'a DeliveryProblem,
    matrix: &'a TravelCostMatrix,
    routes: &'a [VehicleRoute],
}

impl<'a> DispatchScheduler<'a> {
    pub fn new(
        problem: &'a DeliveryProblem,
        matrix: &'a TravelCostMatrix,
        routes: &'a [VehicleRoute],
    ) -> Result<Self, DispatchError> {
        if routes.is_empty() {
            return Err(DispatchError::EmptyRoutes);
        }

        if matrix.num_locations() != problem.num_locations() {
            return Err(DispatchError::MatrixSizeMismatch {
                matrix: matrix.num_locations(),
                problem: problem.num_locations(),
            });
        }

        for route in routes {
            if route.vehicle().get() >= problem.fleet().len() {
                return Err(DispatchError::UnknownVehicle {
                    vehicle: route.vehicle().get(),
                    fleet: problem.fleet().len(),
                });
            }

            if !route.starts_and_ends_at_depot() {
                return Err(DispatchError::MalformedRoute(route.vehicle()));
            }
        }

        if routes
            .windows(2)
            .any(|pair| pair[0].vehicle() >= pair[1].vehicle())
        {
            return Err(DispatchError::UnorderedRoutes);
        }

        Ok(Self {
            problem,
            matrix,
            routes,
        })
    }

    pub fn run(&self) -> DispatchOutcome {
        let all_customers: FxHashSet<NodeIdx> = self.problem.customer_nodes().collect();

        let total_demand = self.problem.total_demand();
        let total_capacity = self.problem.fleet().total_capacity();
        if total_demand > total_capacity {
            warn!(
                total_demand,
                total_capacity,
                "Total demand exceeds single-trip fleet capacity, multiple rounds will be needed"
            );
        }

        info!(
            customers = all_customers.len(),
            vehicles = self.routes.len(),
            "Starting multi-trip dispatch"
        );

        let mut served: FxHashSet<NodeIdx> = FxHashSet::default();
        let mut rounds: Vec<RoundReport> = Vec::new();
        let mut stalled = false;

        while served.len() < all_customers.len() {
            let mut remaining: FxHashSet<NodeIdx> =
                all_customers.difference(&served).copied().collect();

            let round_number = rounds.len() + 1;
            debug!(
                round = round_number,
                remaining = remaining.len(),
                "Starting round"
            );

            let mut trips: Vec<VehicleTrip> = Vec::new();
            let mut round_served: Vec<NodeIdx> = Vec::new();

            for route in self.routes {
                if remaining.is_empty() {
                    break;
                }

                if let Some(trip) = self.run_vehicle(route, &mut remaining, &mut round_served) {
                    trips.push(trip);
                }
            }

            if round_served.is_empty() {
                warn!(
                    round = round_number,
                    unserved = remaining.len(),
                    "Dispatch stalled, no vehicle could serve any remaining customer"
                );
                stalled = true;
                break;
            }

            served.extend(round_served.iter().copied());

            let distance = trips.iter().map(|trip| trip.distance).sum();
            info!(
                round = round_number,
                served_this_round = round_served.len(),
                served_total = served.len(),
                distance,
                "Completed round"
            );

            rounds.push(RoundReport {
                round: round_number,
                trips,
                served: round_served,
                distance,
            });
        }

        let summary = self.summarize(&all_customers, &served, rounds.len());

        DispatchOutcome {
            rounds,
            summary,
            stalled,
        }
    }

    /// Walks one vehicle's fixed route for the current round. The full
    /// sequence is traversed node by node; a customer is served iff it is
    /// still remaining and its demand fits the running load. Skipped stops
    /// remain in the traversal, so the trip distance stays the full fixed
    /// route distance.
    fn run_vehicle(
        &self,
        route: &VehicleRoute,
        remaining: &mut FxHashSet<NodeIdx>,
        round_served: &mut Vec<NodeIdx>,
    ) -> Option<VehicleTrip> {
        let capacity = self.problem.fleet().vehicle(route.vehicle()).capacity();

        let mut load: u32 = 0;
        let mut stops: Vec<Stop> = Vec::new();

        for &node in route.nodes() {
            if node == DEPOT {
                continue;
            }

            let demand = self.problem.demand(node);
            if remaining.contains(&node) && load + demand <= capacity {
                remaining.remove(&node);
                load += demand;
                round_served.push(node);
                stops.push(Stop {
                    node,
                    demand,
                    load_after: load,
                });
            }
        }

        if stops.is_empty() {
            return None;
        }

        Some(VehicleTrip {
            vehicle: route.vehicle(),
            stops,
            load,
            distance: route.distance(self.matrix),
        })
    }

    fn summarize(
        &self,
        all_customers: &FxHashSet<NodeIdx>,
        served: &FxHashSet<NodeIdx>,
        rounds_used: usize,
    ) -> CoverageSummary {
        let max_capacity = self.problem.fleet().max_capacity().unwrap_or(0);

        let mut unserved: Vec<UnservedCustomer> = all_customers
            .difference(served)
            .map(|&node| {
                let demand = self.problem.demand(node);
                let reason = if demand > max_capacity {
                    UnservedReason::DemandExceedsCapacity {
                        demand,
                        capacity: max_capacity,
                    }
                } else {
                    UnservedReason::NoProgress
                };

                UnservedCustomer { node, reason }
            })
            .collect();
        unserved.sort_by_key(|customer| customer.node);

        for customer in &unserved {
            warn!(
                node = %customer.node,
                label = %self.problem.customer_label(customer.node),
                "Customer left unserved: {}",
                customer.reason
            );
        }

        CoverageSummary {
            rounds_used,
            served_count: served.len(),
            total_customers: all_customers.len(),
            unserved,
        }
    }
}
