use serde::Serialize;
use thiserror::Error;

use crate::{
    fleet::VehicleIdx,
    matrix::{Distance, TravelCostMatrix},
    problem::{DeliveryProblem, NodeIdx},
    route::VehicleRoute,
};

/// One delivery actually made during a round, with the vehicle's running
/// load after it.
#[derive(Debug, Clone, Serialize)]
pub struct Stop {
    pub node: NodeIdx,
    pub demand: u32,
    pub load_after: u32,
}

/// One vehicle's pass within a round. Emitted only when the vehicle served
/// at least one stop; the distance is the arc sum over the full fixed route,
/// because skipped stops stay in the traversal.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleTrip {
    pub vehicle: VehicleIdx,
    pub stops: Vec<Stop>,
    pub load: u32,
    pub distance: Distance,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    /// 1-based round ordinal.
    pub round: usize,
    pub trips: Vec<VehicleTrip>,
    /// Customers newly served this round, in service order.
    pub served: Vec<NodeIdx>,
    pub distance: Distance,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum UnservedReason {
    #[error("demand {demand} exceeds the largest vehicle capacity {capacity}")]
    DemandExceedsCapacity { demand: u32, capacity: u32 },

    #[error("no vehicle could make further progress")]
    NoProgress,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnservedCustomer {
    pub node: NodeIdx,
    pub reason: UnservedReason,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageSummary {
    pub rounds_used: usize,
    pub served_count: usize,
    pub total_customers: usize,
    pub unserved: Vec<UnservedCustomer>,
}

impl CoverageSummary {
    pub fn is_fully_served(&self) -> bool {
        self.unserved.is_empty() && self.served_count == self.total_customers
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub rounds: Vec<RoundReport>,
    pub summary: CoverageSummary,
    /// True when the run ended because a round served zero new customers.
    pub stalled: bool,
}

/// Reference report of the single-trip solution, before the multi-trip
/// simulation replays it round by round.
#[derive(Debug, Clone, Serialize)]
pub struct SingleTripVehicleReport {
    pub vehicle: VehicleIdx,
    pub stops: Vec<NodeIdx>,
    pub load: u64,
    pub distance: Distance,
}

#[derive(Debug, Clone, Serialize)]
pub struct SingleTripReport {
    pub vehicles: Vec<SingleTripVehicleReport>,
    pub total_distance: Distance,
    pub total_load: u64,
}

impl SingleTripReport {
    pub fn new(
        problem: &DeliveryProblem,
        matrix: &TravelCostMatrix,
        routes: &[VehicleRoute],
    ) -> Self {
        let vehicles: Vec<SingleTripVehicleReport> = routes
            .iter()
            .map(|route| SingleTripVehicleReport {
                vehicle: route.vehicle(),
                stops: route.customers().collect(),
                load: route
                    .customers()
                    .map(|node| problem.demand(node) as u64)
                    .sum(),
                distance: route.distance(matrix),
            })
            .collect();

        let total_distance = vehicles.iter().map(|vehicle| vehicle.distance).sum();
        let total_load = vehicles.iter().map(|vehicle| vehicle.load).sum();

        Self {
            vehicles,
            total_distance,
            total_load,
        }
    }
}
