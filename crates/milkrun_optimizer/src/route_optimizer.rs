use thiserror::Error;

use milkrun_core::{
    matrix::{Distance, TravelCostMatrix},
    problem::DeliveryProblem,
    route::VehicleRoute,
};

use crate::solver_params::SolverParams;

#[derive(Debug, Error)]
pub enum SolveError {
    #[error(
        "no feasible single-trip solution for {num_locations} locations, \
         {num_vehicles} vehicles, capacity {capacity}"
    )]
    NoSolution {
        num_locations: usize,
        num_vehicles: usize,
        capacity: u32,
    },
}

/// Result of one single-trip solve: one fixed visiting order per vehicle,
/// covering every customer exactly once across the fleet.
#[derive(Debug, Clone)]
pub struct SingleTripSolution {
    /// One route per vehicle, in increasing vehicle identity order. Unused
    /// vehicles get an empty depot-to-depot round trip.
    pub routes: Vec<VehicleRoute>,

    pub total_distance: Distance,

    /// False when at least one route's load exceeds its vehicle's capacity.
    /// The visiting order is still computed over all customers; the
    /// multi-trip dispatch rounds absorb the excess.
    pub capacity_feasible: bool,
}

/// The single-trip solve capability. The dispatch scheduler treats any
/// implementation as a black box; swapping backends must not change
/// scheduler behaviour.
pub trait RouteOptimizer {
    fn solve(
        &self,
        problem: &DeliveryProblem,
        matrix: &TravelCostMatrix,
        params: &SolverParams,
    ) -> Result<SingleTripSolution, SolveError>;
}
