use serde::Serialize;

use crate::{
    fleet::VehicleIdx,
    matrix::{Distance, TravelCostMatrix},
    problem::{DEPOT, NodeIdx},
};

/// One vehicle's fixed visiting order as produced by the route optimizer:
/// depot, assigned customers in visiting order, depot. The sequence is
/// computed once per run and never recomputed between dispatch rounds.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleRoute {
    vehicle: VehicleIdx,
    nodes: Vec<NodeIdx>,
}

impl VehicleRoute {
    pub fn new(vehicle: VehicleIdx, nodes: Vec<NodeIdx>) -> Self {
        Self { vehicle, nodes }
    }

    pub fn vehicle(&self) -> VehicleIdx {
        self.vehicle
    }

    pub fn nodes(&self) -> &[NodeIdx] {
        &self.nodes
    }

    pub fn starts_and_ends_at_depot(&self) -> bool {
        self.nodes.first() == Some(&DEPOT) && self.nodes.last() == Some(&DEPOT)
    }

    /// Customer stops, in visiting order.
    pub fn customers(&self) -> impl Iterator<Item = NodeIdx> {
        self.nodes.iter().copied().filter(|&node| node != DEPOT)
    }

    pub fn num_customers(&self) -> usize {
        self.customers().count()
    }

    /// Arc-cost sum over the full fixed sequence.
    pub fn distance(&self, matrix: &TravelCostMatrix) -> Distance {
        self.nodes
            .windows(2)
            .map(|pair| matrix.distance(pair[0], pair[1]))
            .sum()
    }
}
