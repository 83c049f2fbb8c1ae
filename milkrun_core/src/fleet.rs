use serde::Serialize;

use crate::define_index_newtype;

define_index_newtype!(VehicleIdx, Vehicle);

/// A delivery vehicle. Capacity is modeled per vehicle even though the
/// typical fleet is uniform.
#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    external_id: String,
    capacity: u32,
}

impl Vehicle {
    pub fn new(external_id: String, capacity: u32) -> Self {
        Self {
            external_id,
            capacity,
        }
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

impl Fleet {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    /// A fleet of `count` identical vehicles named `vehicle-0..count`.
    pub fn uniform(count: usize, capacity: u32) -> Self {
        let vehicles = (0..count)
            .map(|index| Vehicle::new(format!("vehicle-{index}"), capacity))
            .collect();

        Self { vehicles }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        &self.vehicles[vehicle_id]
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn min_capacity(&self) -> Option<u32> {
        self.vehicles.iter().map(Vehicle::capacity).min()
    }

    pub fn max_capacity(&self) -> Option<u32> {
        self.vehicles.iter().map(Vehicle::capacity).max()
    }

    pub fn total_capacity(&self) -> u64 {
        self.vehicles
            .iter()
            .map(|vehicle| vehicle.capacity() as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_fleet_capacities() {
        let fleet = Fleet::uniform(3, 50);

        assert_eq!(fleet.len(), 3);
        assert_eq!(fleet.min_capacity(), Some(50));
        assert_eq!(fleet.max_capacity(), Some(50));
        assert_eq!(fleet.total_capacity(), 150);
        assert_eq!(fleet.vehicle(VehicleIdx::new(1)).external_id(), "vehicle-1");
    }
}
