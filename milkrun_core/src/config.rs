use serde::{Deserialize, Serialize};

use crate::location::Location;

/// Bounding box of the area the fleet actually delivers to. Records outside
/// of it are excluded during instance building. This is the sole geographic
/// filtering rule besides the plain latitude/longitude range checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ServiceArea {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl ServiceArea {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

/// Immutable configuration for one dispatch run. Built once from external
/// parameters and passed into the problem builder.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub num_vehicles: usize,
    pub vehicle_capacity: u32,
    pub demand_per_customer: u32,
    pub depot: Location,
    pub service_area: ServiceArea,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_area_contains_is_inclusive() {
        let area = ServiceArea {
            min_lat: 12.5,
            max_lat: 13.5,
            min_lon: 77.0,
            max_lon: 78.0,
        };

        assert!(area.contains(12.5, 77.0));
        assert!(area.contains(13.5, 78.0));
        assert!(area.contains(12.9716, 77.5946));
        assert!(!area.contains(25.42357674, 77.5));
        assert!(!area.contains(13.0, 80.2));
    }
}
