use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::DispatchConfig,
    define_index_newtype,
    fleet::Fleet,
    location::Location,
    orders::{Customer, ExcludedRecord, ExclusionReason, OrderRecord},
};

define_index_newtype!(NodeIdx, Location);

/// Node 0 is always the depot; customers occupy 1..=N.
pub const DEPOT: NodeIdx = NodeIdx::new(0);

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no valid customers remain after filtering ({excluded} records excluded)")]
    EmptyInstance { excluded: usize },

    #[error("vehicle capacity must be positive")]
    NonPositiveCapacity,

    #[error("fleet must contain at least one vehicle")]
    EmptyFleet,

    #[error("demand vector has {demands} entries for {locations} locations")]
    DemandLengthMismatch { demands: usize, locations: usize },

    #[error("depot demand must be zero, got {0}")]
    NonZeroDepotDemand(u32),
}

/// Canonical optimization instance for one run: coordinate list with the
/// depot at index 0, a matching demand vector and the fleet. The node set is
/// fixed for the lifetime of the run; node identities are stable indices
/// into the travel cost matrix.
#[derive(Debug)]
pub struct DeliveryProblem {
    locations: Vec<Location>,
    customers: Vec<Customer>,
    demands: Vec<u32>,
    fleet: Fleet,
}

impl DeliveryProblem {
    /// Assembles an instance from already-validated parts. The depot must be
    /// at index 0 with zero demand; `customers` may be empty when no display
    /// metadata is available, otherwise it matches nodes 1..=N in order.
    pub fn new(
        locations: Vec<Location>,
        customers: Vec<Customer>,
        demands: Vec<u32>,
        fleet: Fleet,
    ) -> Result<Self, BuildError> {
        if locations.len() < 2 {
            return Err(BuildError::EmptyInstance { excluded: 0 });
        }

        if fleet.is_empty() {
            return Err(BuildError::EmptyFleet);
        }

        if demands.len() != locations.len() {
            return Err(BuildError::DemandLengthMismatch {
                demands: demands.len(),
                locations: locations.len(),
            });
        }

        if demands[0] != 0 {
            return Err(BuildError::NonZeroDepotDemand(demands[0]));
        }

        Ok(Self {
            locations,
            customers,
            demands,
            fleet,
        })
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, node: NodeIdx) -> &Location {
        &self.locations[node]
    }

    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    /// Customer node identities, in input order (1..=N).
    pub fn customer_nodes(&self) -> impl Iterator<Item = NodeIdx> {
        (1..self.locations.len()).map(NodeIdx::new)
    }

    /// Display metadata for a customer node; `None` for the depot.
    pub fn customer(&self, node: NodeIdx) -> Option<&Customer> {
        if node == DEPOT {
            return None;
        }

        self.customers.get(node.get() - 1)
    }

    /// Display name for reporting, falling back to the node identity.
    pub fn customer_label(&self, node: NodeIdx) -> String {
        self.customer(node)
            .and_then(Customer::customer_name)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Customer {node}"))
    }

    pub fn demand(&self, node: NodeIdx) -> u32 {
        self.demands[node.get()]
    }

    pub fn demands(&self) -> &[u32] {
        &self.demands
    }

    pub fn total_demand(&self) -> u64 {
        self.demands.iter().map(|&demand| demand as u64).sum()
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }
}

#[derive(Debug)]
pub struct BuiltProblem {
    pub problem: DeliveryProblem,
    pub excluded: Vec<ExcludedRecord>,
}

/// Turns raw order records into a [`DeliveryProblem`], excluding records
/// whose coordinates fail to parse, fall outside the plain latitude and
/// longitude ranges, or fall outside the configured service area.
#[derive(Debug)]
pub struct ProblemBuilder {
    config: DispatchConfig,
}

impl ProblemBuilder {
    pub fn new(config: DispatchConfig) -> Result<Self, BuildError> {
        if config.vehicle_capacity == 0 {
            return Err(BuildError::NonPositiveCapacity);
        }

        if config.num_vehicles == 0 {
            return Err(BuildError::EmptyFleet);
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn build(&self, records: Vec<OrderRecord>) -> Result<BuiltProblem, BuildError> {
        let total_records = records.len();

        let mut customers = Vec::with_capacity(total_records);
        let mut excluded = Vec::new();

        for record in records {
            match self.validate(&record) {
                Ok(customer) => customers.push(customer),
                Err(reason) => {
                    warn!(
                        row = record.row,
                        latitude = %record.latitude,
                        longitude = %record.longitude,
                        city = record.city.as_deref().unwrap_or("Unknown"),
                        "Excluding order record: {reason}"
                    );
                    excluded.push(ExcludedRecord { record, reason });
                }
            }
        }

        info!(
            "Kept {} of {} order records ({} excluded)",
            customers.len(),
            total_records,
            excluded.len()
        );

        if customers.is_empty() {
            return Err(BuildError::EmptyInstance {
                excluded: excluded.len(),
            });
        }

        let mut locations = Vec::with_capacity(customers.len() + 1);
        locations.push(self.config.depot);
        locations.extend(customers.iter().map(|customer| *customer.location()));

        let mut demands = vec![0; 1];
        demands.extend(std::iter::repeat_n(
            self.config.demand_per_customer,
            customers.len(),
        ));

        let fleet = Fleet::uniform(self.config.num_vehicles, self.config.vehicle_capacity);

        Ok(BuiltProblem {
            problem: DeliveryProblem {
                locations,
                customers,
                demands,
                fleet,
            },
            excluded,
        })
    }

    fn validate(&self, record: &OrderRecord) -> Result<Customer, ExclusionReason> {
        let lat: f64 = record
            .latitude
            .trim()
            .parse()
            .map_err(|_| ExclusionReason::InvalidLatitude(record.latitude.clone()))?;
        let lon: f64 = record
            .longitude
            .trim()
            .parse()
            .map_err(|_| ExclusionReason::InvalidLongitude(record.longitude.clone()))?;

        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ExclusionReason::LatitudeOutOfRange(lat));
        }

        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(ExclusionReason::LongitudeOutOfRange(lon));
        }

        if !self.config.service_area.contains(lat, lon) {
            return Err(ExclusionReason::OutsideServiceArea { lat, lon });
        }

        Ok(Customer::new(
            Location::from_lon_lat(lon, lat),
            record.customer_name.clone(),
            record.city.clone(),
            record.order_value.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceArea;

    fn test_config() -> DispatchConfig {
        DispatchConfig {
            num_vehicles: 2,
            vehicle_capacity: 50,
            demand_per_customer: 3,
            depot: Location::from_lon_lat(77.5946, 12.9716),
            service_area: ServiceArea {
                min_lat: 12.5,
                max_lat: 13.5,
                min_lon: 77.0,
                max_lon: 78.0,
            },
        }
    }

    fn record(row: usize, lat: &str, lon: &str) -> OrderRecord {
        OrderRecord {
            row,
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            customer_name: Some(format!("customer-{row}")),
            city: Some("Bengaluru".to_string()),
            order_value: Some("450".to_string()),
        }
    }

    #[test]
    fn build_places_depot_first_and_customers_in_input_order() {
        let builder = ProblemBuilder::new(test_config()).unwrap();

        let built = builder
            .build(vec![
                record(1, "12.97", "77.59"),
                record(2, "13.01", "77.61"),
            ])
            .unwrap();

        let problem = built.problem;
        assert_eq!(problem.num_locations(), 3);
        assert_eq!(problem.num_customers(), 2);
        assert_eq!(problem.location(DEPOT).lon(), 77.5946);
        assert_eq!(problem.demands(), &[0, 3, 3]);
        assert_eq!(problem.total_demand(), 6);
        assert_eq!(problem.fleet().len(), 2);
        assert_eq!(problem.customer_label(NodeIdx::new(1)), "customer-1");
        assert!(built.excluded.is_empty());
    }

    #[test]
    fn build_excludes_invalid_records_with_reasons() {
        let builder = ProblemBuilder::new(test_config()).unwrap();

        let built = builder
            .build(vec![
                record(1, "12.97", "77.59"),
                record(2, "not-a-number", "77.61"),
                record(3, "95.0", "77.61"),
                record(4, "13.01", "-190.0"),
                record(5, "25.42357674", "77.61"),
            ])
            .unwrap();

        assert_eq!(built.problem.num_customers(), 1);
        assert_eq!(built.excluded.len(), 4);

        let reasons: Vec<_> = built
            .excluded
            .iter()
            .map(|excluded| excluded.reason.clone())
            .collect();
        assert!(matches!(reasons[0], ExclusionReason::InvalidLatitude(_)));
        assert!(matches!(reasons[1], ExclusionReason::LatitudeOutOfRange(_)));
        assert!(matches!(
            reasons[2],
            ExclusionReason::LongitudeOutOfRange(_)
        ));
        assert!(matches!(
            reasons[3],
            ExclusionReason::OutsideServiceArea { .. }
        ));
    }

    #[test]
    fn build_fails_when_no_customers_remain() {
        let builder = ProblemBuilder::new(test_config()).unwrap();

        let err = builder
            .build(vec![record(1, "55.7", "37.6")])
            .unwrap_err();

        assert!(matches!(err, BuildError::EmptyInstance { excluded: 1 }));
    }

    #[test]
    fn builder_rejects_zero_capacity() {
        let mut config = test_config();
        config.vehicle_capacity = 0;

        assert!(matches!(
            ProblemBuilder::new(config).unwrap_err(),
            BuildError::NonPositiveCapacity
        ));
    }
}
