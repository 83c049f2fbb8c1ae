use milkrun_core::{
    fleet::Fleet, location::Location, matrix::TravelCostMatrix, problem::DeliveryProblem,
};

/// Instance with customers one kilometre apart on a line east of the depot.
/// `demands` excludes the depot.
pub(crate) fn line_problem(
    demands: &[u32],
    num_vehicles: usize,
    capacity: u32,
) -> (DeliveryProblem, TravelCostMatrix) {
    let locations: Vec<Location> = (0..=demands.len())
        .map(|i| Location::from_lon_lat(77.59 + i as f64 * 0.01, 12.97))
        .collect();

    let matrix = TravelCostMatrix::from_haversine(&locations);

    let mut full_demands = vec![0];
    full_demands.extend_from_slice(demands);

    let problem = DeliveryProblem::new(
        locations,
        Vec::new(),
        full_demands,
        Fleet::uniform(num_vehicles, capacity),
    )
    .unwrap();

    (problem, matrix)
}
