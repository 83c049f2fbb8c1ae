use serde::{Deserialize, Serialize};

/// Travel distance and duration matrices as returned by a provider.
/// Stored as flat row-major vectors of `num_points * num_points` entries.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TravelMatrices {
    /// Distances in meters
    pub distances: Vec<f64>,

    /// Travel times in seconds
    pub durations: Vec<f64>,
}

impl TravelMatrices {
    pub fn num_points(&self) -> usize {
        self.distances.len().isqrt()
    }
}
