use serde::{Deserialize, Serialize};

/// Where travel matrices come from for a run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub enum TravelMatrixProvider {
    /// A self-hosted OSRM instance exposing the table service.
    Osrm { url: String },

    /// Haversine distances at a constant speed, for offline runs.
    AsTheCrowFlies { speed_kmh: f64 },
}
