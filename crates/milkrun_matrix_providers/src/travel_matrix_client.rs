use crate::{
    as_the_crow_flies::as_the_crow_flies_matrices,
    osrm_api::{OsrmMatrixClient, OsrmMatrixClientParams},
    travel_matrices::TravelMatrices,
    travel_matrix_provider::TravelMatrixProvider,
};

#[derive(Default)]
pub struct TravelMatrixClient;

impl TravelMatrixClient {
    pub fn new() -> Self {
        Self
    }

    pub async fn fetch_matrix<P>(
        &self,
        points: &[P],
        provider: &TravelMatrixProvider,
    ) -> anyhow::Result<TravelMatrices>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        match provider {
            TravelMatrixProvider::Osrm { url } => {
                let client = OsrmMatrixClient::new(OsrmMatrixClientParams {
                    osrm_url: url.clone(),
                });

                Ok(client.fetch_matrix(points).await?)
            }
            TravelMatrixProvider::AsTheCrowFlies { speed_kmh } => {
                Ok(as_the_crow_flies_matrices(points, *speed_kmh))
            }
        }
    }
}
