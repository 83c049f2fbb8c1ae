use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::travel_matrices::TravelMatrices;

pub const OSRM_TABLE_API_PATH: &str = "/table/v1/driving/";

#[derive(Debug, Error)]
pub enum OsrmError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("OSRM returned status {status} for {num_points} points: {body}")]
    Api {
        status: u16,
        num_points: usize,
        body: String,
    },

    #[error("OSRM response has no distances field ({num_points} points requested)")]
    MissingDistances { num_points: usize },
}

#[derive(Deserialize)]
struct OsrmTableResponse {
    distances: Option<Vec<Vec<f64>>>,
    durations: Option<Vec<Vec<f64>>>,
}

pub struct OsrmMatrixClientParams {
    pub osrm_url: String,
}

/// Client for the OSRM table service. One request returns the full pairwise
/// matrix over the given coordinates, depot first.
pub struct OsrmMatrixClient {
    params: OsrmMatrixClientParams,
    client: reqwest::Client,
}

impl OsrmMatrixClient {
    pub fn new(params: OsrmMatrixClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub async fn fetch_matrix<P>(&self, points: &[P]) -> Result<TravelMatrices, OsrmError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let mut url = self.params.osrm_url.trim_end_matches('/').to_string();
        url.push_str(OSRM_TABLE_API_PATH);

        for (i, point) in points.iter().enumerate() {
            let point: geo_types::Point = point.into();
            url.push_str(&format!("{},{}", point.x(), point.y()));

            if i < points.len() - 1 {
                url.push(';');
            }
        }

        debug!(
            num_points = points.len(),
            url_len = url.len(),
            "Requesting OSRM table"
        );

        let response = self
            .client
            .get(url)
            .query(&[("annotations", "distance,duration")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OsrmError::Api {
                status,
                num_points: points.len(),
                body,
            });
        }

        let table: OsrmTableResponse = response.json().await?;

        let distances = table
            .distances
            .ok_or(OsrmError::MissingDistances {
                num_points: points.len(),
            })?
            .into_iter()
            .flatten()
            .collect();

        let durations = table
            .durations
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect();

        Ok(TravelMatrices {
            distances,
            durations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_table_response() {
        let json = r#"{
            "code": "Ok",
            "distances": [[0.0, 1200.5], [1180.0, 0.0]],
            "durations": [[0.0, 96.2], [94.1, 0.0]]
        }"#;

        let table: OsrmTableResponse = serde_json::from_str(json).unwrap();

        let distances: Vec<f64> = table.distances.unwrap().into_iter().flatten().collect();
        assert_eq!(distances, vec![0.0, 1200.5, 1180.0, 0.0]);
        assert!(table.durations.is_some());
    }

    #[test]
    fn missing_distances_field_is_detectable() {
        let json = r#"{"code": "Ok", "durations": [[0.0]]}"#;
        let table: OsrmTableResponse = serde_json::from_str(json).unwrap();
        assert!(table.distances.is_none());
    }
}
