use serde::{Deserialize, Serialize};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A point on the road network, stored as (longitude, latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    point: geo_types::Point,
}

impl Location {
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self {
            point: geo_types::Point::new(lon, lat),
        }
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn haversine_distance(&self, to: &Location) -> f64 {
        let lat1_rad = self.lat().to_radians();
        let lon1_rad = self.lon().to_radians();
        let lat2_rad = to.lat().to_radians();
        let lon2_rad = to.lon().to_radians();

        let delta_lat = lat2_rad - lat1_rad;
        let delta_lon = lon2_rad - lon1_rad;

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METERS * c
    }
}

impl From<&Location> for geo_types::Point {
    fn from(location: &Location) -> Self {
        location.point
    }
}
