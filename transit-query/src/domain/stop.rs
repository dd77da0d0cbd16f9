//! Stops and coordinates.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Squared planar distance in degrees.
    ///
    /// Only meaningful for comparing candidates against each other.
    pub fn distance_squared(&self, other: &GeoPoint) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        dlat * dlat + dlng * dlng
    }
}

/// A place where vehicles pick up or drop off riders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub stop_id: String,
    #[serde(default)]
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
}

impl Stop {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.stop_lat, self.stop_lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_squared_skips_root() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(3.0, 4.0);
        assert_eq!(a.distance_squared(&b), 25.0);
        assert_eq!(b.distance_squared(&a), 25.0);
        assert_eq!(a.distance_squared(&a), 0.0);
    }

    #[test]
    fn stop_location_uses_lat_lon() {
        let stop = Stop {
            stop_id: "S1".into(),
            stop_name: "Main St".into(),
            stop_lat: 49.28,
            stop_lon: -123.12,
        };
        assert_eq!(stop.location(), GeoPoint::new(49.28, -123.12));
    }
}
