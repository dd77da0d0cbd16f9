//! Shape points describing the path a vehicle travels.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// One vertex of a trip shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapePoint {
    pub shape_id: String,
    pub shape_pt_lat: f64,
    pub shape_pt_lon: f64,
    pub shape_pt_sequence: u32,
}

impl ShapePoint {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.shape_pt_lat, self.shape_pt_lon)
    }
}
