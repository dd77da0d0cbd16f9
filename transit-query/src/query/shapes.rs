//! Shapes and GeoJSON output.
//!
//! Coordinates are written in GeoJSON order, longitude first.

use geojson::{Feature, Geometry, Value, feature};
use serde_json::json;

use crate::domain::{GeoPoint, ScheduleError, ShapePoint, Stop};
use crate::store::{DocumentStore, extract_docs, keys};

/// Every point of a shape, in sequence order.
pub async fn shape_points<S>(shapes: &S, shape_id: &str) -> Result<Vec<ShapePoint>, ScheduleError>
where
    S: DocumentStore<ShapePoint>,
{
    let rows = shapes.scan(&keys::shape_points(shape_id), true).await?;
    Ok(extract_docs(rows))
}

fn position(point: GeoPoint) -> Vec<f64> {
    vec![point.lng, point.lat]
}

/// A shape as a `LineString` feature identified by its shape id.
///
/// Points are used in the order given. Fails with
/// [`ScheduleError::InvalidArgument`] when there are no points.
pub fn shape_as_feature(points: &[ShapePoint]) -> Result<Feature, ScheduleError> {
    let Some(first) = points.first() else {
        return Err(ScheduleError::InvalidArgument(
            "shape has no points".to_string(),
        ));
    };

    let line = points.iter().map(|p| position(p.location())).collect();

    let mut properties = serde_json::Map::new();
    properties.insert("points".to_string(), json!(points.len()));

    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(line))),
        id: Some(feature::Id::String(first.shape_id.clone())),
        properties: Some(properties),
        foreign_members: None,
    })
}

/// A stop as a `Point` feature identified by its stop id.
pub fn stop_as_feature(stop: &Stop) -> Feature {
    let mut properties = serde_json::Map::new();
    properties.insert("name".to_string(), json!(stop.stop_name));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(position(stop.location())))),
        id: Some(feature::Id::String(stop.stop_id.clone())),
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn point(shape: &str, seq: u32, lat: f64, lon: f64) -> ShapePoint {
        ShapePoint {
            shape_id: shape.to_string(),
            shape_pt_lat: lat,
            shape_pt_lon: lon,
            shape_pt_sequence: seq,
        }
    }

    #[tokio::test]
    async fn points_are_in_sequence_order() {
        let store = MemoryStore::from_docs([
            point("SH1", 10, 3.0, 30.0),
            point("SH1", 2, 2.0, 20.0),
            point("SH1", 1, 1.0, 10.0),
            point("SH2", 1, 9.0, 90.0),
        ]);

        let points = shape_points(&store, "SH1").await.unwrap();
        let sequence: Vec<_> = points.iter().map(|p| p.shape_pt_sequence).collect();
        assert_eq!(sequence, vec![1, 2, 10]);

        assert!(shape_points(&store, "SH3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn large_sequences_stay_in_order() {
        let store = MemoryStore::from_docs([
            point("SH1", u32::MAX, 3.0, 30.0),
            point("SH1", 1_000_000, 2.0, 20.0),
            point("SH1", 999_999, 1.0, 10.0),
        ]);

        let points = shape_points(&store, "SH1").await.unwrap();
        let sequence: Vec<_> = points.iter().map(|p| p.shape_pt_sequence).collect();
        assert_eq!(sequence, vec![999_999, 1_000_000, u32::MAX]);
    }

    #[test]
    fn shape_feature_is_lon_lat_line() {
        let points = vec![point("SH1", 1, 51.5, -0.1), point("SH1", 2, 51.6, -0.2)];
        let feature = shape_as_feature(&points).unwrap();

        assert_eq!(feature.id, Some(feature::Id::String("SH1".into())));
        let geometry = feature.geometry.unwrap();
        assert_eq!(
            geometry.value,
            Value::LineString(vec![vec![-0.1, 51.5], vec![-0.2, 51.6]])
        );
    }

    #[test]
    fn empty_shape_is_invalid() {
        assert!(matches!(
            shape_as_feature(&[]),
            Err(ScheduleError::InvalidArgument(_))
        ));
    }

    #[test]
    fn stop_feature() {
        let stop = Stop {
            stop_id: "S1".to_string(),
            stop_name: "Central".to_string(),
            stop_lat: 1.5,
            stop_lon: 2.5,
        };
        let feature = stop_as_feature(&stop);

        assert_eq!(feature.id, Some(feature::Id::String("S1".into())));
        assert_eq!(feature.property("name"), Some(&json!("Central")));
        assert_eq!(feature.geometry.unwrap().value, Value::Point(vec![2.5, 1.5]));
    }
}
