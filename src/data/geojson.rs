use crate::core::geo::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GeoJSON position, `[lng, lat]` with an optional altitude
pub type Position = Vec<f64>;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl GeoJsonFeature {
    /// Display text of a property.
    ///
    /// Strings are returned as-is and numbers are formatted; empty strings,
    /// nulls and structured values count as absent.
    pub fn property_text(&self, key: &str) -> Option<String> {
        match self.properties.as_ref()?.get(key)? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    /// The feature's location when it is a point
    pub fn point(&self) -> Option<LatLng> {
        match &self.geometry {
            Some(GeoJsonGeometry::Point { coordinates }) => position_to_lat_lng(coordinates),
            _ => None,
        }
    }
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

impl GeoJson {
    /// Reads a typed view of an already-parsed document
    pub fn from_value(value: &Value) -> crate::Result<Self> {
        Ok(GeoJson::deserialize(value)?)
    }

    pub fn features(&self) -> Vec<&GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features.iter().collect(),
        }
    }

    /// Bounding box of every point feature, `None` when there are no points
    pub fn point_bounds(&self) -> Option<LatLngBounds> {
        self.features()
            .into_iter()
            .filter_map(GeoJsonFeature::point)
            .fold(None, |bounds: Option<LatLngBounds>, point| match bounds {
                Some(mut b) => {
                    b.extend(&point);
                    Some(b)
                }
                None => Some(LatLngBounds::from_point(point)),
            })
    }
}

fn position_to_lat_lng(position: &[f64]) -> Option<LatLng> {
    match position {
        [lng, lat, ..] => Some(LatLng::new(*lat, *lng)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stops() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-122.2509, 47.8490]},
                    "properties": {"stop": "Lynnwood", "label": "Home"}
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-122.3103636, 47.6564806, 12.0]},
                    "properties": {"name": "Odegaard", "label": "Study"}
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Polygon", "coordinates": [[[-123.0, 46.0], [-121.0, 46.0], [-121.0, 49.0], [-123.0, 46.0]]]},
                    "properties": null
                }
            ]
        })
    }

    #[test]
    fn test_parse_feature_collection() {
        let doc = GeoJson::from_value(&stops()).unwrap();
        assert_eq!(doc.features().len(), 3);
        assert!(doc.features()[2].properties.is_none());
    }

    #[test]
    fn test_point_bounds_ignore_polygons() {
        let doc = GeoJson::from_value(&stops()).unwrap();
        let bounds = doc.point_bounds().unwrap();
        assert_eq!(bounds.south_west, LatLng::new(47.6564806, -122.3103636));
        assert_eq!(bounds.north_east, LatLng::new(47.8490, -122.2509));
    }

    #[test]
    fn test_point_bounds_empty() {
        let doc = GeoJson::FeatureCollection { features: vec![] };
        assert!(doc.point_bounds().is_none());
    }

    #[test]
    fn test_property_text() {
        let doc = GeoJson::from_value(&stops()).unwrap();
        let first = doc.features()[0];
        assert_eq!(first.property_text("stop").as_deref(), Some("Lynnwood"));
        assert_eq!(first.property_text("name"), None);

        let feature: GeoJsonFeature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": null,
            "properties": {"stop": "", "label": 7}
        }))
        .unwrap();
        assert_eq!(feature.property_text("stop"), None);
        assert_eq!(feature.property_text("label").as_deref(), Some("7"));
        assert_eq!(feature.point(), None);
    }

    #[test]
    fn test_rejects_non_geojson() {
        assert!(GeoJson::from_value(&json!({"type": "Topology"})).is_err());
    }
}
