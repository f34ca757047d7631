use crate::{traits::Visibility, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Drawing rule of a style layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Fill,
    Line,
    Circle,
    Symbol,
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerKind::Fill => write!(f, "fill"),
            LayerKind::Line => write!(f, "line"),
            LayerKind::Circle => write!(f, "circle"),
            LayerKind::Symbol => write!(f, "symbol"),
        }
    }
}

/// A style layer declaration, serialized in the renderer's style-spec shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub source: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub layout: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub paint: Map<String, Value>,
}

impl LayerSpec {
    pub fn new(id: impl Into<String>, kind: LayerKind, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            source: source.into(),
            layout: Map::new(),
            paint: Map::new(),
        }
    }

    pub fn layout(mut self, property: &str, value: Value) -> Self {
        self.layout.insert(property.to_string(), value);
        self
    }

    pub fn paint(mut self, property: &str, value: Value) -> Self {
        self.paint.insert(property.to_string(), value);
        self
    }

    /// Starts the layer with `visibility: none`
    pub fn hidden(self) -> Self {
        self.layout("visibility", json!(Visibility::None.as_str()))
    }

    /// Visibility the layer has when added; layers without the property are visible
    pub fn initial_visibility(&self) -> Visibility {
        match self.layout.get("visibility").and_then(Value::as_str) {
            Some("none") => Visibility::None,
            _ => Visibility::Visible,
        }
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Source declaration wrapping an inline GeoJSON document
pub fn geojson_source(data: &Value) -> Value {
    json!({
        "type": "geojson",
        "data": data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_json_shape() {
        let layer = LayerSpec::new("fill", LayerKind::Fill, "src")
            .hidden()
            .paint("fill-color", json!("#6c757d"));

        assert_eq!(
            layer.to_json().unwrap(),
            json!({
                "id": "fill",
                "type": "fill",
                "source": "src",
                "layout": {"visibility": "none"},
                "paint": {"fill-color": "#6c757d"}
            })
        );
    }

    #[test]
    fn test_empty_layout_omitted() {
        let layer = LayerSpec::new("dots", LayerKind::Circle, "src");
        let json = layer.to_json().unwrap();
        assert!(json.get("layout").is_none());
        assert!(json.get("paint").is_none());
        assert_eq!(layer.initial_visibility(), Visibility::Visible);
    }

    #[test]
    fn test_geojson_source() {
        let data = json!({"type": "FeatureCollection", "features": []});
        assert_eq!(geojson_source(&data)["type"], json!("geojson"));
        assert_eq!(geojson_source(&data)["data"], data);
    }
}
