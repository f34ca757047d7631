//! The fixed style of the story map

use super::spec::{LayerKind, LayerSpec};
use crate::core::constants::*;
use serde_json::json;

/// Story layers in the order they are added: buildings below stops, labels on top.
pub fn story_layers() -> Vec<LayerSpec> {
    vec![
        LayerSpec::new(BUILDINGS_FILL_LAYER_ID, LayerKind::Fill, BUILDINGS_SOURCE_ID)
            .hidden()
            .paint("fill-color", json!("#6c757d"))
            .paint("fill-opacity", json!(0.25)),
        LayerSpec::new(BUILDINGS_OUTLINE_LAYER_ID, LayerKind::Line, BUILDINGS_SOURCE_ID)
            .hidden()
            .paint("line-color", json!("#343a40"))
            .paint("line-width", json!(1.5)),
        LayerSpec::new(STOPS_CIRCLE_LAYER_ID, LayerKind::Circle, STOPS_SOURCE_ID)
            .paint("circle-radius", json!(8))
            .paint("circle-color", json!("#b31237"))
            .paint("circle-stroke-color", json!("#ffffff"))
            .paint("circle-stroke-width", json!(2)),
        LayerSpec::new(STOPS_LABEL_LAYER_ID, LayerKind::Symbol, STOPS_SOURCE_ID)
            .layout("text-field", json!(["get", "label"]))
            .layout("text-size", json!(14))
            .layout("text-offset", json!([0, 1.3]))
            .layout("text-anchor", json!("top"))
            .paint("text-color", json!("#111111"))
            .paint("text-halo-color", json!("#ffffff"))
            .paint("text-halo-width", json!(2)),
    ]
}
