pub mod spec;
pub mod story;

pub use spec::{geojson_source, LayerKind, LayerSpec};
pub use story::story_layers;
