//! # scrollmap
//!
//! Scroll-driven narrative maps. As the reader scrolls through the text
//! scenes of a page, the map flies between fixed camera poses and shows or
//! hides the building footprints that belong to each scene.
//!
//! The story logic is independent of the host. A map engine, a scroll
//! observer and the cover overlay are reached through the traits in
//! [`traits`]; with the `wasm` feature the [`web`] module binds them to
//! mapbox-gl and scrollama in the browser.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod recording;
pub mod scene;
pub mod traits;
pub mod ui;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod web;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::StoryConfig,
    configurator::MapConfigurator,
    geo::{LatLng, LatLngBounds},
    story::{StoryApp, StoryContext},
};

pub use data::{
    geojson::{GeoJson, GeoJsonFeature},
    loader::{DocumentFetcher, HttpFetcher, LoadCause, StoryData},
};

pub use input::{Direction, EventBus, EventHandled, EventKind, FeatureClick, StepEvent, StoryEvent};

pub use layers::{LayerKind, LayerSpec};

pub use scene::{SceneController, SceneDescriptor, SceneTable};

pub use traits::{CoverOverlay, FitBounds, FlyTo, MapRenderer, ScrollObserver, Visibility};

pub use ui::popup::{Popup, PopupContent};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// A story dataset could not be fetched
    #[error("Failed to load {path}{}", .cause.message_suffix())]
    Load { path: String, cause: LoadCause },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Story data has not been loaded")]
    NotLoaded,

    #[error("Map is already configured")]
    AlreadyConfigured,

    #[error("Renderer error: {0}")]
    Renderer(String),
}

/// Error type alias for convenience
pub type Error = MapError;
