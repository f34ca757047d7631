//! Prelude module for common scrollmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use scrollmap::prelude::*;`

pub use crate::core::{
    config::{DataConfig, FitOptions, MapOptions, ScrollOptions, StoryConfig},
    configurator::MapConfigurator,
    geo::{LatLng, LatLngBounds},
    story::{StoryApp, StoryContext},
};

pub use crate::data::{
    geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry},
    loader::{load_story_data, Dataset, DocumentFetcher, HttpFetcher, LoadCause, StoryData},
};

pub use crate::input::{
    Direction, EventBus, EventHandled, EventKind, FeatureClick, StepEvent, StoryEvent,
};

pub use crate::layers::{story_layers, LayerKind, LayerSpec};

pub use crate::scene::{SceneController, SceneDescriptor, SceneTable};

pub use crate::traits::{CoverOverlay, FitBounds, FlyTo, MapRenderer, ScrollObserver, Visibility};

pub use crate::ui::popup::{Popup, PopupContent};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
