//! Seams between the story logic and the outside world
//!
//! The story never talks to a map engine, a scroll library or the DOM
//! directly. It drives them through the narrow command interfaces below,
//! which the browser bindings implement on top of mapbox-gl and scrollama
//! and which [`crate::recording`] implements for tests and headless previews.

use crate::{
    core::{
        config::ScrollOptions,
        geo::{LatLng, LatLngBounds},
    },
    layers::spec::LayerSpec,
    ui::popup::Popup,
    Result,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Layout visibility of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    None,
}

impl Visibility {
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            Visibility::Visible
        } else {
            Visibility::None
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }

    /// The value of the `visibility` layout property
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::None => "none",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Animated camera transition request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyTo {
    pub center: LatLng,
    pub zoom: f64,
    pub pitch: f64,
    pub speed: f64,
}

impl FlyTo {
    /// Options object for `map.flyTo`
    pub fn to_json(&self) -> Value {
        json!({
            "center": self.center.to_lng_lat(),
            "zoom": self.zoom,
            "pitch": self.pitch,
            "speed": self.speed,
        })
    }
}

/// Request to frame a region of the map
#[derive(Debug, Clone, PartialEq)]
pub struct FitBounds {
    pub bounds: LatLngBounds,
    pub padding: f64,
    pub duration_ms: u32,
}

impl FitBounds {
    /// Options object for `map.fitBounds`, the bounds go in the first argument
    pub fn options_json(&self) -> Value {
        json!({
            "padding": self.padding,
            "duration": self.duration_ms,
        })
    }
}

/// Command interface of the map rendering engine.
///
/// Registering a source or layer twice is an error in the engine, so callers
/// must only do it once per id.
pub trait MapRenderer {
    /// Registers a GeoJSON document under `id`. The document is passed through untouched.
    fn add_source(&mut self, id: &str, data: &Value) -> Result<()>;

    fn add_layer(&mut self, layer: &LayerSpec) -> Result<()>;

    fn has_layer(&self, id: &str) -> bool;

    /// Starts reporting clicks on features of `layer_id` as feature-click events
    fn listen_clicks(&mut self, layer_id: &str) -> Result<()>;

    fn set_layer_visibility(&mut self, id: &str, visibility: Visibility);

    /// Best effort and non-blocking; a later request supersedes this one.
    fn fly_to(&mut self, target: &FlyTo);

    fn fit_bounds(&mut self, fit: &FitBounds);

    fn show_popup(&mut self, popup: &Popup);
}

/// Scroll-position observer that reports step enter/exit events
pub trait ScrollObserver {
    /// Starts observing the step elements. The host reports step enter/exit
    /// and window resize events from here on.
    fn setup(&mut self, options: &ScrollOptions) -> Result<()>;

    /// Recomputes step positions after a viewport resize
    fn resize(&mut self);
}

/// The intro element covering the map before the first scene
pub trait CoverOverlay {
    fn set_visible(&mut self, visible: bool);
}
