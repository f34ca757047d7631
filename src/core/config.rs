//! Configuration for a story map
//!
//! Every knob has a default matching the published story, so an empty JSON
//! object (`{}`) is a complete configuration. Hosts usually override only the
//! access token and the data base URL.

use crate::{
    core::constants::*,
    core::geo::LatLng,
    scene::table::SceneTable,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub map: MapOptions,
    pub data: DataConfig,
    pub scroll: ScrollOptions,
    pub fit: FitOptions,
    /// Element id of the intro overlay hidden by the first scene
    pub cover_element_id: String,
    pub scenes: SceneTable,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            map: MapOptions::default(),
            data: DataConfig::default(),
            scroll: ScrollOptions::default(),
            fit: FitOptions::default(),
            cover_element_id: DEFAULT_COVER_ELEMENT_ID.to_string(),
            scenes: SceneTable::default(),
        }
    }
}

impl StoryConfig {
    /// Parses a JSON configuration; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: StoryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.scroll.offset) {
            return Err(MapError::Config(format!(
                "scroll offset must be within [0, 1], got {}",
                self.scroll.offset
            )));
        }
        if !self.map.center.is_valid() {
            return Err(MapError::Config(format!(
                "initial center {:?} is out of range",
                self.map.center
            )));
        }
        self.scenes.validate()
    }
}

/// Renderer construction options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub container: String,
    pub style: String,
    pub access_token: Option<String>,
    pub center: LatLng,
    pub zoom: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            container: DEFAULT_MAP_CONTAINER.to_string(),
            style: DEFAULT_MAP_STYLE.to_string(),
            access_token: None,
            center: LatLng::from_lng_lat(DEFAULT_INITIAL_CENTER),
            zoom: DEFAULT_INITIAL_ZOOM,
        }
    }
}

impl MapOptions {
    /// Options object for the `mapboxgl.Map` constructor
    pub fn to_json(&self) -> Value {
        json!({
            "container": self.container,
            "style": self.style,
            "center": self.center.to_lng_lat(),
            "zoom": self.zoom,
        })
    }
}

/// Where the two story datasets live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Base that relative paths are resolved against. In the browser this is the page URL.
    pub base_url: Option<String>,
    pub stops_path: String,
    pub buildings_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            stops_path: DEFAULT_STOPS_PATH.to_string(),
            buildings_path: DEFAULT_BUILDINGS_PATH.to_string(),
        }
    }
}

/// Scroll observer setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollOptions {
    pub step_selector: String,
    /// Trigger line as a fraction of viewport height
    pub offset: f64,
    pub debug: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            step_selector: DEFAULT_STEP_SELECTOR.to_string(),
            offset: DEFAULT_STEP_OFFSET,
            debug: false,
        }
    }
}

impl ScrollOptions {
    /// Options object for `scroller.setup`
    pub fn to_json(&self) -> Value {
        json!({
            "step": self.step_selector,
            "offset": self.offset,
            "debug": self.debug,
        })
    }
}

/// Initial framing of all stops once the layers are in place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    pub enabled: bool,
    pub padding: f64,
    pub duration_ms: u32,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            padding: DEFAULT_FIT_PADDING,
            duration_ms: DEFAULT_FIT_DURATION_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = StoryConfig::from_json_str("{}").unwrap();
        assert_eq!(config, StoryConfig::default());
        assert_eq!(config.scenes.len(), 4);
        assert_eq!(config.scroll.offset, 0.33);
        assert_eq!(config.data.stops_path, "data/stops.geojson");
    }

    #[test]
    fn test_partial_override() {
        let config = StoryConfig::from_json_str(
            r#"{"map": {"access_token": "pk.test"}, "data": {"base_url": "https://example.org/story/"}}"#,
        )
        .unwrap();
        assert_eq!(config.map.access_token.as_deref(), Some("pk.test"));
        assert_eq!(config.map.style, DEFAULT_MAP_STYLE);
        assert_eq!(config.data.base_url.as_deref(), Some("https://example.org/story/"));
        assert_eq!(config.data.buildings_path, DEFAULT_BUILDINGS_PATH);
    }

    #[test]
    fn test_round_trip() {
        let config = StoryConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = StoryConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed.map.style, config.map.style);
        assert_eq!(parsed.cover_element_id, config.cover_element_id);
        assert_eq!(parsed.scroll.step_selector, config.scroll.step_selector);
        let indices: Vec<usize> = parsed.scenes.iter().map(|scene| scene.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_rejects_offset_out_of_range() {
        let err = StoryConfig::from_json_str(r#"{"scroll": {"offset": 1.5}}"#).unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = StoryConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, MapError::Serialization(_)));
    }

    #[test]
    fn test_scroll_options_json() {
        assert_eq!(
            ScrollOptions::default().to_json(),
            json!({"step": ".scene", "offset": 0.33, "debug": false})
        );
    }

    #[test]
    fn test_map_options_json() {
        let options = MapOptions::default().to_json();
        assert_eq!(options["center"], json!([-122.3032, 47.6555]));
        assert_eq!(options["style"], json!("mapbox://styles/mapbox/light-v10"));
        assert!(options.get("access_token").is_none());
    }
}
