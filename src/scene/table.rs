use crate::{
    core::{constants::DEFAULT_FLY_SPEED, geo::LatLng},
    prelude::HashSet,
    traits::FlyTo,
    MapError, Result,
};
use serde::{Deserialize, Serialize};

fn default_speed() -> f64 {
    DEFAULT_FLY_SPEED
}

/// Camera pose and building visibility for one narrative section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    /// Zero-based position of the section in the page
    pub index: usize,
    pub center: LatLng,
    pub zoom: f64,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default)]
    pub buildings_visible: bool,
}

impl SceneDescriptor {
    pub fn new(index: usize, center: LatLng, zoom: f64, pitch: f64, buildings_visible: bool) -> Self {
        Self {
            index,
            center,
            zoom,
            pitch,
            speed: DEFAULT_FLY_SPEED,
            buildings_visible,
        }
    }

    pub fn camera(&self) -> FlyTo {
        FlyTo {
            center: self.center,
            zoom: self.zoom,
            pitch: self.pitch,
            speed: self.speed,
        }
    }
}

/// Scene index → descriptor lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneTable {
    scenes: Vec<SceneDescriptor>,
}

impl SceneTable {
    pub fn new(scenes: Vec<SceneDescriptor>) -> Result<Self> {
        let table = Self { scenes };
        table.validate()?;
        Ok(table)
    }

    /// Every index must be unique and every center in range
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::default();
        for scene in &self.scenes {
            if !seen.insert(scene.index) {
                return Err(MapError::Config(format!(
                    "scene index {} is defined more than once",
                    scene.index
                )));
            }
            if !scene.center.is_valid() {
                return Err(MapError::Config(format!(
                    "scene {} center {:?} is out of range",
                    scene.index, scene.center
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&SceneDescriptor> {
        self.scenes.iter().find(|scene| scene.index == index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneDescriptor> {
        self.scenes.iter()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl Default for SceneTable {
    /// Commute, campus, study zone, wrap-up
    fn default() -> Self {
        Self {
            scenes: vec![
                SceneDescriptor::new(0, LatLng::new(47.8490, -122.2509), 12.0, 0.0, false),
                SceneDescriptor::new(1, LatLng::new(47.655548, -122.3032), 15.0, 35.0, true),
                SceneDescriptor::new(2, LatLng::new(47.6564806, -122.3103636), 16.0, 45.0, true),
                SceneDescriptor::new(3, LatLng::new(47.656, -122.305), 13.0, 0.0, false),
            ],
        }
    }
}
