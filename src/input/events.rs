use crate::{core::geo::LatLng, data::geojson::GeoJsonFeature};
use serde::{Deserialize, Serialize};

/// Scroll direction reported with a step event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Parses the observer's direction string. Anything but `"down"` counts as up.
    pub fn from_observer(direction: &str) -> Self {
        if direction == "down" {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

/// Payload of a step enter/exit callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvent {
    pub index: usize,
    pub direction: Direction,
}

impl StepEvent {
    pub fn new(index: usize, direction: Direction) -> Self {
        Self { index, direction }
    }
}

/// A click on a stop marker
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureClick {
    /// The first feature under the pointer, if the renderer reported one
    pub feature: Option<GeoJsonFeature>,
    /// Pointer position, used when the feature has no point geometry
    pub lng_lat: Option<LatLng>,
}

impl FeatureClick {
    pub fn new(feature: Option<GeoJsonFeature>, lng_lat: Option<LatLng>) -> Self {
        Self { feature, lng_lat }
    }

    /// Where to anchor the popup: the feature's own point, else the pointer
    pub fn anchor(&self) -> Option<LatLng> {
        self.feature
            .as_ref()
            .and_then(|feature| feature.point())
            .or(self.lng_lat)
    }
}

/// Everything the story reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum StoryEvent {
    /// The renderer finished its own setup
    Ready,
    StepEnter(StepEvent),
    StepExit(StepEvent),
    FeatureClick(FeatureClick),
    /// Window resized
    Resize,
}

/// Discriminant used to subscribe to one kind of [`StoryEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Ready,
    StepEnter,
    StepExit,
    FeatureClick,
    Resize,
}

impl StoryEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            StoryEvent::Ready => EventKind::Ready,
            StoryEvent::StepEnter(_) => EventKind::StepEnter,
            StoryEvent::StepExit(_) => EventKind::StepExit,
            StoryEvent::FeatureClick(_) => EventKind::FeatureClick,
            StoryEvent::Resize => EventKind::Resize,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Ready => write!(f, "ready"),
            EventKind::StepEnter => write!(f, "step-enter"),
            EventKind::StepExit => write!(f, "step-exit"),
            EventKind::FeatureClick => write!(f, "feature-click"),
            EventKind::Resize => write!(f, "resize"),
        }
    }
}

/// Whether a dispatched event reached any handler
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}
