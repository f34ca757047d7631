//! Story-wide identifiers and defaults.
//! Keeping them in a single place makes it easier to retarget the story at new data.

/// Source id for the stop points.
pub const STOPS_SOURCE_ID: &str = "stops-src";

/// Source id for the building footprints.
pub const BUILDINGS_SOURCE_ID: &str = "uwbuildings-src";

/// Building footprint fill, hidden until a campus scene.
pub const BUILDINGS_FILL_LAYER_ID: &str = "uwbuildings-fill";

/// Building footprint outline, toggled together with the fill.
pub const BUILDINGS_OUTLINE_LAYER_ID: &str = "uwbuildings-outline";

/// Clickable stop markers.
pub const STOPS_CIRCLE_LAYER_ID: &str = "stops-circle";

/// Text labels drawn under each stop.
pub const STOPS_LABEL_LAYER_ID: &str = "stops-label";

/// The pair of layers that scene changes show and hide together.
pub const BUILDING_LAYER_IDS: [&str; 2] = [BUILDINGS_FILL_LAYER_ID, BUILDINGS_OUTLINE_LAYER_ID];

pub const DEFAULT_STOPS_PATH: &str = "data/stops.geojson";
pub const DEFAULT_BUILDINGS_PATH: &str = "data/uw_buildings.geojson";

pub const DEFAULT_MAP_CONTAINER: &str = "map";
pub const DEFAULT_MAP_STYLE: &str = "mapbox://styles/mapbox/light-v10";

/// Initial view before any scene is entered, as `[lng, lat]`.
pub const DEFAULT_INITIAL_CENTER: [f64; 2] = [-122.3032, 47.6555];
pub const DEFAULT_INITIAL_ZOOM: f64 = 12.0;

pub const DEFAULT_STEP_SELECTOR: &str = ".scene";

/// Trigger line position as a fraction of viewport height.
pub const DEFAULT_STEP_OFFSET: f64 = 0.33;

pub const DEFAULT_COVER_ELEMENT_ID: &str = "cover";

/// Camera speed shared by every scene transition.
pub const DEFAULT_FLY_SPEED: f64 = 0.6;

pub const DEFAULT_FIT_PADDING: f64 = 80.0;
pub const DEFAULT_FIT_DURATION_MS: u32 = 800;
