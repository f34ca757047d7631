pub mod controller;
pub mod table;

pub use controller::{set_buildings_visibility, SceneController, COVER_SCENE_INDEX};
pub use table::{SceneDescriptor, SceneTable};
