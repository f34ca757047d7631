use crate::{
    core::constants::BUILDING_LAYER_IDS,
    input::events::{Direction, EventHandled, StepEvent},
    scene::table::SceneTable,
    traits::{CoverOverlay, MapRenderer, Visibility},
};

/// Scene whose enter/exit also drives the cover overlay
pub const COVER_SCENE_INDEX: usize = 0;

/// Turns step events into camera moves and building visibility changes
#[derive(Debug, Clone, PartialEq)]
pub struct SceneController {
    table: SceneTable,
}

impl SceneController {
    pub fn new(table: SceneTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SceneTable {
        &self.table
    }

    /// Applies the scene's pose. Indices without a descriptor are ignored.
    pub fn enter<R, V>(&self, step: StepEvent, renderer: &mut R, cover: &mut V) -> EventHandled
    where
        R: MapRenderer + ?Sized,
        V: CoverOverlay + ?Sized,
    {
        let Some(scene) = self.table.get(step.index) else {
            log::trace!("no scene for step {}", step.index);
            return EventHandled::NotHandled;
        };

        log::debug!(
            "enter scene {} ({:?}): zoom {} pitch {} buildings {}",
            scene.index,
            step.direction,
            scene.zoom,
            scene.pitch,
            scene.buildings_visible
        );

        if scene.index == COVER_SCENE_INDEX {
            cover.set_visible(false);
        }
        set_buildings_visibility(renderer, scene.buildings_visible);
        renderer.fly_to(&scene.camera());

        EventHandled::Handled
    }

    /// Leaving the first scene upwards brings the cover back
    pub fn exit<V>(&self, step: StepEvent, cover: &mut V) -> EventHandled
    where
        V: CoverOverlay + ?Sized,
    {
        if step.index != COVER_SCENE_INDEX {
            return EventHandled::NotHandled;
        }

        let visible = step.direction != Direction::Down;
        log::debug!("exit scene {} ({:?}), cover visible: {}", step.index, step.direction, visible);
        cover.set_visible(visible);

        EventHandled::Handled
    }
}

impl Default for SceneController {
    fn default() -> Self {
        Self::new(SceneTable::default())
    }
}

/// Shows or hides the building fill and outline together.
/// Layers that are not on the map yet are skipped.
pub fn set_buildings_visibility<R>(renderer: &mut R, visible: bool)
where
    R: MapRenderer + ?Sized,
{
    let visibility = Visibility::from_visible(visible);
    for id in BUILDING_LAYER_IDS {
        if renderer.has_layer(id) {
            renderer.set_layer_visibility(id, visibility);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::constants::{BUILDINGS_SOURCE_ID, STOPS_SOURCE_ID},
        layers::story_layers,
        recording::{RecordingOverlay, RecordingRenderer, RendererCommand},
    };
    use serde_json::json;

    fn configured_renderer() -> RecordingRenderer {
        let mut renderer = RecordingRenderer::new();
        for id in [BUILDINGS_SOURCE_ID, STOPS_SOURCE_ID] {
            renderer.add_source(id, &json!({"type": "FeatureCollection", "features": []})).unwrap();
        }
        for layer in story_layers() {
            renderer.add_layer(&layer).unwrap();
        }
        renderer.clear_commands();
        renderer
    }

    #[test]
    fn test_enter_each_scene() {
        let controller = SceneController::default();

        for scene in controller.table().iter() {
            let mut renderer = configured_renderer();
            let mut cover = RecordingOverlay::new(true);

            let handled = controller.enter(StepEvent::new(scene.index, Direction::Down), &mut renderer, &mut cover);

            assert_eq!(handled, EventHandled::Handled);
            assert_eq!(renderer.last_fly_to(), Some(scene.camera()));
            let expected = Visibility::from_visible(scene.buildings_visible);
            assert_eq!(renderer.visibility("uwbuildings-fill"), Some(expected));
            assert_eq!(renderer.visibility("uwbuildings-outline"), Some(expected));
        }
    }

    #[test]
    fn test_enter_first_scene_hides_cover() {
        let controller = SceneController::default();
        let mut renderer = configured_renderer();
        let mut cover = RecordingOverlay::new(true);

        controller.enter(StepEvent::new(0, Direction::Up), &mut renderer, &mut cover);
        assert!(!cover.is_visible());

        let mut cover = RecordingOverlay::new(true);
        controller.enter(StepEvent::new(2, Direction::Down), &mut renderer, &mut cover);
        assert!(cover.is_visible());
        assert!(cover.history().is_empty());
    }

    #[test]
    fn test_unknown_scene_is_noop() {
        let controller = SceneController::default();
        let mut renderer = configured_renderer();
        let mut cover = RecordingOverlay::new(true);

        for index in [4, 17, usize::MAX] {
            let step = StepEvent::new(index, Direction::Down);
            assert_eq!(controller.enter(step, &mut renderer, &mut cover), EventHandled::NotHandled);
            assert_eq!(controller.exit(step, &mut cover), EventHandled::NotHandled);
        }

        assert!(renderer.commands().is_empty());
        assert!(cover.history().is_empty());
    }

    #[test]
    fn test_exit_first_scene_by_direction() {
        let controller = SceneController::default();

        let mut cover = RecordingOverlay::new(false);
        controller.exit(StepEvent::new(0, Direction::Down), &mut cover);
        assert!(!cover.is_visible());

        controller.exit(StepEvent::new(0, Direction::Up), &mut cover);
        assert!(cover.is_visible());

        let mut untouched = RecordingOverlay::new(false);
        for index in 1..4 {
            controller.exit(StepEvent::new(index, Direction::Up), &mut untouched);
        }
        assert!(untouched.history().is_empty());
    }

    #[test]
    fn test_visibility_skips_missing_layers() {
        let mut renderer = RecordingRenderer::new();
        set_buildings_visibility(&mut renderer, true);
        assert!(renderer.commands().is_empty());
    }

    #[test]
    fn test_visibility_toggle_is_idempotent() {
        let mut renderer = configured_renderer();
        for visible in [true, false, true, false] {
            set_buildings_visibility(&mut renderer, visible);
        }

        assert_eq!(renderer.visibility("uwbuildings-fill"), Some(Visibility::None));
        assert_eq!(renderer.visibility("uwbuildings-outline"), Some(Visibility::None));
        let toggles = renderer
            .commands()
            .iter()
            .filter(|c| matches!(c, RendererCommand::SetVisibility { .. }))
            .count();
        assert_eq!(toggles, 8);
    }
}
