//! One-shot map setup once the renderer is ready
//!
//! The engine rejects duplicate sources and layers, so setup is guarded to
//! run at most once. The guard is set before the first command: a setup that
//! fails half way is not retried on top of the layers it already added.

use crate::{
    core::{config::StoryConfig, constants::*},
    data::loader::StoryData,
    layers::{spec::geojson_source, story::story_layers},
    traits::{FitBounds, MapRenderer, ScrollObserver},
    MapError, Result,
};

#[derive(Debug, Default)]
pub struct MapConfigurator {
    configured: bool,
}

impl MapConfigurator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Registers sources and layers, frames the stops and starts the scroll observer
    pub fn configure<R, O>(
        &mut self,
        renderer: &mut R,
        observer: &mut O,
        data: Option<&StoryData>,
        config: &StoryConfig,
    ) -> Result<()>
    where
        R: MapRenderer + ?Sized,
        O: ScrollObserver + ?Sized,
    {
        if self.configured {
            return Err(MapError::AlreadyConfigured);
        }
        let data = data.ok_or(MapError::NotLoaded)?;
        self.configured = true;

        renderer.add_source(STOPS_SOURCE_ID, &geojson_source(&data.stops.document))?;
        renderer.add_source(BUILDINGS_SOURCE_ID, &geojson_source(&data.buildings.document))?;

        for layer in story_layers() {
            log::debug!("adding layer {} ({})", layer.id, layer.kind);
            renderer.add_layer(&layer)?;
        }

        renderer.listen_clicks(STOPS_CIRCLE_LAYER_ID)?;

        if config.fit.enabled {
            fit_to_stops(renderer, data, config);
        }

        observer.setup(&config.scroll)?;

        log::info!(
            "map configured: {} layers, {} scenes",
            story_layers().len(),
            config.scenes.len()
        );
        Ok(())
    }
}

/// Frames every stop point. Skipped when there are no points to frame.
fn fit_to_stops<R>(renderer: &mut R, data: &StoryData, config: &StoryConfig)
where
    R: MapRenderer + ?Sized,
{
    let bounds = match data.stops.parse() {
        Ok(stops) => stops.point_bounds(),
        Err(e) => {
            log::warn!("cannot frame stops from {}: {}", data.stops.path, e);
            None
        }
    };

    match bounds {
        Some(bounds) => renderer.fit_bounds(&FitBounds {
            bounds,
            padding: config.fit.padding,
            duration_ms: config.fit.duration_ms,
        }),
        None => log::debug!("no stop points to frame"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::loader::Dataset,
        recording::{RecordingObserver, RecordingRenderer, RendererCommand},
        traits::Visibility,
    };
    use serde_json::json;

    fn story_data() -> StoryData {
        StoryData {
            stops: Dataset::new(
                DEFAULT_STOPS_PATH,
                json!({
                    "type": "FeatureCollection",
                    "features": [
                        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-122.2509, 47.849]}, "properties": {"stop": "Home"}},
                        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-122.3103636, 47.6564806]}, "properties": {"stop": "Odegaard"}}
                    ]
                }),
            ),
            buildings: Dataset::new(
                DEFAULT_BUILDINGS_PATH,
                json!({"type": "FeatureCollection", "features": []}),
            ),
        }
    }

    #[test]
    fn test_configure_issues_commands_in_order() {
        let mut renderer = RecordingRenderer::new();
        let mut observer = RecordingObserver::new();
        let mut configurator = MapConfigurator::new();
        let data = story_data();

        configurator
            .configure(&mut renderer, &mut observer, Some(&data), &StoryConfig::default())
            .unwrap();

        let script: Vec<String> = renderer.commands().iter().map(|c| c.to_string()).collect();
        assert_eq!(script[0], "add-source stops-src");
        assert_eq!(script[1], "add-source uwbuildings-src");
        assert_eq!(
            renderer.layer_ids(),
            ["uwbuildings-fill", "uwbuildings-outline", "stops-circle", "stops-label"]
        );
        assert_eq!(script[6], "listen-clicks stops-circle");
        assert!(matches!(renderer.commands()[7], RendererCommand::FitBounds(_)));
        assert_eq!(renderer.commands().len(), 8);

        assert_eq!(renderer.visibility("uwbuildings-fill"), Some(Visibility::None));
        assert_eq!(renderer.visibility("stops-label"), Some(Visibility::Visible));
        assert_eq!(renderer.source("stops-src").unwrap()["data"], data.stops.document);
        assert_eq!(observer.setups().len(), 1);
        assert_eq!(observer.setups()[0].offset, 0.33);
        assert!(configurator.is_configured());
    }

    #[test]
    fn test_fit_covers_all_stops() {
        let mut renderer = RecordingRenderer::new();
        let mut observer = RecordingObserver::new();
        MapConfigurator::new()
            .configure(&mut renderer, &mut observer, Some(&story_data()), &StoryConfig::default())
            .unwrap();

        let fit = renderer
            .commands()
            .iter()
            .find_map(|c| match c {
                RendererCommand::FitBounds(fit) => Some(fit.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(fit.bounds.to_lng_lat_pair(), [[-122.3103636, 47.6564806], [-122.2509, 47.849]]);
        assert_eq!(fit.padding, 80.0);
        assert_eq!(fit.duration_ms, 800);
    }

    #[test]
    fn test_fit_disabled_or_without_points() {
        let mut config = StoryConfig::default();
        config.fit.enabled = false;
        let mut renderer = RecordingRenderer::new();
        MapConfigurator::new()
            .configure(&mut renderer, &mut RecordingObserver::new(), Some(&story_data()), &config)
            .unwrap();
        assert!(!renderer.commands().iter().any(|c| matches!(c, RendererCommand::FitBounds(_))));

        let mut data = story_data();
        data.stops.document = json!({"type": "FeatureCollection", "features": []});
        let mut renderer = RecordingRenderer::new();
        MapConfigurator::new()
            .configure(&mut renderer, &mut RecordingObserver::new(), Some(&data), &StoryConfig::default())
            .unwrap();
        assert!(!renderer.commands().iter().any(|c| matches!(c, RendererCommand::FitBounds(_))));
    }

    #[test]
    fn test_second_configure_rejected() {
        let mut renderer = RecordingRenderer::new();
        let mut observer = RecordingObserver::new();
        let mut configurator = MapConfigurator::new();
        let data = story_data();
        let config = StoryConfig::default();

        configurator.configure(&mut renderer, &mut observer, Some(&data), &config).unwrap();
        let issued = renderer.commands().len();

        let err = configurator
            .configure(&mut renderer, &mut observer, Some(&data), &config)
            .unwrap_err();
        assert!(matches!(err, MapError::AlreadyConfigured));
        assert_eq!(renderer.commands().len(), issued);
        assert_eq!(observer.setups().len(), 1);
    }

    #[test]
    fn test_configure_without_data() {
        let mut renderer = RecordingRenderer::new();
        let mut configurator = MapConfigurator::new();
        let err = configurator
            .configure(&mut renderer, &mut RecordingObserver::new(), None, &StoryConfig::default())
            .unwrap_err();

        assert!(matches!(err, MapError::NotLoaded));
        assert!(renderer.commands().is_empty());
        assert!(!configurator.is_configured());
    }
}
