//! The story application: owned collaborators plus event routing
//!
//! `StoryApp` is constructed once at startup with the renderer, the scroll
//! observer and the cover overlay it will drive for the lifetime of the page.
//! Startup is `bootstrap` (load both datasets) followed by the host
//! forwarding renderer and scroll callbacks to `dispatch`.

use crate::{
    core::{config::StoryConfig, configurator::MapConfigurator},
    data::loader::{load_story_data, DocumentFetcher, StoryData},
    input::{
        bus::EventBus,
        events::{EventHandled, EventKind, StoryEvent},
    },
    scene::controller::SceneController,
    traits::{CoverOverlay, MapRenderer, ScrollObserver},
    ui::popup::Popup,
    Result,
};

/// State shared by every event handler
pub struct StoryContext<R, O, V> {
    pub config: StoryConfig,
    pub renderer: R,
    pub observer: O,
    pub cover: V,
    pub data: Option<StoryData>,
    pub configurator: MapConfigurator,
    pub scenes: SceneController,
}

pub struct StoryApp<R, O, V> {
    context: StoryContext<R, O, V>,
    bus: EventBus<StoryContext<R, O, V>>,
}

impl<R, O, V> StoryApp<R, O, V>
where
    R: MapRenderer + 'static,
    O: ScrollObserver + 'static,
    V: CoverOverlay + 'static,
{
    pub fn new(config: StoryConfig, renderer: R, observer: O, cover: V) -> Self {
        let scenes = SceneController::new(config.scenes.clone());
        let context = StoryContext {
            config,
            renderer,
            observer,
            cover,
            data: None,
            configurator: MapConfigurator::new(),
            scenes,
        };

        let mut app = Self {
            context,
            bus: EventBus::new(),
        };
        app.register_builtin_handlers();
        app
    }

    fn register_builtin_handlers(&mut self) {
        self.bus.subscribe(EventKind::Ready, |ctx: &mut StoryContext<R, O, V>, _| {
            ctx.configurator.configure(
                &mut ctx.renderer,
                &mut ctx.observer,
                ctx.data.as_ref(),
                &ctx.config,
            )?;
            Ok(EventHandled::Handled)
        });

        self.bus.subscribe(EventKind::StepEnter, |ctx: &mut StoryContext<R, O, V>, event| {
            Ok(match event {
                StoryEvent::StepEnter(step) => {
                    ctx.scenes.enter(*step, &mut ctx.renderer, &mut ctx.cover)
                }
                _ => EventHandled::NotHandled,
            })
        });

        self.bus.subscribe(EventKind::StepExit, |ctx: &mut StoryContext<R, O, V>, event| {
            Ok(match event {
                StoryEvent::StepExit(step) => ctx.scenes.exit(*step, &mut ctx.cover),
                _ => EventHandled::NotHandled,
            })
        });

        self.bus.subscribe(EventKind::FeatureClick, |ctx: &mut StoryContext<R, O, V>, event| {
            let StoryEvent::FeatureClick(click) = event else {
                return Ok(EventHandled::NotHandled);
            };
            match Popup::from_click(click) {
                Some(popup) => {
                    ctx.renderer.show_popup(&popup);
                    Ok(EventHandled::Handled)
                }
                None => {
                    log::warn!("click without a position, no popup shown");
                    Ok(EventHandled::NotHandled)
                }
            }
        });

        self.bus.subscribe(EventKind::Resize, |ctx: &mut StoryContext<R, O, V>, _| {
            ctx.observer.resize();
            Ok(EventHandled::Handled)
        });
    }

    /// Loads both datasets. On failure nothing is kept and the map is never configured.
    pub async fn bootstrap(&mut self, fetcher: &dyn DocumentFetcher) -> Result<()> {
        let data = load_story_data(fetcher, &self.context.config.data).await?;
        self.context.data = Some(data);
        Ok(())
    }

    /// Adds a handler that runs after the built-in ones for `kind`
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut StoryContext<R, O, V>, &StoryEvent) -> Result<EventHandled> + 'static,
    {
        self.bus.subscribe(kind, handler);
    }

    pub fn dispatch(&mut self, event: StoryEvent) -> Result<EventHandled> {
        log::trace!("dispatch {}", event.kind());
        self.bus.dispatch(&mut self.context, &event)
    }

    pub fn config(&self) -> &StoryConfig {
        &self.context.config
    }

    pub fn data(&self) -> Option<&StoryData> {
        self.context.data.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.context.data.is_some()
    }

    pub fn is_configured(&self) -> bool {
        self.context.configurator.is_configured()
    }

    pub fn renderer(&self) -> &R {
        &self.context.renderer
    }

    pub fn observer(&self) -> &O {
        &self.context.observer
    }

    pub fn cover(&self) -> &V {
        &self.context.cover
    }
}
