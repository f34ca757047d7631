//! In-memory implementations of the host seams
//!
//! The recording renderer keeps the same bookkeeping the real engine does
//! (sources, layers, layout visibility) and rejects the same mistakes
//! (duplicate ids, layers on unknown sources), while logging every command
//! it receives. Tests assert against that log and the headless preview
//! prints it.

use crate::{
    core::config::ScrollOptions,
    data::loader::{DocumentFetcher, LoadCause},
    layers::spec::{LayerKind, LayerSpec},
    prelude::HashMap,
    traits::{CoverOverlay, FitBounds, FlyTo, MapRenderer, ScrollObserver, Visibility},
    ui::popup::Popup,
    MapError, Result,
};
use async_trait::async_trait;
use serde_json::Value;
use std::cell::RefCell;

/// One command received by a [`RecordingRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub enum RendererCommand {
    AddSource { id: String },
    AddLayer { id: String, kind: LayerKind },
    ListenClicks { layer: String },
    SetVisibility { id: String, visibility: Visibility },
    FlyTo(FlyTo),
    FitBounds(FitBounds),
    ShowPopup(Popup),
}

impl std::fmt::Display for RendererCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RendererCommand::AddSource { id } => write!(f, "add-source {}", id),
            RendererCommand::AddLayer { id, kind } => write!(f, "add-layer {} ({})", id, kind),
            RendererCommand::ListenClicks { layer } => write!(f, "listen-clicks {}", layer),
            RendererCommand::SetVisibility { id, visibility } => {
                write!(f, "set-visibility {} {}", id, visibility)
            }
            RendererCommand::FlyTo(target) => write!(
                f,
                "fly-to [{:.6}, {:.6}] zoom {} pitch {} speed {}",
                target.center.lng, target.center.lat, target.zoom, target.pitch, target.speed
            ),
            RendererCommand::FitBounds(fit) => {
                let [sw, ne] = fit.bounds.to_lng_lat_pair();
                write!(
                    f,
                    "fit-bounds [{:.6}, {:.6}]..[{:.6}, {:.6}] padding {} duration {}ms",
                    sw[0], sw[1], ne[0], ne[1], fit.padding, fit.duration_ms
                )
            }
            RendererCommand::ShowPopup(popup) => write!(
                f,
                "show-popup [{:.6}, {:.6}] {}",
                popup.position.lng,
                popup.position.lat,
                popup.html()
            ),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<RendererCommand>,
    sources: HashMap<String, Value>,
    layers: HashMap<String, Visibility>,
    layer_order: Vec<String>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RendererCommand] {
        &self.commands
    }

    /// Forgets the command log but keeps sources and layers
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn source(&self, id: &str) -> Option<&Value> {
        self.sources.get(id)
    }

    /// Layer ids in the order they were added
    pub fn layer_ids(&self) -> &[String] {
        &self.layer_order
    }

    pub fn visibility(&self, id: &str) -> Option<Visibility> {
        self.layers.get(id).copied()
    }

    pub fn last_fly_to(&self) -> Option<FlyTo> {
        self.commands.iter().rev().find_map(|command| match command {
            RendererCommand::FlyTo(target) => Some(*target),
            _ => None,
        })
    }

    pub fn popups(&self) -> Vec<&Popup> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                RendererCommand::ShowPopup(popup) => Some(popup),
                _ => None,
            })
            .collect()
    }
}

impl MapRenderer for RecordingRenderer {
    fn add_source(&mut self, id: &str, data: &Value) -> Result<()> {
        if self.sources.contains_key(id) {
            return Err(MapError::Renderer(format!("source {} already exists", id)));
        }
        self.sources.insert(id.to_string(), data.clone());
        self.commands.push(RendererCommand::AddSource { id: id.to_string() });
        Ok(())
    }

    fn add_layer(&mut self, layer: &LayerSpec) -> Result<()> {
        if self.layers.contains_key(&layer.id) {
            return Err(MapError::Renderer(format!("layer {} already exists", layer.id)));
        }
        if !self.sources.contains_key(&layer.source) {
            return Err(MapError::Renderer(format!(
                "layer {} references unknown source {}",
                layer.id, layer.source
            )));
        }
        self.layers.insert(layer.id.clone(), layer.initial_visibility());
        self.layer_order.push(layer.id.clone());
        self.commands.push(RendererCommand::AddLayer {
            id: layer.id.clone(),
            kind: layer.kind,
        });
        Ok(())
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.contains_key(id)
    }

    fn listen_clicks(&mut self, layer_id: &str) -> Result<()> {
        if !self.layers.contains_key(layer_id) {
            return Err(MapError::Renderer(format!("no layer {} to listen on", layer_id)));
        }
        self.commands.push(RendererCommand::ListenClicks {
            layer: layer_id.to_string(),
        });
        Ok(())
    }

    fn set_layer_visibility(&mut self, id: &str, visibility: Visibility) {
        if let Some(current) = self.layers.get_mut(id) {
            *current = visibility;
            self.commands.push(RendererCommand::SetVisibility {
                id: id.to_string(),
                visibility,
            });
        }
    }

    fn fly_to(&mut self, target: &FlyTo) {
        self.commands.push(RendererCommand::FlyTo(*target));
    }

    fn fit_bounds(&mut self, fit: &FitBounds) {
        self.commands.push(RendererCommand::FitBounds(fit.clone()));
    }

    fn show_popup(&mut self, popup: &Popup) {
        self.commands.push(RendererCommand::ShowPopup(popup.clone()));
    }
}

/// Scroll observer that remembers how it was set up
#[derive(Debug, Default)]
pub struct RecordingObserver {
    setups: Vec<ScrollOptions>,
    resizes: usize,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn setups(&self) -> &[ScrollOptions] {
        &self.setups
    }

    pub fn resize_count(&self) -> usize {
        self.resizes
    }
}

impl ScrollObserver for RecordingObserver {
    fn setup(&mut self, options: &ScrollOptions) -> Result<()> {
        self.setups.push(options.clone());
        Ok(())
    }

    fn resize(&mut self) {
        self.resizes += 1;
    }
}

/// Cover overlay that tracks every visibility change
#[derive(Debug, Clone)]
pub struct RecordingOverlay {
    visible: bool,
    history: Vec<bool>,
}

impl RecordingOverlay {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            history: Vec::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn history(&self) -> &[bool] {
        &self.history
    }
}

impl Default for RecordingOverlay {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CoverOverlay for RecordingOverlay {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.history.push(visible);
    }
}

/// Fetcher serving canned documents; unknown paths answer 404
#[derive(Debug, Default)]
pub struct StaticFetcher {
    responses: HashMap<String, std::result::Result<Value, LoadCause>>,
    requests: RefCell<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: &str, document: Value) -> Self {
        self.responses.insert(path.to_string(), Ok(document));
        self
    }

    pub fn with_failure(mut self, path: &str, cause: LoadCause) -> Self {
        self.responses.insert(path.to_string(), Err(cause));
        self
    }

    /// Paths requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl DocumentFetcher for StaticFetcher {
    async fn fetch(&self, path: &str) -> std::result::Result<Value, LoadCause> {
        self.requests.borrow_mut().push(path.to_string());
        self.responses
            .get(path)
            .cloned()
            .unwrap_or(Err(LoadCause::Status(404)))
    }
}
