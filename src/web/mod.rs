//! Browser host: mapbox-gl, scrollama and the DOM cover behind the story traits
//!
//! JavaScript callbacks never touch the app directly. They post a
//! [`StoryEvent`] to the page's [`Dispatcher`], which queues it and drains
//! the queue whenever the app is free. Events that arrive while the datasets
//! are still loading (the map `load` event in particular) wait in the queue
//! until the app is installed.

pub mod console;
pub mod dom;
pub mod mapbox;
pub mod scrollama;

use crate::{
    core::{config::StoryConfig, story::StoryApp},
    data::loader::HttpFetcher,
    input::events::StoryEvent,
    MapError, Result,
};
use dom::DomOverlay;
use mapbox::MapboxRenderer;
use scrollama::ScrollamaObserver;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::Rc,
};
use wasm_bindgen::prelude::*;

pub type WebApp = StoryApp<MapboxRenderer, ScrollamaObserver, DomOverlay>;

/// Callback target handed to every JS listener
pub type EventSink = Rc<dyn Fn(StoryEvent)>;

#[derive(Default)]
pub struct Dispatcher {
    app: RefCell<Option<WebApp>>,
    pending: RefCell<VecDeque<StoryEvent>>,
}

impl Dispatcher {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn sink(self: &Rc<Self>) -> EventSink {
        let dispatcher = Rc::clone(self);
        Rc::new(move |event| dispatcher.post(event))
    }

    pub fn post(&self, event: StoryEvent) {
        self.pending.borrow_mut().push_back(event);
        self.drain();
    }

    pub fn install(&self, app: WebApp) {
        *self.app.borrow_mut() = Some(app);
        self.drain();
    }

    /// Drops queued events; used when startup fails
    pub fn discard_pending(&self) {
        let dropped = self.pending.borrow_mut().len();
        self.pending.borrow_mut().clear();
        if dropped > 0 {
            log::debug!("discarded {} queued events", dropped);
        }
    }

    fn drain(&self) {
        // re-entrant posts land in the queue and are picked up by the outer loop
        let Ok(mut slot) = self.app.try_borrow_mut() else {
            return;
        };
        let Some(app) = slot.as_mut() else {
            return;
        };
        loop {
            let Some(event) = self.pending.borrow_mut().pop_front() else {
                break;
            };
            let kind = event.kind();
            if let Err(e) = app.dispatch(event) {
                log::error!("{} handler failed: {}", kind, e);
            }
        }
    }
}

pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue> {
    let text = serde_json::to_string(value)?;
    js_sys::JSON::parse(&text).map_err(js_error)
}

pub(crate) fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T> {
    let text: String = js_sys::JSON::stringify(value).map_err(js_error)?.into();
    Ok(serde_json::from_str(&text)?)
}

pub(crate) fn js_error(value: JsValue) -> MapError {
    let message = value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value));
    MapError::Renderer(message)
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::init(log::LevelFilter::Info);
}

fn parse_config(config: &JsValue) -> Result<StoryConfig> {
    if config.is_undefined() || config.is_null() {
        return Ok(StoryConfig::default());
    }
    let text: String = js_sys::JSON::stringify(config).map_err(js_error)?.into();
    StoryConfig::from_json_str(&text)
}

async fn run(config: JsValue, dispatcher: &Rc<Dispatcher>) -> Result<()> {
    let mut config = parse_config(&config)?;
    if config.data.base_url.is_none() {
        config.data.base_url = web_sys::window().and_then(|window| window.location().href().ok());
    }

    let fetcher = HttpFetcher::from_config(&config.data)?;
    let renderer = MapboxRenderer::new(&config.map, dispatcher.sink())?;
    let observer = ScrollamaObserver::new(dispatcher.sink())?;
    let cover = DomOverlay::by_id(&config.cover_element_id);

    let mut app = StoryApp::new(config, renderer, observer, cover);
    app.bootstrap(&fetcher).await?;
    dispatcher.install(app);
    Ok(())
}

/// Page entry point. Creates the map, loads both datasets and starts
/// following the scroll. Failures are logged and alerted, never thrown.
#[wasm_bindgen]
pub async fn start(config: JsValue) {
    let dispatcher = Dispatcher::new();
    if let Err(e) = run(config, &dispatcher).await {
        dispatcher.discard_pending();
        log::error!("{}", e);
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&e.to_string());
        }
    }
}
