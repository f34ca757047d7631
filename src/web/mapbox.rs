//! mapbox-gl bindings
//!
//! Only the handful of `mapboxgl.Map` and `mapboxgl.Popup` members the story
//! uses are bound. Style objects cross the boundary as JSON.

use super::{from_js, js_error, to_js, EventSink};
use crate::{
    core::{config::MapOptions, geo::LatLng},
    data::geojson::GeoJsonFeature,
    input::events::{FeatureClick, StoryEvent},
    layers::spec::LayerSpec,
    traits::{FitBounds, FlyTo, MapRenderer, Visibility},
    ui::popup::Popup,
    MapError, Result,
};
use serde_json::{json, Value};
use wasm_bindgen::{prelude::*, JsCast};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Map)]
    type JsMap;

    #[wasm_bindgen(constructor, catch, js_namespace = mapboxgl, js_class = "Map")]
    fn new(options: &JsValue) -> std::result::Result<JsMap, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addSource)]
    fn add_source(this: &JsMap, id: &str, source: &JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addLayer)]
    fn add_layer(this: &JsMap, layer: &JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = getLayer)]
    fn get_layer(this: &JsMap, id: &str) -> JsValue;

    #[wasm_bindgen(method, js_name = setLayoutProperty)]
    fn set_layout_property(this: &JsMap, layer: &str, name: &str, value: &JsValue);

    #[wasm_bindgen(method, js_name = flyTo)]
    fn fly_to(this: &JsMap, options: &JsValue);

    #[wasm_bindgen(method, js_name = fitBounds)]
    fn fit_bounds(this: &JsMap, bounds: &JsValue, options: &JsValue);

    #[wasm_bindgen(method)]
    fn on(this: &JsMap, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_name = on)]
    fn on_layer(this: &JsMap, event: &str, layer: &str, listener: &js_sys::Function);

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Popup)]
    type JsPopup;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Popup")]
    fn new() -> JsPopup;

    #[wasm_bindgen(method, js_name = setLngLat)]
    fn set_lng_lat(this: &JsPopup, position: &JsValue) -> JsPopup;

    #[wasm_bindgen(method, js_name = setHTML)]
    fn set_html(this: &JsPopup, html: &str) -> JsPopup;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &JsPopup, map: &JsMap) -> JsPopup;
}

/// [`MapRenderer`] over a live `mapboxgl.Map`
pub struct MapboxRenderer {
    map: JsMap,
    sink: EventSink,
}

impl MapboxRenderer {
    /// Creates the map in its container. The renderer's `load` event is reported as ready.
    pub fn new(options: &MapOptions, sink: EventSink) -> Result<Self> {
        if let Some(token) = &options.access_token {
            set_access_token(token)?;
        }

        let map = JsMap::new(&to_js(&options.to_json())?).map_err(js_error)?;

        let ready_sink = sink.clone();
        let on_load = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| {
            ready_sink(StoryEvent::Ready);
        });
        map.on("load", on_load.as_ref().unchecked_ref());
        // listeners live as long as the page
        on_load.forget();

        Ok(Self { map, sink })
    }
}

fn set_access_token(token: &str) -> Result<()> {
    let mapboxgl = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("mapboxgl"))
        .map_err(js_error)?;
    if mapboxgl.is_undefined() {
        return Err(MapError::Renderer("mapboxgl is not loaded".to_string()));
    }
    js_sys::Reflect::set(&mapboxgl, &JsValue::from_str("accessToken"), &JsValue::from_str(token))
        .map_err(js_error)?;
    Ok(())
}

/// Reads the first feature and pointer position from a mapbox click event
fn click_from_event(event: &JsValue) -> FeatureClick {
    let feature = js_sys::Reflect::get(event, &JsValue::from_str("features"))
        .ok()
        .filter(|features| !features.is_undefined() && !features.is_null())
        .and_then(|features| js_sys::Reflect::get_u32(&features, 0).ok())
        .filter(|first| !first.is_undefined())
        .and_then(|first| match from_js::<GeoJsonFeature>(&first) {
            Ok(feature) => Some(feature),
            Err(e) => {
                log::warn!("unreadable clicked feature: {}", e);
                None
            }
        });

    let lng_lat = js_sys::Reflect::get(event, &JsValue::from_str("lngLat"))
        .ok()
        .and_then(|position| {
            let lng = js_sys::Reflect::get(&position, &JsValue::from_str("lng")).ok()?.as_f64()?;
            let lat = js_sys::Reflect::get(&position, &JsValue::from_str("lat")).ok()?.as_f64()?;
            Some(LatLng::new(lat, lng))
        });

    FeatureClick::new(feature, lng_lat)
}

impl MapRenderer for MapboxRenderer {
    fn add_source(&mut self, id: &str, data: &Value) -> Result<()> {
        self.map.add_source(id, &to_js(data)?).map_err(js_error)
    }

    fn add_layer(&mut self, layer: &LayerSpec) -> Result<()> {
        self.map
            .add_layer(&to_js(&layer.to_json()?)?)
            .map_err(js_error)
    }

    fn has_layer(&self, id: &str) -> bool {
        let layer = self.map.get_layer(id);
        !layer.is_undefined() && !layer.is_null()
    }

    fn listen_clicks(&mut self, layer_id: &str) -> Result<()> {
        let sink = self.sink.clone();
        let on_click = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            sink(StoryEvent::FeatureClick(click_from_event(&event)));
        });
        self.map
            .on_layer("click", layer_id, on_click.as_ref().unchecked_ref());
        on_click.forget();
        Ok(())
    }

    fn set_layer_visibility(&mut self, id: &str, visibility: Visibility) {
        self.map
            .set_layout_property(id, "visibility", &JsValue::from_str(visibility.as_str()));
    }

    fn fly_to(&mut self, target: &FlyTo) {
        match to_js(&target.to_json()) {
            Ok(options) => self.map.fly_to(&options),
            Err(e) => log::warn!("fly-to dropped: {}", e),
        }
    }

    fn fit_bounds(&mut self, fit: &FitBounds) {
        let bounds = to_js(&json!(fit.bounds.to_lng_lat_pair()));
        let options = to_js(&fit.options_json());
        match (bounds, options) {
            (Ok(bounds), Ok(options)) => self.map.fit_bounds(&bounds, &options),
            (Err(e), _) | (_, Err(e)) => log::warn!("fit-bounds dropped: {}", e),
        }
    }

    fn show_popup(&mut self, popup: &Popup) {
        match to_js(&json!(popup.position.to_lng_lat())) {
            Ok(position) => {
                JsPopup::new()
                    .set_lng_lat(&position)
                    .set_html(&popup.html())
                    .add_to(&self.map);
            }
            Err(e) => log::warn!("popup dropped: {}", e),
        }
    }
}
