use super::{js_error, to_js, EventSink};
use crate::{
    core::config::ScrollOptions,
    input::events::{Direction, StepEvent, StoryEvent},
    traits::ScrollObserver,
    MapError, Result,
};
use wasm_bindgen::{prelude::*, JsCast};

#[wasm_bindgen]
extern "C" {
    type Scroller;

    #[wasm_bindgen(catch)]
    fn scrollama() -> std::result::Result<Scroller, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn setup(this: &Scroller, options: &JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = onStepEnter)]
    fn on_step_enter(this: &Scroller, callback: &js_sys::Function);

    #[wasm_bindgen(method, js_name = onStepExit)]
    fn on_step_exit(this: &Scroller, callback: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn resize(this: &Scroller);
}

/// [`ScrollObserver`] over a scrollama instance
pub struct ScrollamaObserver {
    scroller: Scroller,
    sink: EventSink,
}

impl ScrollamaObserver {
    pub fn new(sink: EventSink) -> Result<Self> {
        let scroller = scrollama().map_err(js_error)?;
        Ok(Self { scroller, sink })
    }

    fn step_callback(&self, wrap: fn(StepEvent) -> StoryEvent) -> Closure<dyn FnMut(JsValue)> {
        let sink = self.sink.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |response: JsValue| match step_from_response(&response) {
            Some(step) => sink(wrap(step)),
            None => log::warn!("scroll step callback without an index"),
        })
    }
}

/// Reads `{index, direction}` from a scrollama callback response
fn step_from_response(response: &JsValue) -> Option<StepEvent> {
    let index = js_sys::Reflect::get(response, &JsValue::from_str("index"))
        .ok()?
        .as_f64()
        .filter(|index| *index >= 0.0)?;
    let direction = js_sys::Reflect::get(response, &JsValue::from_str("direction"))
        .ok()
        .and_then(|direction| direction.as_string())
        .unwrap_or_default();

    Some(StepEvent::new(index as usize, Direction::from_observer(&direction)))
}

impl ScrollObserver for ScrollamaObserver {
    fn setup(&mut self, options: &ScrollOptions) -> Result<()> {
        self.scroller.setup(&to_js(&options.to_json())?).map_err(js_error)?;

        let on_enter = self.step_callback(StoryEvent::StepEnter);
        let on_exit = self.step_callback(StoryEvent::StepExit);
        self.scroller.on_step_enter(on_enter.as_ref().unchecked_ref());
        self.scroller.on_step_exit(on_exit.as_ref().unchecked_ref());
        on_enter.forget();
        on_exit.forget();

        let window = web_sys::window().ok_or_else(|| MapError::Renderer("no window".to_string()))?;
        let sink = self.sink.clone();
        let on_resize = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| {
            sink(StoryEvent::Resize);
        });
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(js_error)?;
        on_resize.forget();

        log::debug!("scroll observer watching {}", options.step_selector);
        Ok(())
    }

    fn resize(&mut self) {
        self.scroller.resize();
    }
}
