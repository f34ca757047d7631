use crate::traits::CoverOverlay;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// The cover element, toggled through its inline `visibility` style
pub struct DomOverlay {
    element: Option<HtmlElement>,
}

impl DomOverlay {
    /// Looks the element up once. A missing element turns every toggle into a no-op.
    pub fn by_id(id: &str) -> Self {
        let element = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(id))
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());

        if element.is_none() {
            log::warn!("cover element #{} not found", id);
        }
        Self { element }
    }
}

impl CoverOverlay for DomOverlay {
    fn set_visible(&mut self, visible: bool) {
        let Some(element) = &self.element else {
            return;
        };
        let value = if visible { "visible" } else { "hidden" };
        if let Err(e) = element.style().set_property("visibility", value) {
            log::warn!("failed to set cover visibility: {:?}", e);
        }
    }
}
