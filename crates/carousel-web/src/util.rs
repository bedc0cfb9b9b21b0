//! Browser helpers

use carousel_core::CarouselError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

// Import js_sys::Date for timestamps
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Date, js_name = now)]
    pub(crate) fn date_now() -> f64;
}

/// The global window
pub(crate) fn window() -> Result<Window, CarouselError> {
    web_sys::window().ok_or_else(|| CarouselError::DomUnavailable("no window".into()))
}

/// The window's document
pub(crate) fn document() -> Result<Document, CarouselError> {
    window()?
        .document()
        .ok_or_else(|| CarouselError::DomUnavailable("no document".into()))
}

/// Viewport width in CSS pixels (infinite if unknown, so never "mobile")
pub(crate) fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(f64::INFINITY)
}

/// Find the mount target
pub(crate) fn find_container(document: &Document, selector: &str) -> Result<HtmlElement, CarouselError> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| CarouselError::ContainerNotFound(selector.to_string()))
}

/// First descendant of `root` matching `selector`
pub(crate) fn query(root: &Element, selector: &str) -> Option<HtmlElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

/// Create an element with a class name
pub(crate) fn create(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let element = document.create_element(tag)?.dyn_into::<HtmlElement>()?;
    element.set_class_name(class);
    Ok(element)
}

/// Convert an error into a JavaScript exception
pub(crate) fn js_error(err: CarouselError) -> JsValue {
    js_sys::Error::new(&format!("CarouselJS: {err}")).into()
}
