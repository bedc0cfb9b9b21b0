//! WASM exports for the carousel
//!
//! `CarouselJS` is the page-facing handle. It mounts a controller on the
//! selected container (right away, or on `DOMContentLoaded` while the
//! document is still loading) and forwards the public operations to it.

use std::cell::RefCell;
use std::rc::Rc;

use carousel_core::{CarouselError, CarouselOptions, OptionsPatch};
use log::LevelFilter;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

use crate::controller::{self, JsHooks, Setup, Shared};
use crate::dom::Scaffold;
use crate::listeners::{ListenOptions, ListenerSet};
use crate::logger;
use crate::util::{date_now, document, find_container, js_error};

/// Carousel handle for JavaScript
#[wasm_bindgen(js_name = CarouselJS)]
pub struct CarouselJs {
    shared: Shared,
    /// Pending `DOMContentLoaded` mount
    pending: ListenerSet,
}

fn options_json(value: &JsValue) -> Result<String, CarouselError> {
    if !value.is_object() {
        return Err(CarouselError::InvalidOptions("options must be an object".into()));
    }
    js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .ok_or_else(|| CarouselError::InvalidOptions("options are not serializable".into()))
}

#[wasm_bindgen(js_class = CarouselJS)]
impl CarouselJs {
    /// Create a carousel from an options object
    ///
    /// Throws when the selector or the items are missing, or when no
    /// element matches the selector.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<CarouselJs, JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        logger::init(LevelFilter::Warn);

        let json = options_json(&options).map_err(js_error)?;
        let parsed = CarouselOptions::from_json(&json).map_err(js_error)?;
        let selector = parsed.selector().map_err(js_error)?.to_string();
        parsed.raw_items().map_err(js_error)?;

        let document = document().map_err(js_error)?;
        let container = find_container(&document, &selector).map_err(js_error)?;
        let simple = Uuid::new_v4().simple().to_string();
        let instance_id = format!("carousel-{}", &simple[..8]);
        Scaffold::show_loading(&container, &parsed);

        let setup = Setup {
            document: document.clone(),
            container,
            options: parsed,
            hooks: JsHooks::from_options(&options),
            instance_id,
        };

        let shared: Shared = Rc::new(RefCell::new(None));
        let mut pending = ListenerSet::new();
        if document.ready_state() == "loading" {
            pending.listen(
                &document,
                "DOMContentLoaded",
                ListenOptions::once(),
                controller::mount_deferred(&shared, setup),
            )?;
        } else {
            controller::mount(&shared, setup)?;
        }

        Ok(Self { shared, pending })
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Step one slide forward; returns whether the step was taken
    pub fn next(&self) -> bool {
        controller::drive(&self.shared, |c, now| c.carousel.next(now).is_moved()).unwrap_or(false)
    }

    /// Step one slide backward; returns whether the step was taken
    pub fn prev(&self) -> bool {
        controller::drive(&self.shared, |c, now| c.carousel.prev(now).is_moved()).unwrap_or(false)
    }

    /// Jump to item `index`
    #[wasm_bindgen(js_name = goToSlide)]
    pub fn go_to_slide(&self, index: f64) -> bool {
        if !index.is_finite() || index < 0.0 || index.fract() != 0.0 {
            return false;
        }
        let index = index as usize;
        controller::drive(&self.shared, |c, now| c.carousel.goto_slide(index, now).is_moved())
            .unwrap_or(false)
    }

    /// Logical index of the leftmost visible item
    #[wasm_bindgen(js_name = currentSlide)]
    pub fn current_slide(&self) -> u32 {
        self.shared
            .try_borrow()
            .ok()
            .and_then(|slot| slot.as_ref().map(|c| c.carousel.current_slide() as u32))
            .unwrap_or(0)
    }

    // =========================================================================
    // Auto-rotation
    // =========================================================================

    #[wasm_bindgen(js_name = startAutoRotation)]
    pub fn start_auto_rotation(&self) {
        controller::drive(&self.shared, |c, now| c.carousel.start_auto_rotation(now));
    }

    #[wasm_bindgen(js_name = stopAutoRotation)]
    pub fn stop_auto_rotation(&self) {
        controller::drive(&self.shared, |c, _| c.carousel.stop_auto_rotation());
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Apply a partial options object
    pub fn update(&self, patch: JsValue) -> Result<(), JsValue> {
        let json = options_json(&patch).map_err(js_error)?;
        let parsed = OptionsPatch::from_json(&json).map_err(js_error)?;
        match controller::drive(&self.shared, |c, now| c.update(parsed, &patch, now)) {
            Some(result) => result.map_err(js_error),
            None => Err(JsValue::from_str("CarouselJS: carousel is not mounted")),
        }
    }

    /// Remove listeners, timers and markup
    pub fn destroy(&mut self) {
        self.pending.clear();
        controller::destroy(&self.shared);
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Offset (px) the track shows right now, following the step animation
    #[wasm_bindgen(js_name = visualOffset)]
    pub fn visual_offset(&self) -> f64 {
        self.shared
            .try_borrow()
            .ok()
            .and_then(|slot| slot.as_ref().map(|c| c.carousel.visual_offset_px(date_now())))
            .unwrap_or(0.0)
    }

    /// Controller state as JSON
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> String {
        self.shared
            .try_borrow()
            .ok()
            .and_then(|slot| slot.as_ref().map(|c| c.state_json(date_now())))
            .unwrap_or_else(|| "null".to_string())
    }
}
