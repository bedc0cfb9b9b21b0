//! Host timer driving the controller's deferred tasks
//!
//! One `setTimeout` per carousel, re-armed for the earliest pending task
//! after every call into the controller.

use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[derive(Default)]
pub(crate) struct HostTimer {
    handle: Option<i32>,
    closure: Option<Closure<dyn FnMut()>>,
}

impl HostTimer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Run `callback` once after `delay_ms`, replacing any armed callback
    pub(crate) fn arm(&mut self, delay_ms: f64, callback: impl FnMut() + 'static) {
        self.clear();
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let delay = delay_ms.clamp(0.0, f64::from(i32::MAX)).ceil() as i32;
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.closure = Some(closure);
            }
            Err(e) => warn!("setTimeout failed: {:?}", e),
        }
    }

    /// Cancel the armed callback, if any
    pub(crate) fn clear(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(handle);
            }
        }
        self.closure = None;
    }
}

impl Drop for HostTimer {
    fn drop(&mut self) {
        self.clear();
    }
}
