//! Event listener registration and teardown

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

/// How a listener is registered
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ListenOptions {
    pub capture: bool,
    pub passive: bool,
    pub once: bool,
}

impl ListenOptions {
    pub(crate) fn passive() -> Self {
        Self {
            passive: true,
            ..Default::default()
        }
    }

    pub(crate) fn once() -> Self {
        Self {
            once: true,
            ..Default::default()
        }
    }
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    capture: bool,
    closure: Closure<dyn FnMut(Event)>,
}

/// Listeners owned by one carousel, removed together
///
/// Dropping the set detaches every listener.
#[derive(Default)]
pub(crate) struct ListenerSet {
    listeners: Vec<Listener>,
}

impl ListenerSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Attach `handler` to `event` on `target`
    pub(crate) fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        options: ListenOptions,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let opts = AddEventListenerOptions::new();
        opts.set_capture(options.capture);
        opts.set_passive(options.passive);
        opts.set_once(options.once);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &opts,
        )?;
        self.listeners.push(Listener {
            target: target.clone(),
            event,
            capture: options.capture,
            closure,
        });
        Ok(())
    }

    /// Detach every listener
    pub(crate) fn clear(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback_and_bool(
                listener.event,
                listener.closure.as_ref().unchecked_ref(),
                listener.capture,
            );
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}
