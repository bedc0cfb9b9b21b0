//! Mounted carousel: engine, DOM surface, listeners and host timer
//!
//! A controller lives in a shared `Rc<RefCell<Option<Controller>>>` slot.
//! Event handlers and the host timer hold a `Weak` to the slot and go
//! through [`drive`], which re-arms the timer for the next deadline and
//! calls `onSlideChange` once the borrow is released.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use carousel_core::{
    Carousel, CarouselError, CarouselItem, CarouselOptions, DefaultRenderer, DriverState,
    Interaction, ItemRenderer, KeyCommand, OptionsPatch, RotationSettings, Track,
};
use js_sys::{Array, Function, Reflect};
use log::{debug, error, warn};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, FocusEvent, HtmlElement, KeyboardEvent, Node, TouchEvent};

use crate::dom::{self, DomSurface, Scaffold};
use crate::listeners::{ListenOptions, ListenerSet};
use crate::timers::HostTimer;
use crate::util::{date_now, js_error, viewport_width};

/// Shared slot holding a mounted controller
pub(crate) type Shared = Rc<RefCell<Option<Controller>>>;

type WeakShared = Weak<RefCell<Option<Controller>>>;

/// Markup used when `renderItem` throws or returns a non-string
const RENDER_ITEM_ERROR: &str = r#"<div class="box blurr" role="tabpanel">Error rendering item</div>"#;

/// Function-valued options, which do not survive `JSON.stringify`
pub(crate) struct JsHooks {
    /// Items as the page passed them
    items: Array,
    render_item: Option<Function>,
    on_slide_change: Option<Function>,
}

impl JsHooks {
    pub(crate) fn from_options(options: &JsValue) -> Self {
        Self {
            items: array(options, "items").unwrap_or_else(Array::new),
            render_item: function(options, "renderItem"),
            on_slide_change: function(options, "onSlideChange"),
        }
    }

    /// Take over the hooks present in `patch`, returning whether the
    /// renderer changed
    fn apply(&mut self, patch: &JsValue) -> bool {
        if let Some(items) = array(patch, "items") {
            self.items = items;
        }
        if has(patch, "onSlideChange") {
            self.on_slide_change = function(patch, "onSlideChange");
        }
        if has(patch, "renderItem") {
            self.render_item = function(patch, "renderItem");
            return true;
        }
        false
    }

    fn build_track(&self, options: &CarouselOptions, ring_size: usize) -> Result<Track, CarouselError> {
        let items = options.carousel_items()?;
        let track = match &self.render_item {
            Some(render) => Track::build(
                &items,
                ring_size,
                &JsRenderer {
                    render,
                    items: &self.items,
                },
            ),
            None => Track::build(&items, ring_size, &DefaultRenderer),
        };
        Ok(track)
    }
}

fn has(source: &JsValue, key: &str) -> bool {
    source.is_object() && Reflect::has(source, &JsValue::from_str(key)).unwrap_or(false)
}

fn property(source: &JsValue, key: &str) -> Option<JsValue> {
    if !source.is_object() {
        return None;
    }
    Reflect::get(source, &JsValue::from_str(key)).ok()
}

fn function(source: &JsValue, key: &str) -> Option<Function> {
    property(source, key)?.dyn_into::<Function>().ok()
}

fn array(source: &JsValue, key: &str) -> Option<Array> {
    property(source, key)?.dyn_into::<Array>().ok()
}

/// `renderItem(item, index)` from the page
struct JsRenderer<'a> {
    render: &'a Function,
    items: &'a Array,
}

impl ItemRenderer for JsRenderer<'_> {
    fn render(&self, index: usize, _item: &CarouselItem) -> String {
        let Ok(position) = u32::try_from(index) else {
            return RENDER_ITEM_ERROR.to_string();
        };
        match self
            .render
            .call2(&JsValue::NULL, &self.items.get(position), &JsValue::from(position))
        {
            Ok(markup) => markup.as_string().unwrap_or_else(|| {
                warn!("renderItem returned a non-string for item {index}");
                RENDER_ITEM_ERROR.to_string()
            }),
            Err(e) => {
                warn!("renderItem failed for item {index}: {:?}", e);
                RENDER_ITEM_ERROR.to_string()
            }
        }
    }
}

/// Everything needed to mount, collected by the constructor
pub(crate) struct Setup {
    pub document: Document,
    pub container: HtmlElement,
    pub options: CarouselOptions,
    pub hooks: JsHooks,
    pub instance_id: String,
}

/// Snapshot returned by `stateJson()`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateSnapshot {
    current_slide: usize,
    left_slide_count: usize,
    ring_size: usize,
    visible: usize,
    driver: DriverState,
    offset_px: f64,
    auto_rotating: bool,
    rotation_suspended: bool,
}

pub(crate) struct Controller {
    pub carousel: Carousel<DomSurface>,
    options: CarouselOptions,
    hooks: JsHooks,
    scaffold: Scaffold,
    /// Slides reported by the engine, flushed to `onSlideChange` by [`drive`]
    changes: Rc<RefCell<Vec<usize>>>,
    timer: HostTimer,
    listeners: ListenerSet,
}

/// Build the scaffold and the engine, then attach the listeners
pub(crate) fn mount(shared: &Shared, setup: Setup) -> Result<(), JsValue> {
    let Setup {
        document,
        container,
        options,
        hooks,
        instance_id,
    } = setup;

    let resolution = options.resolve(viewport_width()).map_err(js_error)?;
    let scaffold = Scaffold::build(&document, container, &options, &instance_id)?;
    let track = hooks
        .build_track(&options, resolution.layout.ring_size)
        .map_err(js_error)?;

    let surface = DomSurface::new(document.clone(), scaffold.track.clone(), scaffold.pagination.clone());
    let rotation = RotationSettings::new(options.auto_rotate, resolution.rotation_delay_ms);
    let mut carousel = Carousel::mount(surface, track, resolution.layout.visible, rotation, date_now());

    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    carousel.set_on_slide_change(move |current| sink.borrow_mut().push(current));

    scaffold.ready();
    let listeners = wire(shared, &document, &scaffold)?;

    let controller = Controller {
        carousel,
        options,
        hooks,
        scaffold,
        changes,
        timer: HostTimer::new(),
        listeners,
    };
    match shared.try_borrow_mut() {
        Ok(mut slot) => *slot = Some(controller),
        Err(_) => return Err(JsValue::from_str("CarouselJS: controller is busy")),
    }

    drive(shared, |_, _| ());
    debug!("mounted {instance_id}");
    Ok(())
}

/// Mount once the document has finished loading
pub(crate) fn mount_deferred(shared: &Shared, setup: Setup) -> impl FnMut(Event) + 'static {
    let weak = Rc::downgrade(shared);
    let mut setup = Some(setup);
    move |_: Event| {
        let (Some(shared), Some(setup)) = (weak.upgrade(), setup.take()) else {
            return;
        };
        if let Err(e) = mount(&shared, setup) {
            error!("mount failed: {:?}", e);
        }
    }
}

/// Run `f` on the mounted controller at the current time
///
/// Returns `None` when nothing is mounted or the controller is already
/// borrowed further up the stack.
pub(crate) fn drive<R>(shared: &Shared, f: impl FnOnce(&mut Controller, f64) -> R) -> Option<R> {
    let (result, changes, callback) = {
        let Ok(mut slot) = shared.try_borrow_mut() else {
            debug!("reentrant call ignored");
            return None;
        };
        let controller = slot.as_mut()?;
        let result = f(controller, date_now());
        controller.arm_timer(Rc::downgrade(shared));
        let changes: Vec<usize> = controller.changes.borrow_mut().drain(..).collect();
        (result, changes, controller.hooks.on_slide_change.clone())
    };

    if let Some(callback) = callback {
        for current in changes {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from(current as u32)) {
                warn!("onSlideChange failed: {:?}", e);
            }
        }
    }
    Some(result)
}

/// Detach the controller from `shared` and undo the mount
pub(crate) fn destroy(shared: &Shared) -> bool {
    let controller = match shared.try_borrow_mut() {
        Ok(mut slot) => slot.take(),
        Err(_) => {
            warn!("destroy called while the carousel is busy");
            return false;
        }
    };
    match controller {
        Some(controller) => {
            controller.teardown();
            true
        }
        None => false,
    }
}

impl Controller {
    fn arm_timer(&mut self, shared: WeakShared) {
        let Some(due) = self.carousel.next_deadline() else {
            self.timer.clear();
            return;
        };
        self.timer.arm((due - date_now()).max(0.0), move || {
            if let Some(shared) = shared.upgrade() {
                drive(&shared, |controller, now| {
                    controller.carousel.tick(now);
                });
            }
        });
    }

    /// Apply a partial options update
    ///
    /// New items, a new ring size or a new renderer rebuild the track. A
    /// changed viewport size resets to the first slide.
    pub(crate) fn update(&mut self, patch: OptionsPatch, raw: &JsValue, now_ms: f64) -> Result<(), CarouselError> {
        let mut rebuild = patch.changes_items();
        let mut options = self.options.clone();
        options.apply(patch);
        let resolution = options.resolve(viewport_width())?;

        rebuild |= self.hooks.apply(raw);
        let visible = resolution.layout.visible;
        if rebuild {
            let track = self.hooks.build_track(&options, resolution.layout.ring_size)?;
            self.carousel.reconfigure(track, visible, now_ms);
        } else if visible != self.carousel.visible() {
            self.carousel.relayout(visible, now_ms);
        }

        if resolution.rotation_delay_ms != self.carousel.rotation_settings().delay_ms {
            self.carousel.set_rotation_delay(resolution.rotation_delay_ms, now_ms);
        }
        if options.auto_rotate != self.options.auto_rotate {
            if options.auto_rotate {
                self.carousel.start_auto_rotation(now_ms);
            } else {
                self.carousel.stop_auto_rotation();
            }
        }

        self.scaffold.relabel(&options);
        self.options = options;
        Ok(())
    }

    /// Re-evaluate the viewport size after a window resize
    fn resize(&mut self, now_ms: f64) {
        let visible = self.options.requested_visible(viewport_width());
        if self.carousel.resize(visible, now_ms) {
            debug!("viewport size changed to {}", self.carousel.visible());
        }
    }

    fn contains(&self, target: Option<&Node>) -> bool {
        target.map_or(false, |node| self.scaffold.container.contains(Some(node)))
    }

    /// Current state as JSON
    pub(crate) fn state_json(&self, now_ms: f64) -> String {
        let snapshot = StateSnapshot {
            current_slide: self.carousel.current_slide(),
            left_slide_count: self.carousel.left_slide_count(),
            ring_size: self.carousel.ring_size(),
            visible: self.carousel.visible(),
            driver: self.carousel.state(now_ms),
            offset_px: self.carousel.visual_offset_px(now_ms),
            auto_rotating: self.carousel.is_auto_rotating(),
            rotation_suspended: self.carousel.is_rotation_suspended(),
        };
        serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_string())
    }

    fn teardown(mut self) {
        self.listeners.clear();
        self.timer.clear();
        self.changes.borrow_mut().clear();
        let container = self.scaffold.container.clone();
        drop(self.carousel.destroy());
        dom::teardown(&container);
    }
}

/// Event handler that drives the controller through a weak reference
fn handler(
    shared: &Shared,
    mut f: impl FnMut(&mut Controller, &Event, f64) + 'static,
) -> impl FnMut(Event) + 'static {
    let weak = Rc::downgrade(shared);
    move |event: Event| {
        if let Some(shared) = weak.upgrade() {
            drive(&shared, |controller, now| f(controller, &event, now));
        }
    }
}

fn first_touch(event: &Event) -> Option<(f64, f64)> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some((f64::from(touch.client_x()), f64::from(touch.client_y())))
}

fn wire(shared: &Shared, document: &Document, scaffold: &Scaffold) -> Result<ListenerSet, JsValue> {
    let mut listeners = ListenerSet::new();
    let container = &scaffold.container;

    if let Some(button) = &scaffold.btn_left {
        listeners.listen(button, "click", ListenOptions::default(), handler(shared, |c, _, now| {
            c.carousel.prev(now);
        }))?;
    }
    if let Some(button) = &scaffold.btn_right {
        listeners.listen(button, "click", ListenOptions::default(), handler(shared, |c, _, now| {
            c.carousel.next(now);
        }))?;
    }

    // Key events only reach the container while focus is inside it
    listeners.listen(container, "keydown", ListenOptions::default(), handler(shared, |c, event, now| {
        let Some(command) = event
            .dyn_ref::<KeyboardEvent>()
            .and_then(|e| KeyCommand::from_key(&e.key()))
        else {
            return;
        };
        event.prevent_default();
        c.carousel.handle_key(command, now);
    }))?;

    listeners.listen(container, "focusin", ListenOptions::default(), handler(shared, |c, _, now| {
        c.carousel.set_interaction(Interaction::Focus, true, now);
    }))?;
    listeners.listen(container, "focusout", ListenOptions::default(), handler(shared, |c, event, now| {
        let next = event
            .dyn_ref::<FocusEvent>()
            .and_then(|e| e.related_target())
            .and_then(|t| t.dyn_into::<Node>().ok());
        if !c.contains(next.as_ref()) {
            c.carousel.set_interaction(Interaction::Focus, false, now);
        }
    }))?;

    listeners.listen(container, "mouseenter", ListenOptions::default(), handler(shared, |c, _, now| {
        c.carousel.set_interaction(Interaction::Hover, true, now);
    }))?;
    listeners.listen(container, "mouseleave", ListenOptions::default(), handler(shared, |c, _, now| {
        c.carousel.set_interaction(Interaction::Hover, false, now);
    }))?;

    listeners.listen(container, "touchstart", ListenOptions::passive(), handler(shared, |c, event, now| {
        if let Some((x, y)) = first_touch(event) {
            c.carousel.touch_start(x, y, now);
        }
    }))?;
    listeners.listen(container, "touchmove", ListenOptions::passive(), handler(shared, |c, event, _| {
        if let Some((x, y)) = first_touch(event) {
            c.carousel.touch_move(x, y);
        }
    }))?;
    listeners.listen(container, "touchend", ListenOptions::default(), handler(shared, |c, _, now| {
        c.carousel.touch_end(now);
    }))?;
    listeners.listen(container, "touchcancel", ListenOptions::default(), handler(shared, |c, _, now| {
        c.carousel.touch_cancel(now);
    }))?;

    let page = document.clone();
    listeners.listen(document, "visibilitychange", ListenOptions::default(), handler(shared, move |c, _, now| {
        c.carousel.set_interaction(Interaction::Hidden, page.hidden(), now);
    }))?;

    if let Some(window) = web_sys::window() {
        listeners.listen(&window, "resize", ListenOptions::default(), handler(shared, |c, _, now| {
            c.resize(now);
        }))?;
    }

    Ok(listeners)
}
