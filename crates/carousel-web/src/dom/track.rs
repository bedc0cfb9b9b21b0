//! Track surface backed by DOM elements

use carousel_core::window::track_len;
use carousel_core::{TrackSurface, TrackTransition};
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::{ACTIVE_DOT_CLASS, DIMMED_CLASS};
use crate::util::create;

/// Markup used when a renderer produced nothing usable
const RENDER_ERROR_MARKUP: &str = r#"<div class="box blurr" role="tabpanel">Error rendering item</div>"#;

/// [`TrackSurface`] over the `.slide-track` and `.pagination` elements
pub struct DomSurface {
    document: Document,
    track: HtmlElement,
    pagination: HtmlElement,
}

impl DomSurface {
    pub(crate) fn new(document: Document, track: HtmlElement, pagination: HtmlElement) -> Self {
        Self {
            document,
            track,
            pagination,
        }
    }

    fn slide(&self, index: usize) -> Option<Element> {
        self.track.children().item(u32::try_from(index).ok()?)
    }

    fn dot(&self, index: usize) -> Option<Element> {
        self.pagination.children().item(u32::try_from(index).ok()?)
    }

    /// Parse one slide's markup and take its first element
    fn slide_element(&self, html: &str) -> Option<Element> {
        let holder = self.document.create_element("div").ok()?;
        holder.set_inner_html(html.trim());
        if let Some(element) = holder.first_element_child() {
            return Some(element);
        }
        warn!("item markup has no root element");
        holder.set_inner_html(RENDER_ERROR_MARKUP);
        holder.first_element_child()
    }

    fn make_dot(&self, index: usize) -> Option<HtmlElement> {
        let dot = create(&self.document, "div", "dot").ok()?;
        let attributes = [
            ("role", "tab".to_string()),
            ("id", format!("tab-{index}")),
            ("aria-controls", format!("slide-{index}")),
            ("aria-label", format!("Slide {}", index + 1)),
            ("aria-selected", "false".to_string()),
            ("tabindex", "0".to_string()),
        ];
        for (name, value) in attributes {
            dot.set_attribute(name, &value).ok()?;
        }
        Some(dot)
    }

    fn set_style(&self, element: &HtmlElement, property: &str, value: &str) {
        if let Err(e) = element.style().set_property(property, value) {
            warn!("failed to set {property}: {:?}", e);
        }
    }
}

impl TrackSurface for DomSurface {
    fn is_mounted(&self) -> bool {
        self.track.is_connected()
    }

    fn track_width_px(&self) -> f64 {
        f64::from(self.track.offset_width())
    }

    fn rendered_transform(&self) -> Option<String> {
        let window = web_sys::window()?;
        let style = window.get_computed_style(&self.track).ok()??;
        style.get_property_value("transform").ok()
    }

    fn rebuild(&mut self, slides: &[String], dots: usize) {
        self.track.set_inner_html("");
        for html in slides {
            let Some(slide) = self.slide_element(html) else {
                continue;
            };
            let _ = slide.class_list().add_1(DIMMED_CLASS);
            if let Err(e) = self.track.append_child(&slide) {
                warn!("failed to append slide: {:?}", e);
            }
        }

        self.pagination.set_inner_html("");
        for index in 0..dots {
            if let Some(dot) = self.make_dot(index) {
                let _ = self.pagination.append_child(&dot);
            }
        }
    }

    fn set_track_layout(&mut self, ring_size: usize, visible: usize) {
        let slides = track_len(ring_size).max(1);
        let slide_width = format!("calc(100% / {slides})");
        let children = self.track.children();
        for i in 0..children.length() {
            if let Some(slide) = children.item(i).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
                self.set_style(&slide, "flex", &format!("0 0 {slide_width}"));
                self.set_style(&slide, "width", &slide_width);
            }
        }
        self.set_style(&self.track, "width", &format!("calc(100% / {} * {slides})", visible.max(1)));
        self.set_style(&self.track, "transition", "none");
        self.set_style(&self.track, "transform", "translateX(calc(-100% / 3))");
    }

    fn apply_offset(&mut self, offset_px: f64, transition: TrackTransition) {
        let transition = match transition {
            TrackTransition::Animated { duration_ms, easing } => {
                format!("transform {duration_ms}ms {}", easing.css())
            }
            TrackTransition::Instant => "none".to_string(),
        };
        self.set_style(&self.track, "transition", &transition);
        self.set_style(&self.track, "transform", &format!("translateX({offset_px}px)"));
    }

    fn set_slide_dimmed(&mut self, index: usize, dimmed: bool) {
        if let Some(slide) = self.slide(index) {
            let _ = slide.class_list().toggle_with_force(DIMMED_CLASS, dimmed);
            let _ = slide.set_attribute("aria-hidden", if dimmed { "true" } else { "false" });
        }
    }

    fn set_dot_active(&mut self, index: usize, active: bool) {
        if let Some(dot) = self.dot(index) {
            let _ = dot.class_list().toggle_with_force(ACTIVE_DOT_CLASS, active);
            let _ = dot.set_attribute("aria-selected", if active { "true" } else { "false" });
        }
    }
}
