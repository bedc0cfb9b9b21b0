//! Container scaffold: navigation buttons, track and pagination

use carousel_core::render::escape_html;
use carousel_core::{CarouselOptions, ConfigWarning};
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::util::{create, query};

const LEFT_ICON_FALLBACK: &str = "data:image/svg+xml;charset=UTF-8,%3Csvg xmlns=\\'http://www.w3.org/2000/svg\\' width=\\'24\\' height=\\'24\\' viewBox=\\'0 0 24 24\\'%3E%3Cpath fill=\\'white\\' d=\\'M15.41 7.41L14 6l-6 6 6 6 1.41-1.41L10.83 12z\\'/%3E%3C/svg%3E";

const RIGHT_ICON_FALLBACK: &str = "data:image/svg+xml;charset=UTF-8,%3Csvg xmlns=\\'http://www.w3.org/2000/svg\\' width=\\'24\\' height=\\'24\\' viewBox=\\'0 0 24 24\\'%3E%3Cpath fill=\\'white\\' d=\\'M10 6L8.59 7.41 13.17 12l-4.58 4.59L10 18l6-6z\\'/%3E%3C/svg%3E";

const CONTAINER_ATTRIBUTES: [&str; 5] = ["role", "aria-roledescription", "aria-label", "tabindex", "aria-busy"];

/// Elements of a mounted carousel
pub(crate) struct Scaffold {
    pub container: HtmlElement,
    pub track: HtmlElement,
    pub pagination: HtmlElement,
    pub btn_left: Option<HtmlElement>,
    pub btn_right: Option<HtmlElement>,
}

impl Scaffold {
    /// Mark the container as loading until the track is built
    pub(crate) fn show_loading(container: &HtmlElement, options: &CarouselOptions) {
        let _ = container.class_list().add_1("loading");
        let _ = container.set_attribute("aria-busy", "true");
        if container.child_element_count() == 0 {
            container.set_inner_html(&format!(
                r#"<div class="carousel-loading" role="status">{}</div>"#,
                escape_html(&options.loading_text)
            ));
        }
    }

    /// Build the markup inside `container` and collect its elements
    ///
    /// A container that already carries the `slider` class keeps its
    /// markup. Missing track or pagination elements are synthesized.
    pub(crate) fn build(
        document: &Document,
        container: HtmlElement,
        options: &CarouselOptions,
        instance_id: &str,
    ) -> Result<Self, JsValue> {
        if !container.class_list().contains("slider") {
            container.class_list().add_1("slider")?;
            container.set_attribute("role", "region")?;
            container.set_attribute("aria-roledescription", "carousel")?;
            container.set_attribute("aria-label", "Image Carousel")?;
            container.set_attribute("tabindex", "0")?;
            container.set_id(instance_id);
            container.set_inner_html(&markup(options, instance_id));
        }

        let track = match query(&container, ".slide-track") {
            Some(track) => track,
            None => {
                warn!("{}", ConfigWarning::MissingElement("slide-track"));
                synthesize_track(document, &container)?
            }
        };
        let pagination = match query(&container, ".pagination") {
            Some(pagination) => pagination,
            None => {
                warn!("{}", ConfigWarning::MissingElement("pagination"));
                synthesize_pagination(document, &container)?
            }
        };

        let btn_left = query(&container, ".nav-btn.btn-left");
        let btn_right = query(&container, ".nav-btn.btn-right");
        if btn_left.is_none() || btn_right.is_none() {
            warn!("navigation buttons not found");
        }

        Ok(Self {
            container,
            track,
            pagination,
            btn_left,
            btn_right,
        })
    }

    /// Finish loading
    pub(crate) fn ready(&self) {
        let _ = self.container.class_list().remove_1("loading");
        let _ = self.container.remove_attribute("aria-busy");
    }

    /// Refresh button labels and icons after an options update
    pub(crate) fn relabel(&self, options: &CarouselOptions) {
        let buttons = [
            (&self.btn_left, &options.prev_slide_text, &options.left_arrow_icon),
            (&self.btn_right, &options.next_slide_text, &options.right_arrow_icon),
        ];
        for (button, label, icon) in buttons {
            let Some(button) = button else { continue };
            let _ = button.set_attribute("aria-label", label);
            if let Ok(Some(img)) = button.query_selector("img") {
                let _ = img.set_attribute("src", icon);
            }
        }
    }
}

/// Remove everything a mount added to `container`
pub(crate) fn teardown(container: &HtmlElement) {
    container.set_inner_html("");
    let _ = container.class_list().remove_2("slider", "loading");
    for attribute in CONTAINER_ATTRIBUTES {
        let _ = container.remove_attribute(attribute);
    }
}

fn markup(options: &CarouselOptions, instance_id: &str) -> String {
    format!(
        concat!(
            r#"<button class="nav-btn btn-left" aria-label="{prev}" aria-controls="{id}">"#,
            r#"<img src="{left}" alt="Previous" onerror="this.onerror=null;this.src='{left_fallback}';" /></button>"#,
            r#"<button class="nav-btn btn-right" aria-label="{next}" aria-controls="{id}">"#,
            r#"<img src="{right}" alt="Next" onerror="this.onerror=null;this.src='{right_fallback}';" /></button>"#,
            r#"<div class="fading">{inner}</div>"#
        ),
        prev = escape_html(&options.prev_slide_text),
        next = escape_html(&options.next_slide_text),
        id = instance_id,
        left = escape_html(&options.left_arrow_icon),
        right = escape_html(&options.right_arrow_icon),
        left_fallback = LEFT_ICON_FALLBACK,
        right_fallback = RIGHT_ICON_FALLBACK,
        inner = FADING_INNER,
    )
}

const FADING_INNER: &str = concat!(
    r#"<div class="slide-track" role="presentation"></div>"#,
    r#"<div class="pagination" role="tablist" aria-label="Carousel Pagination"></div>"#
);

fn synthesize_track(document: &Document, container: &HtmlElement) -> Result<HtmlElement, JsValue> {
    let track = create(document, "div", "slide-track")?;
    track.set_attribute("role", "presentation")?;
    match query(container, ".fading") {
        Some(fading) => {
            fading.insert_before(&track, fading.first_child().as_ref())?;
        }
        None => {
            let fading = create(document, "div", "fading")?;
            fading.append_child(&track)?;
            container.append_child(&fading)?;
        }
    }
    Ok(track)
}

fn synthesize_pagination(document: &Document, container: &HtmlElement) -> Result<HtmlElement, JsValue> {
    let pagination = create(document, "div", "pagination")?;
    pagination.set_attribute("role", "tablist")?;
    pagination.set_attribute("aria-label", "Carousel Pagination")?;
    match query(container, ".fading") {
        Some(fading) => fading.append_child(&pagination)?,
        None => container.append_child(&pagination)?,
    };
    Ok(pagination)
}
