//! Carousel options and their resolution into a layout
//!
//! Options arrive as JSON (`JSON.stringify` of the page's options object),
//! so every field is optional and falls back to the documented default.
//! [`CarouselOptions::resolve`] applies the defaults, the mobile breakpoint
//! and the ring/viewport constraints, clamping what it can and reporting a
//! [`ConfigWarning`] for every clamp.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CarouselError, ConfigWarning};
use crate::render::CarouselItem;
use crate::transition::AUTO_ROTATE_DELAY_MS;

/// Default ring size cap
pub const DEFAULT_RING_SIZE: usize = 7;

/// Default number of visible slides
pub const DEFAULT_VISIBLE_ITEMS: usize = 3;

/// Default number of visible slides on narrow viewports
pub const DEFAULT_MOBILE_VISIBLE_ITEMS: usize = 1;

/// Viewport width (px) at or below which the mobile slide count applies
pub const DEFAULT_MOBILE_BREAKPOINT: f64 = 768.0;

/// Page supplied carousel options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarouselOptions {
    /// CSS selector of the mount target
    pub selector: Option<String>,
    /// Display items, kept as raw JSON so custom renderers see every field
    pub items: Option<Vec<Value>>,
    /// Ring size (defaults to `min(7, items.len())`)
    pub total_items: Option<usize>,
    /// Visible slides on wide viewports
    pub visible_items: usize,
    /// Visible slides on narrow viewports
    pub mobile_visible_items: usize,
    /// Breakpoint between narrow and wide viewports (px)
    pub mobile_breakpoint: f64,
    /// Use `mobile_visible_items` on narrow viewports
    pub adapt_to_mobile: bool,
    /// Start auto-rotation on mount
    pub auto_rotate: bool,
    /// Auto-rotation interval (ms)
    pub auto_rotate_delay: u32,
    /// Previous button icon URL
    pub left_arrow_icon: String,
    /// Next button icon URL
    pub right_arrow_icon: String,
    /// Text shown while the track is built
    pub loading_text: String,
    /// Accessible label of the next button
    pub next_slide_text: String,
    /// Accessible label of the previous button
    pub prev_slide_text: String,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            selector: None,
            items: None,
            total_items: None,
            visible_items: DEFAULT_VISIBLE_ITEMS,
            mobile_visible_items: DEFAULT_MOBILE_VISIBLE_ITEMS,
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            adapt_to_mobile: true,
            auto_rotate: true,
            auto_rotate_delay: AUTO_ROTATE_DELAY_MS,
            left_arrow_icon: "icons/left-arrow.svg".to_string(),
            right_arrow_icon: "icons/right-arrow.svg".to_string(),
            loading_text: "Loading carousel...".to_string(),
            next_slide_text: "Next slide".to_string(),
            prev_slide_text: "Previous slide".to_string(),
        }
    }
}

/// Ring size and viewport size of a mounted carousel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Number of distinct items on the track (N)
    pub ring_size: usize,
    /// Number of simultaneously visible slides (X)
    pub visible: usize,
}

/// Outcome of [`CarouselOptions::resolve`]
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Effective layout
    pub layout: Layout,
    /// Effective auto-rotation interval (ms)
    pub rotation_delay_ms: u32,
    /// Constraints that were clamped
    pub warnings: Vec<ConfigWarning>,
}

impl CarouselOptions {
    /// Parse options from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CarouselError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Selector of the mount target
    pub fn selector(&self) -> Result<&str, CarouselError> {
        match self.selector.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(CarouselError::MissingSelector),
        }
    }

    /// Raw items, failing if none were given
    pub fn raw_items(&self) -> Result<&[Value], CarouselError> {
        match self.items.as_deref() {
            None => Err(CarouselError::MissingItems),
            Some([]) => Err(CarouselError::EmptyItems),
            Some(items) => Ok(items),
        }
    }

    /// Items in their typed form
    pub fn carousel_items(&self) -> Result<Vec<CarouselItem>, CarouselError> {
        Ok(self.raw_items()?.iter().map(CarouselItem::from_value).collect())
    }

    /// Check if the mobile slide count applies at `viewport_width_px`
    pub fn is_mobile(&self, viewport_width_px: f64) -> bool {
        self.adapt_to_mobile && viewport_width_px <= self.mobile_breakpoint
    }

    /// Requested visible slides at `viewport_width_px`, before clamping
    pub fn requested_visible(&self, viewport_width_px: f64) -> usize {
        if self.is_mobile(viewport_width_px) {
            self.mobile_visible_items
        } else {
            self.visible_items
        }
    }

    /// Resolve the effective layout for a viewport of `viewport_width_px`
    ///
    /// Fails only when the selector or the items are missing. Every
    /// clamped constraint is logged and listed in the result.
    pub fn resolve(&self, viewport_width_px: f64) -> Result<Resolution, CarouselError> {
        self.selector()?;
        let available = self.raw_items()?.len();
        let mut warnings = Vec::new();

        let mut ring_size = self
            .total_items
            .unwrap_or_else(|| DEFAULT_RING_SIZE.min(available));
        if ring_size == 0 {
            ring_size = 1;
            warnings.push(ConfigWarning::ZeroRingSize { used: ring_size });
        }
        if ring_size > available {
            warnings.push(ConfigWarning::RingSizeExceedsItems {
                requested: ring_size,
                available,
            });
            ring_size = available;
        }

        let (visible, visible_warning) =
            clamp_visible(self.requested_visible(viewport_width_px), ring_size);
        warnings.extend(visible_warning);

        let rotation_delay_ms = if self.auto_rotate_delay == 0 {
            warnings.push(ConfigWarning::InvalidRotationDelay {
                used: AUTO_ROTATE_DELAY_MS,
            });
            AUTO_ROTATE_DELAY_MS
        } else {
            self.auto_rotate_delay
        };

        for warning in &warnings {
            warn!("{warning}");
        }

        Ok(Resolution {
            layout: Layout {
                ring_size,
                visible,
            },
            rotation_delay_ms,
            warnings,
        })
    }

    /// Merge a partial update into these options
    pub fn apply(&mut self, patch: OptionsPatch) {
        let OptionsPatch {
            items,
            total_items,
            visible_items,
            mobile_visible_items,
            mobile_breakpoint,
            adapt_to_mobile,
            auto_rotate,
            auto_rotate_delay,
            left_arrow_icon,
            right_arrow_icon,
            loading_text,
            next_slide_text,
            prev_slide_text,
        } = patch;

        if let Some(items) = items {
            self.items = Some(items);
        }
        if let Some(n) = total_items {
            self.total_items = Some(n);
        }
        if let Some(x) = visible_items {
            self.visible_items = x;
        }
        if let Some(x) = mobile_visible_items {
            self.mobile_visible_items = x;
        }
        if let Some(px) = mobile_breakpoint {
            self.mobile_breakpoint = px;
        }
        if let Some(adapt) = adapt_to_mobile {
            self.adapt_to_mobile = adapt;
        }
        if let Some(enabled) = auto_rotate {
            self.auto_rotate = enabled;
        }
        if let Some(delay) = auto_rotate_delay {
            self.auto_rotate_delay = delay;
        }
        if let Some(s) = left_arrow_icon {
            self.left_arrow_icon = s;
        }
        if let Some(s) = right_arrow_icon {
            self.right_arrow_icon = s;
        }
        if let Some(s) = loading_text {
            self.loading_text = s;
        }
        if let Some(s) = next_slide_text {
            self.next_slide_text = s;
        }
        if let Some(s) = prev_slide_text {
            self.prev_slide_text = s;
        }
    }
}

/// Clamp a viewport size into `[1, ring_size - 1]` (exactly 1 for a ring of one)
pub(crate) fn clamp_visible(requested: usize, ring_size: usize) -> (usize, Option<ConfigWarning>) {
    let max = ring_size.saturating_sub(1).max(1);
    if requested == 0 {
        (1, Some(ConfigWarning::ZeroVisible))
    } else if requested > max {
        let warning = ConfigWarning::VisibleNotBelowRing {
            requested,
            ring_size,
            used: max,
        };
        (max, Some(warning))
    } else {
        (requested, None)
    }
}

/// Partial options passed to `update()`
///
/// The selector cannot be changed after mount.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsPatch {
    pub items: Option<Vec<Value>>,
    pub total_items: Option<usize>,
    pub visible_items: Option<usize>,
    pub mobile_visible_items: Option<usize>,
    pub mobile_breakpoint: Option<f64>,
    pub adapt_to_mobile: Option<bool>,
    pub auto_rotate: Option<bool>,
    pub auto_rotate_delay: Option<u32>,
    pub left_arrow_icon: Option<String>,
    pub right_arrow_icon: Option<String>,
    pub loading_text: Option<String>,
    pub next_slide_text: Option<String>,
    pub prev_slide_text: Option<String>,
}

impl OptionsPatch {
    /// Parse a patch from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CarouselError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check if applying the patch replaces the track contents
    pub fn changes_items(&self) -> bool {
        self.items.is_some() || self.total_items.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(count: usize) -> CarouselOptions {
        CarouselOptions {
            selector: Some("#slider".to_string()),
            items: Some((0..count).map(|i| json!({ "title": format!("Book {i}") })).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let resolution = options(10).resolve(1280.0).unwrap();
        assert_eq!(resolution.layout, Layout { ring_size: 7, visible: 3 });
        assert_eq!(resolution.rotation_delay_ms, 5000);
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_mobile_viewport() {
        let mut opts = options(5);
        opts.visible_items = 3;
        opts.mobile_visible_items = 1;

        let resolution = opts.resolve(768.0).unwrap();
        assert_eq!(resolution.layout, Layout { ring_size: 5, visible: 1 });

        opts.adapt_to_mobile = false;
        assert_eq!(opts.resolve(768.0).unwrap().layout.visible, 3);
    }

    #[test]
    fn test_visible_clamped_below_ring() {
        let mut opts = options(4);
        opts.visible_items = 4;

        let resolution = opts.resolve(1280.0).unwrap();
        assert_eq!(resolution.layout, Layout { ring_size: 4, visible: 3 });
        assert_eq!(
            resolution.warnings,
            vec![ConfigWarning::VisibleNotBelowRing { requested: 4, ring_size: 4, used: 3 }]
        );
    }

    #[test]
    fn test_single_item_ring() {
        let resolution = options(1).resolve(1280.0).unwrap();
        assert_eq!(resolution.layout, Layout { ring_size: 1, visible: 1 });
        assert_eq!(resolution.warnings.len(), 1);
    }

    #[test]
    fn test_ring_size_clamped_to_items() {
        let mut opts = options(4);
        opts.total_items = Some(9);
        let resolution = opts.resolve(1280.0).unwrap();
        assert_eq!(resolution.layout.ring_size, 4);
        assert!(resolution
            .warnings
            .contains(&ConfigWarning::RingSizeExceedsItems { requested: 9, available: 4 }));
    }

    #[test]
    fn test_zero_ring_size() {
        let mut opts = options(4);
        opts.total_items = Some(0);
        let resolution = opts.resolve(1280.0).unwrap();
        assert_eq!(resolution.layout, Layout { ring_size: 1, visible: 1 });
        assert_eq!(resolution.warnings[0], ConfigWarning::ZeroRingSize { used: 1 });
    }

    #[test]
    fn test_zero_rotation_delay() {
        let mut opts = options(7);
        opts.auto_rotate_delay = 0;
        assert_eq!(opts.resolve(1280.0).unwrap().rotation_delay_ms, 5000);
    }

    #[test]
    fn test_missing_selector_and_items() {
        let mut opts = options(3);
        opts.selector = Some("  ".to_string());
        assert_eq!(opts.resolve(1280.0), Err(CarouselError::MissingSelector));

        let mut opts = options(3);
        opts.items = None;
        assert_eq!(opts.resolve(1280.0), Err(CarouselError::MissingItems));

        let opts = options(0);
        assert_eq!(opts.resolve(1280.0), Err(CarouselError::EmptyItems));
    }

    #[test]
    fn test_from_json() {
        let opts = CarouselOptions::from_json(
            r##"{"selector":"#books","items":[{"title":"Foster"}],"autoRotate":false,"mobileBreakpoint":600}"##,
        )
        .unwrap();
        assert_eq!(opts.selector.as_deref(), Some("#books"));
        assert!(!opts.auto_rotate);
        assert!((opts.mobile_breakpoint - 600.0).abs() < 0.001);
        assert_eq!(opts.visible_items, DEFAULT_VISIBLE_ITEMS);
        assert_eq!(opts.left_arrow_icon, "icons/left-arrow.svg");
    }

    #[test]
    fn test_from_json_rejects_bad_types() {
        let err = CarouselOptions::from_json(r#"{"visibleItems":"three"}"#).unwrap_err();
        assert!(matches!(err, CarouselError::InvalidOptions(_)));
    }

    #[test]
    fn test_apply_patch() {
        let mut opts = options(10);
        let patch = OptionsPatch::from_json(r#"{"totalItems":5,"autoRotate":false,"nextSlideText":"Forward"}"#).unwrap();
        assert!(patch.changes_items());

        opts.apply(patch);
        assert_eq!(opts.total_items, Some(5));
        assert!(!opts.auto_rotate);
        assert_eq!(opts.next_slide_text, "Forward");
        assert_eq!(opts.resolve(1280.0).unwrap().layout.ring_size, 5);
    }

    #[test]
    fn test_patch_without_items() {
        let patch = OptionsPatch::from_json(r#"{"visibleItems":2}"#).unwrap();
        assert!(!patch.changes_items());
    }
}
