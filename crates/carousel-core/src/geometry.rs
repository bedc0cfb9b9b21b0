//! Geometry reader for the slide track
//!
//! Reads the horizontal offset and slide width back from the rendered
//! track. Nothing here has side effects and every function is safe to call
//! before the first layout, in which case it reports 0.

use crate::surface::TrackSurface;
use crate::window::TRACK_COPIES;

/// Horizontal translation encoded in a computed CSS transform
///
/// Understands `matrix(a, b, c, d, tx, ty)` and `matrix3d(...)`. `none`,
/// an empty string or anything unparsable reads as 0.
pub fn parse_translate_x(transform: &str) -> f64 {
    let transform = transform.trim();
    if let Some(body) = function_body(transform, "matrix3d(") {
        nth_value(body, 12)
    } else if let Some(body) = function_body(transform, "matrix(") {
        nth_value(body, 4)
    } else {
        0.0
    }
}

fn function_body<'a>(transform: &'a str, prefix: &str) -> Option<&'a str> {
    transform.strip_prefix(prefix)?.strip_suffix(')')
}

fn nth_value(body: &str, n: usize) -> f64 {
    body.split(',')
        .nth(n)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Width of one slide given the full track width and the ring size
///
/// Returns 0 when the track has no measurable width.
pub fn slide_width_px(track_width_px: f64, ring_size: usize) -> f64 {
    if ring_size == 0 || !track_width_px.is_finite() || track_width_px <= 0.0 {
        return 0.0;
    }
    track_width_px / (ring_size * TRACK_COPIES) as f64
}

/// Current horizontal offset of the rendered track
pub fn current_offset_px<S: TrackSurface + ?Sized>(surface: &S) -> f64 {
    surface
        .rendered_transform()
        .map(|t| parse_translate_x(&t))
        .unwrap_or(0.0)
}

/// Measured slide width of the rendered track
pub fn measured_slide_width_px<S: TrackSurface + ?Sized>(surface: &S, ring_size: usize) -> f64 {
    slide_width_px(surface.track_width_px(), ring_size)
}

/// Pixel offset that puts slide `left` at the left edge of the viewport
#[inline]
pub fn offset_for_left(left: usize, slide_width_px: f64) -> f64 {
    -(left as f64) * slide_width_px
}
