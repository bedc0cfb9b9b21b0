//! DOM side of the carousel
//!
//! - `scaffold`: Container markup, ARIA attributes and fallbacks
//! - `track`: [`DomSurface`], the [`TrackSurface`](carousel_core::TrackSurface) over real elements

mod scaffold;
mod track;

pub(crate) use scaffold::{teardown, Scaffold};
pub use track::DomSurface;

/// Class of a dimmed slide
pub(crate) const DIMMED_CLASS: &str = "blurr";

/// Class of an active pagination dot
pub(crate) const ACTIVE_DOT_CLASS: &str = "active-dot";
