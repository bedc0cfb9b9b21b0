//! Test support
//!
//! Provides an in-memory [`TrackSurface`](crate::surface::TrackSurface) so
//! the controller can be exercised without a browser.

mod mock_surface;

pub use mock_surface::{MockSurface, SurfaceCall};
