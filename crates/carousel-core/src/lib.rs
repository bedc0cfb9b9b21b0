//! Slide window controller for an infinitely looping carousel
//!
//! This crate provides the browser-independent part of the carousel:
//! - Track construction (every item rendered three times back to back)
//! - Geometry reading (offset and slide width from the rendered track)
//! - Window arithmetic (left slide count, ring normalization, wrap checks)
//! - The transition driver (animated steps, throttling, wrap-teleports)
//! - The sync layer (dimmed slides and active pagination dots)
//! - Auto-rotation, keyboard and swipe policies
//!
//! ## Architecture
//!
//! - [`geometry`]: Reads offset and slide width from a [`TrackSurface`]
//! - [`window`]: Pure index arithmetic over the tripled track
//! - [`sync`]: Keeps slide and dot state in line with the visible window
//! - [`transition`]: Timing constants, easing and offset animations
//! - [`input`]: Keyboard commands and the swipe tracker
//! - [`render`]: Items, the default renderer and the [`Track`]
//! - `testing`: An in-memory [`TrackSurface`] for tests (`testing` feature)
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(feature = "testing")] {
//! use carousel_core::testing::MockSurface;
//! use carousel_core::{Carousel, CarouselItem, DefaultRenderer, RotationSettings, Track};
//!
//! let items: Vec<CarouselItem> = (0..7)
//!     .map(|i| CarouselItem::titled(format!("Book {i}")))
//!     .collect();
//! let track = Track::build(&items, 7, &DefaultRenderer);
//!
//! let mut carousel = Carousel::mount(
//!     MockSurface::new(900.0),
//!     track,
//!     3,
//!     RotationSettings::disabled(),
//!     0.0,
//! );
//!
//! assert!(carousel.next(1000.0).is_moved());
//! assert_eq!(carousel.current_slide(), 1);
//! # }
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state management is pure Rust, testable without browser
//! 2. **Time Abstraction**: Every operation takes `now_ms`, timers are polled via `tick`
//! 3. **Explicit State**: The logical position is stored, pixels are derived from it
//! 4. **One Controller Per Widget**: No state is shared between carousel instances

pub mod geometry;
pub mod window;
pub mod sync;
pub mod surface;
pub mod transition;
pub mod input;
pub mod render;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

mod config;
mod engine;
mod error;

pub use config::{
    CarouselOptions, Layout, OptionsPatch, Resolution, DEFAULT_MOBILE_BREAKPOINT,
    DEFAULT_RING_SIZE, DEFAULT_VISIBLE_ITEMS,
};
pub use engine::{
    Carousel, DriverState, Interaction, NavOutcome, Rejection, RotationSettings, Scheduler, Task,
    TaskId,
};
pub use error::{CarouselError, ConfigWarning};
pub use input::{KeyCommand, SwipeDirection, SwipeTracker};
pub use render::{CarouselItem, DefaultRenderer, ItemId, ItemRenderer, Track};
pub use surface::{TrackSurface, TrackTransition};
pub use transition::{Easing, TrackAnimation};
pub use window::{VisibleWindow, WrapCorrection};

/// Duration of the animated step between slides in milliseconds
pub use transition::SLIDE_ANIMATION_MS;

/// Minimum spacing between accepted navigation steps in milliseconds
pub use transition::NAVIGATION_THROTTLE_MS;
