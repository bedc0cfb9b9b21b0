//! Browser bindings for the carousel slide window controller
//!
//! This crate mounts a [`carousel_core::Carousel`] on a real DOM and
//! exports it to JavaScript as `CarouselJS`.
//!
//! ## Module Structure
//!
//! - `wasm` - The `CarouselJS` export (constructor and public operations)
//! - `controller` - Mounted carousel: engine, listeners and host timer
//! - `dom` - Container scaffold and the [`DomSurface`]
//! - `listeners` - Event listener registration and teardown
//! - `timers` - The `setTimeout` driving deferred tasks
//! - `logger` - Console backend for the `log` facade
//!
//! ## Usage
//!
//! ```js
//! const carousel = new CarouselJS({
//!   selector: "#books",
//!   items: books,
//!   onSlideChange: (index) => console.log(index),
//! });
//! carousel.next();
//! ```

// =============================================================================
// Module declarations
// =============================================================================

mod controller;
mod dom;
mod listeners;
pub mod logger;
mod timers;
mod util;
mod wasm;

// =============================================================================
// Public re-exports
// =============================================================================

pub use dom::DomSurface;
pub use logger::init as init_logging;
pub use wasm::CarouselJs;
