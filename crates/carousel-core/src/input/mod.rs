//! Input mapping module
//!
//! Turns keyboard keys and touch gestures into navigation commands.

mod keys;
mod swipe;

pub use keys::KeyCommand;
pub use swipe::{SwipeDirection, SwipeTracker, SWIPE_THRESHOLD_PX};
