//! Status overlay and UI-thread marshaling
//!
//! A persistent, normally-hidden status element plus the single-threaded
//! executor capability all of its mutations are posted onto.

pub mod overlay;
pub mod ui_executor;

pub use overlay::{OverlayState, StatusControl, StatusOverlay};
pub use ui_executor::{SingleThreadExecutor, UiExecutor, UiJob};
