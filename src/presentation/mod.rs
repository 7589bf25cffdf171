//! FieldExplainer - Presentation module
//!
//! Floating icon window and its placement

pub mod floating_icon;
pub mod placement;

pub use floating_icon::{FloatingIcon, WINDOW_LABEL};
