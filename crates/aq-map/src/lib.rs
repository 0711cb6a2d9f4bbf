//! Map marker, popup and legend rendering
//!
//! Turns site snapshots into renderable markers: position, label, color and
//! popup payload, plus the HTML fragments the map surface injects. Sites
//! that cannot be placed are skipped, never reported as errors.

pub mod cluster;
mod html;
pub mod legend;
pub mod marker;
pub mod navigation;
pub mod node;
pub mod popup;

pub use cluster::*;
pub use legend::*;
pub use marker::*;
pub use navigation::*;
pub use node::*;
pub use popup::*;
