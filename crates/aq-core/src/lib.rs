//! Core data types, classification and color mapping for air-quality readings
//!
//! This crate holds the single canonical threshold table and palette used by
//! every map, legend and badge. Classification never fails: missing or
//! out-of-range input degrades to [`Category::Unknown`].

pub mod category;
pub mod classify;
pub mod color;
pub mod feed;
pub mod provider;
pub mod standards;
pub mod types;

pub use category::*;
pub use classify::*;
pub use color::*;
pub use feed::*;
pub use provider::*;
pub use standards::*;
pub use types::*;
