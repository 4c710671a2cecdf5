//! Image-quality-assessment results dashboard.
//!
//! The [`data`] module holds everything that does not need a window:
//! study tables, selection state and the aggregations the charts are fed
//! with. [`settings`] persists user preferences and [`color`] assigns
//! chart colours.

pub mod color;
pub mod data;
pub mod settings;
