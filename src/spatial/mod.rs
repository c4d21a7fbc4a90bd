//! Spatial layout: grid dimensions and viewport size classes.

pub mod breakpoints;
pub mod dims;

pub use breakpoints::Breakpoint;
pub use dims::{compute_dimensions, row_count_from_columns, GridDims};
