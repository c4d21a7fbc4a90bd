//! Domain types shared by every layer: configuration, field keys, the grid
//! state enum and the render events queued for the view.

pub mod config;
pub mod events;
pub mod fields;
pub mod state;
