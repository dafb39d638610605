//! Viewport engine: logical frame, pan/zoom state, and the display model.

pub mod frame;
pub mod render;
pub mod state;

pub use frame::*;
pub use render::*;
pub use state::*;
