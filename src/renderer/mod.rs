//! Rendering module
//!
//! The simulation hands out a [`RenderSnapshot`] each frame; the browser paints
//! it with the Canvas 2D API.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod snapshot;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use snapshot::{EnemyView, PlayerView, RenderSnapshot};
