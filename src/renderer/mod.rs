//! Rendering module
//!
//! Scene state becomes an ordered list of draw intents (`frame`), which any
//! `RenderSink` replays. On the web that sink is a Canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod commands;
pub mod frame;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use commands::{Color, DrawCommand, Palette, RenderSink, Stroke};
pub use frame::{Frame, build_frame};
