//! 2D drawing surface
//!
//! The show draws through the [`Surface`] trait, a small slice of the HTML
//! canvas 2D context. On the web it is backed by `CanvasRenderingContext2d`;
//! tests and the native runner use [`RecordingSurface`].

pub mod color;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use color::Color;
pub use surface::{DrawCommand, Font, RecordingSurface, Surface, TextAlign};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
