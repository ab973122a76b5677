//! Native platform adapters.
//!
//! [`WindowSurface`] lets a winit window act as the display surface of an
//! interactive platform. Its backing store is the wgpu swapchain.

mod window_surface;

pub use window_surface::{SurfacePrefs, WindowSurface};
