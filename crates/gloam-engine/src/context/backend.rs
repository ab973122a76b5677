use anyhow::Result;
use winit::dpi::{LogicalSize, PhysicalSize};

use super::{CanvasRef, ContextOptions, RawContext};

/// A user-visible surface a context renders into.
pub trait DisplaySurface {
    /// Current display size in logical (CSS) pixels.
    fn logical_size(&self) -> LogicalSize<f64>;

    /// Physical pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f64;

    /// Size of the buffer actually rendered into.
    fn backing_size(&self) -> PhysicalSize<u32>;

    fn set_backing_size(&mut self, size: PhysicalSize<u32>);
}

/// Host with a display surface (browser canvas, native window).
pub trait InteractivePlatform {
    /// Resolves `canvas`, or creates a surface of `size` when `canvas` is `None`.
    fn surface(
        &self,
        canvas: Option<&CanvasRef>,
        size: PhysicalSize<u32>,
    ) -> Result<Box<dyn DisplaySurface>>;

    /// Creates a context bound to `surface`.
    fn create_context(
        &self,
        surface: &mut dyn DisplaySurface,
        options: &ContextOptions,
    ) -> Result<Box<dyn RawContext>>;
}

/// Host with buffer-based rendering only.
pub trait OffscreenPlatform {
    /// Creates a context with a `options.width` x `options.height` drawing buffer.
    fn create_context(&self, options: &ContextOptions) -> Result<Box<dyn RawContext>>;
}

/// Environment a factory creates contexts in. Chosen once, at construction.
#[derive(Copy, Clone)]
pub enum Backend<'a> {
    Interactive(&'a dyn InteractivePlatform),
    Offscreen(&'a dyn OffscreenPlatform),
}

impl Backend<'_> {
    #[inline]
    pub fn is_interactive(&self) -> bool {
        matches!(self, Backend::Interactive(_))
    }
}
