use std::any::Any;

use winit::dpi::PhysicalSize;

use super::ContextVersion;

/// Vendor and renderer strings reported by a context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugInfo {
    pub vendor: String,
    pub renderer: String,
}

/// A raw GPU rendering context produced by a platform constructor.
///
/// The trait is a capability probe: everything beyond the constant lookup is
/// optional. Wrappers (debug layers, state trackers that proxy the context)
/// implement it by forwarding to the wrapped context; they usually cannot
/// report a native type, which is why classification also accepts constant
/// values.
pub trait RawContext: Any {
    /// Version of the concrete context type, if this is an unwrapped native
    /// context. Proxies return `None`.
    fn type_version(&self) -> Option<ContextVersion> {
        None
    }

    /// Reads a named enum constant exposed by the context (e.g. `ARRAY_BUFFER`).
    fn constant(&self, name: &str) -> Option<u32>;

    /// Vendor/renderer strings, when the platform exposes them.
    fn debug_info(&self) -> Option<DebugInfo> {
        None
    }

    /// Off-screen drawing-buffer resize capability.
    fn drawing_buffer_resize(&mut self) -> Option<&mut dyn DrawingBufferResize> {
        None
    }

    /// Off-screen explicit teardown capability.
    fn context_destroy(&mut self) -> Option<&mut dyn ContextDestroy> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Resizes the drawing buffer of an off-screen context.
pub trait DrawingBufferResize {
    fn resize_drawing_buffer(&mut self, size: PhysicalSize<u32>);
}

/// Releases an off-screen context.
pub trait ContextDestroy {
    fn destroy_context(&mut self);
}
