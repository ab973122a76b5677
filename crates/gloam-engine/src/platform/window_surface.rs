use std::sync::Arc;

use anyhow::{Context as _, Result};
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::window::Window;

use crate::context::DisplaySurface;

/// Presentation preferences for a [`WindowSurface`].
#[derive(Debug, Clone)]
pub struct SurfacePrefs {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO is broadly supported.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode; replaced by a supported mode if the surface rejects it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Hint only; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for SurfacePrefs {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            desired_maximum_frame_latency: 2,
        }
    }
}

/// A winit window presented through a wgpu surface.
///
/// Logical size and pixel ratio come from the window; the backing store is
/// the surface configuration.
pub struct WindowSurface {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    config: wgpu::SurfaceConfiguration,

    /// Requested backing size. May be zero while minimized; the surface keeps
    /// its last valid configuration until a non-zero size arrives.
    size: PhysicalSize<u32>,
}

impl WindowSurface {
    /// Creates and configures a surface for `window` at its current inner size.
    pub fn new(
        instance: &wgpu::Instance,
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        window: Arc<Window>,
        prefs: SurfacePrefs,
    ) -> Result<Self> {
        let size = window.inner_size();

        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("failed to create wgpu surface")?;

        let caps = surface.get_capabilities(adapter);
        let format = choose_surface_format(&caps.formats, prefs.prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = choose_alpha_mode(&caps.alpha_modes, prefs.alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: prefs.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: prefs.desired_maximum_frame_latency,
        };

        surface.configure(device, &config);
        log::debug!("window surface configured: {format:?} {}x{}", config.width, config.height);

        Ok(Self {
            window,
            surface,
            device: device.clone(),
            config,
            size,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn surface(&self) -> &wgpu::Surface<'static> {
        &self.surface
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }
}

impl DisplaySurface for WindowSurface {
    fn logical_size(&self) -> LogicalSize<f64> {
        self.window.inner_size().to_logical(self.window.scale_factor())
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }

    fn backing_size(&self) -> PhysicalSize<u32> {
        self.size
    }

    fn set_backing_size(&mut self, size: PhysicalSize<u32>) {
        self.size = size;

        // A minimized window keeps its old configuration until it has area again.
        let Some(size) = configurable_size(size) else {
            return;
        };

        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }
}

/// `size` if the surface can be configured with it; wgpu rejects empty extents.
fn configurable_size(size: PhysicalSize<u32>) -> Option<PhysicalSize<u32>> {
    (size.width > 0 && size.height > 0).then_some(size)
}

fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        if let Some(f) = preferred.into_iter().find(|f| formats.contains(f)) {
            return Some(f);
        }
    }

    formats.first().copied()
}

fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}
