use winit::dpi::PhysicalSize;

use super::{Context, ContextTarget, DisplaySurface, ResizeOptions};

/// Synchronizes the context's drawing buffer with its display size.
///
/// Surface-bound contexts get a backing store of `logical size × ratio`,
/// where the logical size is the explicit width/height or the surface's
/// current logical size, and the ratio is the device pixel ratio when
/// `use_device_pixels` is set (1 otherwise). Off-screen contexts are resized
/// only when both width and height are given, and only if the context
/// supports it.
pub fn resize(context: &mut Context, options: &ResizeOptions) {
    let (target, raw) = context.target_mut_and_raw();

    match target {
        ContextTarget::Surface(surface) => resize_surface(surface.as_mut(), options),
        ContextTarget::Offscreen => {
            let (Some(width), Some(height)) = (options.width, options.height) else {
                return;
            };

            match raw.drawing_buffer_resize() {
                Some(ext) => ext.resize_drawing_buffer(PhysicalSize::new(width, height)),
                None => log::trace!("off-screen context cannot resize its drawing buffer"),
            }
        }
    }
}

fn resize_surface(surface: &mut dyn DisplaySurface, options: &ResizeOptions) {
    let ratio = if options.use_device_pixels {
        surface.device_pixel_ratio()
    } else {
        1.0
    };

    let logical = surface.logical_size();
    let width = options.width.map_or(logical.width, f64::from);
    let height = options.height.map_or(logical.height, f64::from);

    // Float-to-int `as` truncates and saturates, like assigning a canvas size.
    let backing = PhysicalSize::new((width * ratio) as u32, (height * ratio) as u32);

    // Rewriting an unchanged size would still reset the buffer on some hosts.
    if surface.backing_size() != backing {
        surface.set_backing_size(backing);
    }
}
