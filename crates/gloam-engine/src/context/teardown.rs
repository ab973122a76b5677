use super::{Context, ContextTarget, RawContext};

/// Releases a context.
///
/// Off-screen contexts with an explicit destroy capability are destroyed;
/// everything else is left to the host (a display surface has no destroy
/// path). Consuming the context keeps teardown to a single call.
pub fn destroy(context: Context) {
    let (raw, target) = context.into_parts();
    release(raw, &target);
}

/// Releases a raw handle that never became a [`Context`].
pub(crate) fn release(mut raw: Box<dyn RawContext>, target: &ContextTarget) {
    match target {
        ContextTarget::Surface(_) => log::trace!("surface-bound context released to host"),
        ContextTarget::Offscreen => match raw.context_destroy() {
            Some(ext) => ext.destroy_context(),
            None => log::trace!("off-screen context has no destroy capability"),
        },
    }
}
