use std::any::Any;
use std::fmt;

use super::{
    ContextError, ContextVersion, DebugInfo, DisplaySurface, RawContext, assert_valid,
};

/// What a context renders into.
pub enum ContextTarget {
    Surface(Box<dyn DisplaySurface>),
    Offscreen,
}

impl ContextTarget {
    #[inline]
    pub fn is_surface(&self) -> bool {
        matches!(self, ContextTarget::Surface(_))
    }
}

impl fmt::Debug for ContextTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextTarget::Surface(s) => f
                .debug_struct("Surface")
                .field("backing_size", &s.backing_size())
                .finish(),
            ContextTarget::Offscreen => f.write_str("Offscreen"),
        }
    }
}

/// Instrumentation layers attached to a context.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct InstrumentationState {
    pub state_tracked: bool,
    pub debug_wrapped: bool,
}

/// An active GPU rendering context.
///
/// Holds the (possibly wrapped) raw handle together with its version and
/// target. Values are only produced by [`ContextFactory`](super::ContextFactory)
/// and released by [`destroy`](super::destroy).
pub struct Context {
    raw: Box<dyn RawContext>,
    version: ContextVersion,
    target: ContextTarget,
    pub(crate) instrumentation: InstrumentationState,
}

impl Context {
    /// Validates `raw` and fixes its version.
    pub(crate) fn new(
        raw: Box<dyn RawContext>,
        target: ContextTarget,
    ) -> Result<Self, ContextError> {
        let version = assert_valid(Some(raw.as_ref()), ContextVersion::WebGl1)?;
        Ok(Self {
            raw,
            version,
            target,
            instrumentation: InstrumentationState::default(),
        })
    }

    #[inline]
    pub fn version(&self) -> ContextVersion {
        self.version
    }

    #[inline]
    pub fn is_v2(&self) -> bool {
        self.version == ContextVersion::WebGl2
    }

    /// Fails with [`ContextError::RequiresV2`] unless this is a WebGL2 context.
    pub fn require_v2(&self) -> Result<(), ContextError> {
        match self.version {
            ContextVersion::WebGl2 => Ok(()),
            found => Err(ContextError::RequiresV2 { found }),
        }
    }

    #[inline]
    pub fn instrumentation(&self) -> InstrumentationState {
        self.instrumentation
    }

    #[inline]
    pub fn target(&self) -> &ContextTarget {
        &self.target
    }

    /// The bound display surface, if any.
    pub fn surface(&self) -> Option<&dyn DisplaySurface> {
        match &self.target {
            ContextTarget::Surface(s) => Some(s.as_ref()),
            ContextTarget::Offscreen => None,
        }
    }

    pub fn raw(&self) -> &dyn RawContext {
        self.raw.as_ref()
    }

    pub fn raw_mut(&mut self) -> &mut dyn RawContext {
        self.raw.as_mut()
    }

    /// Downcasts the outermost handle. After debug wrapping this is the wrapper type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.raw.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.raw.as_any_mut().downcast_mut::<T>()
    }

    /// Vendor/renderer strings, or `unknown` for whichever is unavailable.
    pub fn debug_info(&self) -> DebugInfo {
        let info = self.raw.debug_info().unwrap_or_default();
        DebugInfo {
            vendor: or_unknown(info.vendor),
            renderer: or_unknown(info.renderer),
        }
    }

    pub(crate) fn target_mut_and_raw(&mut self) -> (&mut ContextTarget, &mut dyn RawContext) {
        (&mut self.target, self.raw.as_mut())
    }

    pub(crate) fn replace_raw(
        &mut self,
        f: impl FnOnce(Box<dyn RawContext>) -> Box<dyn RawContext>,
    ) {
        // Swap in a placeholder so the box can be moved into `f`.
        let raw = std::mem::replace(&mut self.raw, Box::new(Detached));
        self.raw = f(raw);
    }

    pub(crate) fn into_parts(self) -> (Box<dyn RawContext>, ContextTarget) {
        (self.raw, self.target)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("version", &self.version)
            .field("target", &self.target)
            .field("instrumentation", &self.instrumentation)
            .finish_non_exhaustive()
    }
}

fn or_unknown(s: String) -> String {
    if s.is_empty() { "unknown".to_string() } else { s }
}

struct Detached;

impl RawContext for Detached {
    fn constant(&self, _name: &str) -> Option<u32> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
