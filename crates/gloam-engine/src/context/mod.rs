//! GPU rendering context lifecycle.
//!
//! This module is responsible for:
//! - merging per-call options over explicit or process-wide defaults
//! - acquiring a raw context from an interactive or off-screen platform
//! - validating and classifying the raw handle (WebGL1 / WebGL2)
//! - layering state tracking and debug wrapping onto it
//! - keeping the drawing buffer in sync with the display size
//! - releasing it where the platform allows
//!
//! Platform constructors, state trackers and debug wrappers are supplied by
//! the caller through the traits re-exported here.

mod backend;
pub(crate) mod defaults;
mod error;
mod factory;
mod handle;
mod instrument;
mod options;
mod raw;
mod resize;
mod teardown;
mod version;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{Backend, DisplaySurface, InteractivePlatform, OffscreenPlatform};
pub use defaults::{defaults, reset_defaults, set_defaults};
pub use error::ContextError;
pub use factory::{ContextFactory, FailurePolicy};
pub use handle::{Context, ContextTarget, InstrumentationState};
pub use instrument::{
    DebugWrapFactory, DebugWrapOptions, Instrumenter, StateTracking, StateTrackingOptions,
};
pub use options::{CanvasRef, ContextOptions, ContextOptionsPatch, ResizeOptions};
pub use raw::{ContextDestroy, DebugInfo, DrawingBufferResize, RawContext};
pub use resize::resize;
pub use teardown::destroy;
pub use version::{
    Classification, ContextVersion, V1_MARKER, V2_MARKER, assert_valid, classify, is_context,
    is_v2,
};
