//! gloam engine crate.
//!
//! One lifecycle for GPU rendering contexts (acquire, validate, instrument,
//! resize, destroy) on interactive and off-screen hosts.

pub mod context;
pub mod logging;
pub mod platform;

pub use context::{
    Context, ContextError, ContextFactory, ContextOptions, ContextOptionsPatch, ContextVersion,
    ResizeOptions, destroy, resize,
};
