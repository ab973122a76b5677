use super::ContextVersion;

/// Failures raised by context acquisition and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    /// The handle is not a GPU rendering context.
    #[error("invalid GPU rendering context")]
    InvalidContext,

    /// A WebGL2-only operation was invoked on a WebGL1 handle.
    #[error("operation requires a WebGL2 context, found {found}")]
    RequiresV2 { found: ContextVersion },

    /// No display surface could be obtained.
    #[error("failed to acquire display surface: {0}")]
    SurfaceAcquisition(String),

    /// The platform constructor produced no context.
    #[error("failed to create GPU context: {0}")]
    ContextCreation(String),
}
