//! Process-wide context defaults.
//!
//! These are global configuration, not call-scoped state. Prefer passing an
//! explicit defaults value to [`ContextFactory::with_defaults`]; the process
//! defaults are only consulted by factories built without one.
//!
//! [`ContextFactory::with_defaults`]: super::ContextFactory::with_defaults

use parking_lot::{RwLock, const_rwlock};

use super::{ContextOptions, ContextOptionsPatch};

static PROCESS_DEFAULTS: RwLock<ContextOptions> = const_rwlock(ContextOptions::builtin());

/// Returns a snapshot of the current process defaults.
pub fn defaults() -> ContextOptions {
    PROCESS_DEFAULTS.read().clone()
}

/// Merges `patch` into the process defaults. Last write wins per field.
///
/// Unknown keys are stored as-is and forwarded to platform constructors.
pub fn set_defaults(patch: &ContextOptionsPatch) {
    PROCESS_DEFAULTS.write().apply(patch);
    log::debug!("context defaults updated: {patch:?}");
}

/// Restores the built-in defaults.
pub fn reset_defaults() {
    *PROCESS_DEFAULTS.write() = ContextOptions::builtin();
}
