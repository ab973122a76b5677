use std::sync::Once;

use super::{Context, ContextOptions, RawContext};
use crate::logging;

/// Options handed to a [`StateTracking`] implementation.
#[derive(Copy, Clone)]
pub struct StateTrackingOptions {
    /// Snapshot the current GPU state when attaching.
    pub copy_state: bool,
    /// Sink for the tracker's diagnostics.
    pub log: fn(&str),
}

/// Options handed to a [`DebugWrapFactory`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DebugWrapOptions {
    pub debug: bool,
}

/// Installs the state-tracking layer on a context.
pub trait StateTracking {
    /// Attaches tracking in place. Calling twice on one context double-wraps it;
    /// [`Instrumenter`] never does.
    fn attach(&self, raw: &mut dyn RawContext, options: &StateTrackingOptions);
}

/// Produces debug-validating wrappers around a context.
pub trait DebugWrapFactory {
    /// Returns the wrapped context. The wrapper must forward constant reads so
    /// the result still classifies.
    fn wrap(&self, raw: Box<dyn RawContext>, options: &DebugWrapOptions) -> Box<dyn RawContext>;
}

/// Verbosity used for state tracker diagnostics.
const STATE_TRACKING_VERBOSITY: u8 = 1;

fn tracking_log(msg: &str) {
    if let Some(level) = logging::level_for(STATE_TRACKING_VERBOSITY).to_level() {
        log::log!(target: "gloam::state", level, "{msg}");
    }
}

/// Layers state tracking and debug wrapping onto freshly created contexts.
///
/// Both collaborators are optional; a missing one is reported once per
/// instrumenter and otherwise ignored.
pub struct Instrumenter<'a> {
    state_tracking: Option<&'a dyn StateTracking>,
    debug_factory: Option<&'a dyn DebugWrapFactory>,
    missing_tracker: Once,
    missing_debug_factory: Once,
}

impl<'a> Instrumenter<'a> {
    pub fn new() -> Self {
        Self {
            state_tracking: None,
            debug_factory: None,
            missing_tracker: Once::new(),
            missing_debug_factory: Once::new(),
        }
    }

    pub fn with_state_tracking(mut self, tracker: &'a dyn StateTracking) -> Self {
        self.state_tracking = Some(tracker);
        self
    }

    pub fn with_debug_factory(mut self, factory: &'a dyn DebugWrapFactory) -> Self {
        self.debug_factory = Some(factory);
        self
    }

    /// Instruments `context` according to `options`.
    ///
    /// Layers already present are left alone, so instrumenting twice attaches
    /// nothing new. Use the returned context; the debug layer may have
    /// replaced the raw handle.
    pub fn instrument(&self, mut context: Context, options: &ContextOptions) -> Context {
        if options.manage_state && !context.instrumentation.state_tracked {
            self.attach_state_tracking(&mut context);
        }

        if options.debug
            && context.target().is_surface()
            && !context.instrumentation.debug_wrapped
        {
            self.wrap_debug(&mut context);
        }

        context
    }

    fn attach_state_tracking(&self, context: &mut Context) {
        let Some(tracker) = self.state_tracking else {
            self.missing_tracker.call_once(|| {
                log::warn!("state management requested but no state tracker was provided");
            });
            return;
        };

        let options = StateTrackingOptions {
            copy_state: false,
            log: tracking_log,
        };
        tracker.attach(context.raw_mut(), &options);
        context.instrumentation.state_tracked = true;
    }

    fn wrap_debug(&self, context: &mut Context) {
        let Some(factory) = self.debug_factory else {
            self.missing_debug_factory.call_once(|| {
                log::warn!("debug context requested but no debug wrapper factory was provided");
            });
            return;
        };

        context.replace_raw(|raw| factory.wrap(raw, &DebugWrapOptions { debug: true }));
        context.instrumentation.debug_wrapped = true;
        logging::raise_verbosity(1);
    }
}

impl Default for Instrumenter<'_> {
    fn default() -> Self {
        Self::new()
    }
}
