use super::teardown::{destroy, release};
use super::{
    Backend, Context, ContextError, ContextOptions, ContextOptionsPatch, ContextTarget,
    ContextVersion, DebugWrapFactory, InstrumentationState, Instrumenter, InteractivePlatform,
    OffscreenPlatform, StateTracking, assert_valid, defaults,
};

/// What to do when a surface or context cannot be obtained.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return the failure as an error.
    Raise,
    /// Log the failure and return `Ok(None)`.
    ReturnNone,
}

impl FailurePolicy {
    pub fn from_options(options: &ContextOptions) -> Self {
        if options.throw_on_failure {
            FailurePolicy::Raise
        } else {
            FailurePolicy::ReturnNone
        }
    }

    /// Folds a collaborator result into the policy's outcome.
    pub fn resolve<T>(
        self,
        result: anyhow::Result<T>,
        to_error: impl FnOnce(String) -> ContextError,
    ) -> Result<Option<T>, ContextError> {
        match result {
            Ok(v) => Ok(Some(v)),
            Err(err) => self.fail(to_error(format!("{err:#}"))),
        }
    }

    fn fail<T>(self, err: ContextError) -> Result<Option<T>, ContextError> {
        match self {
            FailurePolicy::Raise => Err(err),
            FailurePolicy::ReturnNone => {
                log::error!("{err}");
                Ok(None)
            }
        }
    }
}

/// Creates instrumented contexts for one host environment.
///
/// The environment is fixed by the constructor. Defaults come from
/// [`with_defaults`](Self::with_defaults) when set, otherwise from a snapshot
/// of the process defaults taken on every call.
pub struct ContextFactory<'a> {
    backend: Backend<'a>,
    defaults: Option<ContextOptions>,
    instrumenter: Instrumenter<'a>,
}

impl<'a> ContextFactory<'a> {
    pub fn new(backend: Backend<'a>) -> Self {
        Self {
            backend,
            defaults: None,
            instrumenter: Instrumenter::new(),
        }
    }

    pub fn interactive(platform: &'a dyn InteractivePlatform) -> Self {
        Self::new(Backend::Interactive(platform))
    }

    pub fn offscreen(platform: &'a dyn OffscreenPlatform) -> Self {
        Self::new(Backend::Offscreen(platform))
    }

    pub fn with_defaults(mut self, defaults: ContextOptions) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn with_state_tracking(mut self, tracker: &'a dyn StateTracking) -> Self {
        self.instrumenter = self.instrumenter.with_state_tracking(tracker);
        self
    }

    pub fn with_debug_factory(mut self, factory: &'a dyn DebugWrapFactory) -> Self {
        self.instrumenter = self.instrumenter.with_debug_factory(factory);
        self
    }

    #[inline]
    pub fn backend(&self) -> Backend<'a> {
        self.backend
    }

    /// Options a call with `overrides` would use.
    pub fn options(&self, overrides: &ContextOptionsPatch) -> ContextOptions {
        match &self.defaults {
            Some(d) => d.merged(overrides),
            None => defaults().merged(overrides),
        }
    }

    /// Acquires, validates and instruments a context.
    ///
    /// Returns `Ok(None)` when acquisition failed and `throw_on_failure` is
    /// off. A handle that is not a context is always an error.
    pub fn create_context(
        &self,
        overrides: &ContextOptionsPatch,
    ) -> Result<Option<Context>, ContextError> {
        let options = self.options(overrides);
        let policy = FailurePolicy::from_options(&options);

        let created = match self.backend {
            Backend::Interactive(platform) => {
                let Some(mut surface) = policy.resolve(
                    platform.surface(options.canvas.as_ref(), options.size()),
                    ContextError::SurfaceAcquisition,
                )?
                else {
                    return Ok(None);
                };

                policy
                    .resolve(
                        platform.create_context(surface.as_mut(), &options),
                        ContextError::ContextCreation,
                    )?
                    .map(|raw| (raw, ContextTarget::Surface(surface)))
            }
            Backend::Offscreen(platform) => policy
                .resolve(platform.create_context(&options), ContextError::ContextCreation)?
                .map(|raw| (raw, ContextTarget::Offscreen)),
        };

        let Some((raw, target)) = created else {
            return Ok(None);
        };

        // The platform already created the handle; anything rejected past this
        // point must be released, not dropped.
        if let Err(err) = assert_valid(Some(raw.as_ref()), ContextVersion::WebGl1) {
            release(raw, &target);
            return Err(err);
        }
        let context = Context::new(raw, target)?;

        if context.version() == ContextVersion::WebGl1 && !options.webgl1 {
            destroy(context);
            return policy.fail(ContextError::ContextCreation(
                "WebGL2 unavailable and WebGL1 fallback disabled".to_string(),
            ));
        }

        let context = self.instrumenter.instrument(context, &options);
        log_created(&context);

        Ok(Some(context))
    }
}

fn log_created(context: &Context) {
    log::info!("{}", creation_message(context));
}

/// `"<version>[ debug] context (<vendor>,<renderer>)"`.
fn creation_message(context: &Context) -> String {
    let InstrumentationState { debug_wrapped, .. } = context.instrumentation();
    let info = context.debug_info();
    let suffix = if debug_wrapped { " debug" } else { "" };

    format!(
        "{}{} context ({},{})",
        context.version(),
        suffix,
        info.vendor,
        info.renderer
    )
}
