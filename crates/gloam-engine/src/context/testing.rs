//! Test doubles for the platform collaborators.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Result, anyhow};
use winit::dpi::{LogicalSize, PhysicalSize};

use super::{
    CanvasRef, ContextDestroy, ContextOptions, ContextVersion, DebugInfo, DebugWrapFactory,
    DebugWrapOptions, DisplaySurface, DrawingBufferResize, InteractivePlatform, OffscreenPlatform,
    RawContext, StateTracking, StateTrackingOptions, V1_MARKER, V2_MARKER,
};

fn marker_constants(version: ContextVersion) -> HashMap<String, u32> {
    let mut constants = HashMap::from([("ARRAY_BUFFER".to_string(), V1_MARKER)]);
    if version == ContextVersion::WebGl2 {
        constants.insert("TEXTURE_BINDING_3D".to_string(), V2_MARKER);
    }
    constants
}

/// Observes calls made on a [`FakeRaw`] after it has been boxed away.
#[derive(Clone, Default)]
pub struct RawProbe {
    resizes: Rc<RefCell<Vec<PhysicalSize<u32>>>>,
    destroys: Rc<Cell<u32>>,
}

impl RawProbe {
    pub fn resizes(&self) -> Vec<PhysicalSize<u32>> {
        self.resizes.borrow().clone()
    }

    pub fn destroys(&self) -> u32 {
        self.destroys.get()
    }
}

pub struct FakeRaw {
    native: Option<ContextVersion>,
    constants: HashMap<String, u32>,
    info: Option<DebugInfo>,
    can_resize: bool,
    can_destroy: bool,
    tracked: u32,
    probe: RawProbe,
}

impl FakeRaw {
    /// A native context: reports its type and exposes the marker constants.
    pub fn native(version: ContextVersion) -> Self {
        Self {
            native: Some(version),
            ..Self::proxy(version)
        }
    }

    /// A wrapped context: constants only, no native type.
    pub fn proxy(version: ContextVersion) -> Self {
        Self {
            native: None,
            constants: marker_constants(version),
            info: None,
            can_resize: false,
            can_destroy: false,
            tracked: 0,
            probe: RawProbe::default(),
        }
    }

    pub fn without_constants(mut self) -> Self {
        self.constants.clear();
        self
    }

    pub fn with_debug_info(mut self, vendor: &str, renderer: &str) -> Self {
        self.info = Some(DebugInfo {
            vendor: vendor.to_string(),
            renderer: renderer.to_string(),
        });
        self
    }

    pub fn with_resize(mut self) -> Self {
        self.can_resize = true;
        self
    }

    pub fn with_destroy(mut self) -> Self {
        self.can_destroy = true;
        self
    }

    pub fn probe(&self) -> RawProbe {
        self.probe.clone()
    }

    /// Number of state trackers attached to this context.
    pub fn tracked(&self) -> u32 {
        self.tracked
    }
}

impl RawContext for FakeRaw {
    fn type_version(&self) -> Option<ContextVersion> {
        self.native
    }

    fn constant(&self, name: &str) -> Option<u32> {
        self.constants.get(name).copied()
    }

    fn debug_info(&self) -> Option<DebugInfo> {
        self.info.clone()
    }

    fn drawing_buffer_resize(&mut self) -> Option<&mut dyn DrawingBufferResize> {
        if self.can_resize { Some(self as &mut dyn DrawingBufferResize) } else { None }
    }

    fn context_destroy(&mut self) -> Option<&mut dyn ContextDestroy> {
        if self.can_destroy { Some(self as &mut dyn ContextDestroy) } else { None }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl DrawingBufferResize for FakeRaw {
    fn resize_drawing_buffer(&mut self, size: PhysicalSize<u32>) {
        self.probe.resizes.borrow_mut().push(size);
    }
}

impl ContextDestroy for FakeRaw {
    fn destroy_context(&mut self) {
        self.probe.destroys.set(self.probe.destroys.get() + 1);
    }
}

/// An object with named constants that is not a context.
#[derive(Default)]
pub struct NotAContext {
    constants: HashMap<String, u32>,
}

impl NotAContext {
    pub fn with_constant(name: &str, value: u32) -> Self {
        Self {
            constants: HashMap::from([(name.to_string(), value)]),
        }
    }
}

impl RawContext for NotAContext {
    fn constant(&self, name: &str) -> Option<u32> {
        self.constants.get(name).copied()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Forwards everything except the native type, like a JS proxy would.
struct DebugProxy {
    inner: Box<dyn RawContext>,
}

impl RawContext for DebugProxy {
    fn constant(&self, name: &str) -> Option<u32> {
        self.inner.constant(name)
    }

    fn debug_info(&self) -> Option<DebugInfo> {
        self.inner.debug_info()
    }

    fn drawing_buffer_resize(&mut self) -> Option<&mut dyn DrawingBufferResize> {
        self.inner.drawing_buffer_resize()
    }

    fn context_destroy(&mut self) -> Option<&mut dyn ContextDestroy> {
        self.inner.context_destroy()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Default)]
pub struct ProxyDebugFactory {
    wrapped: Cell<u32>,
}

impl ProxyDebugFactory {
    pub fn wrapped(&self) -> u32 {
        self.wrapped.get()
    }
}

impl DebugWrapFactory for ProxyDebugFactory {
    fn wrap(&self, raw: Box<dyn RawContext>, options: &DebugWrapOptions) -> Box<dyn RawContext> {
        assert!(options.debug);
        self.wrapped.set(self.wrapped.get() + 1);
        Box::new(DebugProxy { inner: raw })
    }
}

#[derive(Default)]
pub struct CountingTracker {
    attached: Cell<u32>,
    last_copy_state: Cell<Option<bool>>,
}

impl CountingTracker {
    pub fn attached(&self) -> u32 {
        self.attached.get()
    }

    pub fn last_copy_state(&self) -> Option<bool> {
        self.last_copy_state.get()
    }
}

impl StateTracking for CountingTracker {
    fn attach(&self, raw: &mut dyn RawContext, options: &StateTrackingOptions) {
        self.attached.set(self.attached.get() + 1);
        self.last_copy_state.set(Some(options.copy_state));
        (options.log)("state tracker attached");

        if let Some(fake) = raw.as_any_mut().downcast_mut::<FakeRaw>() {
            fake.tracked += 1;
        }
    }
}

/// Observes a [`FakeSurface`] after it has been boxed away.
#[derive(Clone)]
pub struct SurfaceProbe {
    backing: Rc<Cell<PhysicalSize<u32>>>,
    writes: Rc<Cell<u32>>,
}

impl SurfaceProbe {
    pub fn backing(&self) -> PhysicalSize<u32> {
        self.backing.get()
    }

    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

pub struct FakeSurface {
    logical: LogicalSize<f64>,
    ratio: f64,
    probe: SurfaceProbe,
}

impl FakeSurface {
    /// A surface with the given CSS size and device pixel ratio; backing store starts at 300x150.
    pub fn new(width: f64, height: f64, ratio: f64) -> Self {
        let probe = SurfaceProbe {
            backing: Rc::new(Cell::new(PhysicalSize::new(300, 150))),
            writes: Rc::new(Cell::new(0)),
        };
        Self {
            logical: LogicalSize::new(width, height),
            ratio,
            probe,
        }
    }

    pub fn probe(&self) -> SurfaceProbe {
        self.probe.clone()
    }
}

impl DisplaySurface for FakeSurface {
    fn logical_size(&self) -> LogicalSize<f64> {
        self.logical
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.ratio
    }

    fn backing_size(&self) -> PhysicalSize<u32> {
        self.probe.backing.get()
    }

    fn set_backing_size(&mut self, size: PhysicalSize<u32>) {
        self.probe.backing.set(size);
        self.probe.writes.set(self.probe.writes.get() + 1);
    }
}

enum Produce {
    Context(ContextVersion),
    Prepared(RefCell<Option<FakeRaw>>),
    NotAContext,
    Fail,
}

impl Produce {
    fn make(&self) -> Result<Box<dyn RawContext>> {
        match self {
            Produce::Context(version) => Ok(Box::new(FakeRaw::native(*version))),
            Produce::Prepared(raw) => match raw.borrow_mut().take() {
                Some(raw) => Ok(Box::new(raw)),
                None => Err(anyhow!("prepared context already handed out")),
            },
            Produce::NotAContext => Ok(Box::new(NotAContext::default())),
            Produce::Fail => Err(anyhow!("no GPU adapter available")),
        }
    }
}

pub struct FakeOffscreen {
    produce: Produce,
    last_options: RefCell<Option<ContextOptions>>,
}

impl FakeOffscreen {
    pub fn new(version: ContextVersion) -> Self {
        Self::producing(Produce::Context(version))
    }

    /// Hands out `raw` on the first request and fails afterwards.
    pub fn returning(raw: FakeRaw) -> Self {
        Self::producing(Produce::Prepared(RefCell::new(Some(raw))))
    }

    pub fn failing() -> Self {
        Self::producing(Produce::Fail)
    }

    pub fn not_a_context() -> Self {
        Self::producing(Produce::NotAContext)
    }

    fn producing(produce: Produce) -> Self {
        Self {
            produce,
            last_options: RefCell::new(None),
        }
    }

    pub fn last_options(&self) -> Option<ContextOptions> {
        self.last_options.borrow().clone()
    }
}

impl OffscreenPlatform for FakeOffscreen {
    fn create_context(&self, options: &ContextOptions) -> Result<Box<dyn RawContext>> {
        *self.last_options.borrow_mut() = Some(options.clone());
        self.produce.make()
    }
}

pub struct FakeInteractive {
    version: ContextVersion,
    fail_surface: bool,
    requested: RefCell<Option<(Option<CanvasRef>, PhysicalSize<u32>)>>,
    contexts_requested: Cell<u32>,
}

impl FakeInteractive {
    pub fn new(version: ContextVersion) -> Self {
        Self {
            version,
            fail_surface: false,
            requested: RefCell::new(None),
            contexts_requested: Cell::new(0),
        }
    }

    pub fn failing_surface(mut self) -> Self {
        self.fail_surface = true;
        self
    }

    pub fn requested(&self) -> Option<(Option<CanvasRef>, PhysicalSize<u32>)> {
        self.requested.borrow().clone()
    }

    pub fn contexts_requested(&self) -> u32 {
        self.contexts_requested.get()
    }
}

impl InteractivePlatform for FakeInteractive {
    fn surface(
        &self,
        canvas: Option<&CanvasRef>,
        size: PhysicalSize<u32>,
    ) -> Result<Box<dyn DisplaySurface>> {
        *self.requested.borrow_mut() = Some((canvas.cloned(), size));
        if self.fail_surface {
            return Err(anyhow!("canvas not found"));
        }
        Ok(Box::new(FakeSurface::new(
            f64::from(size.width),
            f64::from(size.height),
            1.0,
        )))
    }

    fn create_context(
        &self,
        _surface: &mut dyn DisplaySurface,
        _options: &ContextOptions,
    ) -> Result<Box<dyn RawContext>> {
        self.contexts_requested.set(self.contexts_requested.get() + 1);
        Ok(Box::new(FakeRaw::native(self.version)))
    }
}
