use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use winit::dpi::PhysicalSize;

/// Identifies the display surface a context should bind to.
///
/// Resolution is up to the interactive platform: an element id in a browser,
/// a window id (`u64::from(WindowId)`) on native hosts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanvasRef {
    Id(String),
    Handle(u64),
}

/// Complete context configuration.
///
/// Built per call by overlaying a [`ContextOptionsPatch`] on a defaults value.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextOptions {
    /// Attempt a WebGL2 context.
    pub webgl2: bool,

    /// Accept a WebGL1 context when WebGL2 is unavailable.
    pub webgl1: bool,

    /// Return an error on surface/context creation failure instead of `None`.
    pub throw_on_failure: bool,

    /// Attach the state-tracking wrapper.
    pub manage_state: bool,

    /// Surface to bind to on interactive hosts; `None` lets the platform pick or create one.
    pub canvas: Option<CanvasRef>,

    /// Wrap the context with the debug layer (interactive hosts only).
    pub debug: bool,

    pub width: u32,
    pub height: u32,

    /// Scale the backing store by the device pixel ratio on resize.
    pub use_device_pixels: bool,

    /// Fields this crate does not interpret; forwarded to platform constructors.
    pub extra: BTreeMap<String, Value>,
}

impl ContextOptions {
    /// Built-in defaults used before any process-wide override.
    pub const fn builtin() -> Self {
        Self {
            webgl2: true,
            webgl1: true,
            throw_on_failure: true,
            manage_state: true,
            canvas: None,
            debug: false,
            width: 800,
            height: 600,
            use_device_pixels: false,
            extra: BTreeMap::new(),
        }
    }

    /// Requested drawing-buffer size.
    #[inline]
    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.width, self.height)
    }

    /// Overlays every field set in `patch`; extras are merged key by key.
    pub fn apply(&mut self, patch: &ContextOptionsPatch) {
        let ContextOptionsPatch {
            webgl2,
            webgl1,
            throw_on_failure,
            manage_state,
            canvas,
            debug,
            width,
            height,
            use_device_pixels,
            extra,
        } = patch;

        overlay(&mut self.webgl2, webgl2);
        overlay(&mut self.webgl1, webgl1);
        overlay(&mut self.throw_on_failure, throw_on_failure);
        overlay(&mut self.manage_state, manage_state);
        overlay(&mut self.debug, debug);
        overlay(&mut self.width, width);
        overlay(&mut self.height, height);
        overlay(&mut self.use_device_pixels, use_device_pixels);

        // `canvas: null` clears an inherited canvas.
        if let Some(canvas) = canvas {
            self.canvas = canvas.clone();
        }

        for (key, value) in extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    /// Returns a fresh value with `patch` applied; `self` is left untouched.
    pub fn merged(&self, patch: &ContextOptionsPatch) -> Self {
        let mut out = self.clone();
        out.apply(patch);
        out
    }
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self::builtin()
    }
}

fn overlay<T: Clone>(dst: &mut T, src: &Option<T>) {
    if let Some(v) = src {
        *dst = v.clone();
    }
}

/// Partial options; every `Some` field wins over the base it is applied to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextOptionsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webgl2: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webgl1: Option<bool>,
    #[serde(default, alias = "throwOnError", skip_serializing_if = "Option::is_none")]
    pub throw_on_failure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manage_state: Option<bool>,
    /// Outer `None` leaves the base untouched, `Some(None)` clears it.
    #[serde(
        default,
        deserialize_with = "deserialize_canvas",
        skip_serializing_if = "Option::is_none"
    )]
    pub canvas: Option<Option<CanvasRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_device_pixels: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ContextOptionsPatch {
    /// Parses a patch from a JSON object using camelCase field names.
    ///
    /// Unknown keys are kept in `extra`.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn size(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn manage_state(mut self, manage_state: bool) -> Self {
        self.manage_state = Some(manage_state);
        self
    }

    pub fn throw_on_failure(mut self, throw_on_failure: bool) -> Self {
        self.throw_on_failure = Some(throw_on_failure);
        self
    }

    pub fn webgl1(mut self, webgl1: bool) -> Self {
        self.webgl1 = Some(webgl1);
        self
    }

    pub fn canvas(mut self, canvas: Option<CanvasRef>) -> Self {
        self.canvas = Some(canvas);
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

// A present `null` must become `Some(None)`; serde's default maps it to `None`.
fn deserialize_canvas<'de, D>(de: D) -> Result<Option<Option<CanvasRef>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<CanvasRef>::deserialize(de).map(Some)
}

/// Parameters for [`resize`](super::resize).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ResizeOptions {
    /// Logical width; falls back to the surface's logical width.
    pub width: Option<u32>,
    /// Logical height; falls back to the surface's logical height.
    pub height: Option<u32>,
    pub use_device_pixels: bool,
}

impl ResizeOptions {
    pub fn size(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            use_device_pixels: false,
        }
    }

    pub fn use_device_pixels(mut self, use_device_pixels: bool) -> Self {
        self.use_device_pixels = use_device_pixels;
        self
    }
}
