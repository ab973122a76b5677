use std::fmt;

use super::{ContextError, RawContext};

/// Value of `ARRAY_BUFFER`; every WebGL context exposes it.
pub const V1_MARKER: u32 = 0x8892;

/// Value of `TEXTURE_BINDING_3D`; only WebGL2 contexts expose it.
pub const V2_MARKER: u32 = 0x806A;

const V1_MARKER_NAME: &str = "ARRAY_BUFFER";
const V2_MARKER_NAME: &str = "TEXTURE_BINDING_3D";

/// API level of a context. Fixed for the lifetime of a [`Context`](super::Context).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextVersion {
    WebGl1,
    WebGl2,
}

impl fmt::Display for ContextVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextVersion::WebGl1 => f.write_str("WebGL1"),
            ContextVersion::WebGl2 => f.write_str("WebGL2"),
        }
    }
}

/// Result of probing a handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Classification {
    V1,
    V2,
    Invalid,
}

impl Classification {
    #[inline]
    pub fn version(self) -> Option<ContextVersion> {
        match self {
            Classification::V1 => Some(ContextVersion::WebGl1),
            Classification::V2 => Some(ContextVersion::WebGl2),
            Classification::Invalid => None,
        }
    }
}

/// Classifies a handle as WebGL1, WebGL2 or not a context.
///
/// A handle matches a version when its native type says so or when it exposes
/// the version's marker constant with the expected value. Comparing the value
/// keeps unrelated objects with a same-named property from passing. WebGL2 is
/// tested first since WebGL2 contexts also expose the WebGL1 marker.
pub fn classify(handle: Option<&dyn RawContext>) -> Classification {
    let Some(handle) = handle else {
        return Classification::Invalid;
    };

    let native = handle.type_version();

    if native == Some(ContextVersion::WebGl2)
        || handle.constant(V2_MARKER_NAME) == Some(V2_MARKER)
    {
        return Classification::V2;
    }

    if native == Some(ContextVersion::WebGl1)
        || handle.constant(V1_MARKER_NAME) == Some(V1_MARKER)
    {
        return Classification::V1;
    }

    Classification::Invalid
}

/// Fails unless `handle` is a context satisfying `required`.
///
/// WebGL2 satisfies a WebGL1 requirement.
pub fn assert_valid(
    handle: Option<&dyn RawContext>,
    required: ContextVersion,
) -> Result<ContextVersion, ContextError> {
    let version = classify(handle)
        .version()
        .ok_or(ContextError::InvalidContext)?;

    if required == ContextVersion::WebGl2 && version == ContextVersion::WebGl1 {
        return Err(ContextError::RequiresV2 { found: version });
    }

    Ok(version)
}

#[inline]
pub fn is_context(handle: Option<&dyn RawContext>) -> bool {
    classify(handle) != Classification::Invalid
}

#[inline]
pub fn is_v2(handle: Option<&dyn RawContext>) -> bool {
    classify(handle) == Classification::V2
}
