//! Contain-fit dimension resolution.
//!
//! Turns a requested bounding box and the probed source dimensions into the
//! final output dimensions: the result always fits within the (clamped)
//! requested box and preserves the source aspect ratio up to rounding.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Hard ceiling on any requested or output pixel dimension.
///
/// Shared by server-side clamping and the limits rendered into the form UI,
/// so the two validation layers cannot drift.
pub const MAX_DIMENSION: u32 = 10_000;

/// Intrinsic dimensions probed from an uploaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    pub width: u32,
    pub height: u32,
}

/// Final output dimensions, computed by [`resolve`] and never taken
/// directly from caller input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDimensions {
    pub width: u32,
    pub height: u32,
}

/// Resolve the output dimensions for a resize request.
///
/// The requested dimensions are clamped to [`MAX_DIMENSION`] first. A source
/// with a zero width or height has no usable aspect ratio and is rejected
/// outright rather than fed into the division below.
pub fn resolve(
    requested_width: u32,
    requested_height: u32,
    source: SourceMetadata,
) -> CoreResult<TargetDimensions> {
    let requested_width = requested_width.min(MAX_DIMENSION);
    let requested_height = requested_height.min(MAX_DIMENSION);

    if source.width == 0 || source.height == 0 {
        return Err(CoreError::DegenerateSource {
            width: source.width,
            height: source.height,
        });
    }

    let aspect = source.width as f64 / source.height as f64;

    // Contain fit: shrink whichever side of the request box overshoots the
    // source proportions. round() can land on 0 for extreme ratios, so the
    // recomputed side floors at 1.
    let (width, height) = if requested_width as f64 / requested_height as f64 > aspect {
        let width = (requested_height as f64 * aspect).round() as u32;
        (width.max(1), requested_height)
    } else {
        let height = (requested_width as f64 / aspect).round() as u32;
        (requested_width, height.max(1))
    };

    Ok(TargetDimensions { width, height })
}
