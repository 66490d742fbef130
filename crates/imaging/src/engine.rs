use imagefit_core::SourceMetadata;

use crate::ImagingResult;

/// Boundary to the underlying image-processing capability.
///
/// Both operations are synchronous and CPU-bound; callers running on an
/// async runtime are expected to hop to a blocking thread. Implementations
/// are all-or-nothing: on error no partial output is produced.
pub trait ImageEngine: Send + Sync {
    /// Probe the intrinsic width and height of an encoded image without
    /// decoding the pixel data.
    fn probe(&self, data: &[u8]) -> ImagingResult<SourceMetadata>;

    /// Decode an image, scale it to exactly `width`x`height`, and re-encode
    /// it as PNG. Aspect-ratio fitting is the caller's concern; the engine
    /// resizes to whatever dimensions it is handed.
    fn resize(&self, data: &[u8], width: u32, height: u32) -> ImagingResult<Vec<u8>>;
}
