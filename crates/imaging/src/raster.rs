use std::io::Cursor;

use image::{imageops::FilterType, ImageFormat, ImageReader};
use imagefit_core::SourceMetadata;
use tracing::debug;

use crate::{ImageEngine, ImagingError, ImagingResult};

/// [`ImageEngine`] backed by the `image` crate.
pub struct RasterEngine;

impl RasterEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RasterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageEngine for RasterEngine {
    fn probe(&self, data: &[u8]) -> ImagingResult<SourceMetadata> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;

        if reader.format().is_none() {
            return Err(ImagingError::UnsupportedFormat);
        }

        // Reads only as much of the stream as the header requires
        let (width, height) = reader.into_dimensions()?;

        Ok(SourceMetadata { width, height })
    }

    fn resize(&self, data: &[u8], width: u32, height: u32) -> ImagingResult<Vec<u8>> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;

        if reader.format().is_none() {
            return Err(ImagingError::UnsupportedFormat);
        }

        let image = reader.decode()?;

        debug!(
            source_width = image.width(),
            source_height = image.height(),
            width,
            height,
            "resizing image"
        );

        let resized = image.resize_exact(width, height, FilterType::Lanczos3);

        let mut output = Vec::new();
        resized.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;

        Ok(output)
    }
}
