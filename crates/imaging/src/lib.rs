pub mod engine;
pub mod error;
pub mod raster;


pub use engine::ImageEngine;
pub use error::{ImagingError, ImagingResult};
pub use raster::RasterEngine;
