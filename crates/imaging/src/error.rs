use thiserror::Error;

pub type ImagingResult<T> = Result<T, ImagingError>;

#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("unrecognized image format")]
    UnsupportedFormat,

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
