use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("source image has degenerate dimensions {width}x{height}")]
    DegenerateSource { width: u32, height: u32 },
}
