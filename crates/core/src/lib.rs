pub mod config;
pub mod dimensions;
pub mod error;

pub use config::{CoreConfig, ServerConfig};
pub use dimensions::{SourceMetadata, TargetDimensions, MAX_DIMENSION};
pub use error::{CoreError, CoreResult};
