pub mod error;
pub mod middleware;
pub mod resize;
pub mod routes;
pub mod server;

pub use error::{ServerError, ServerResult};
pub use server::Server;
