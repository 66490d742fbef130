use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoreConfig {
    pub server: ServerConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
    /// Upper bound on the request body, in bytes
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec!["*".to_string()],
            request_timeout: 30,
            max_request_size: 25 * 1024 * 1024, // 25MB
        }
    }
}
