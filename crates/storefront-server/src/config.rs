//! Server Configuration

/// Process-level settings read once at startup
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,

    /// `tracing` filter directive
    pub log_filter: String,

    /// Directory holding the built frontend
    pub static_dir: String,
}

impl ServerConfig {
    /// Create from environment variables (`BIND_ADDR`, `RUST_LOG`, `STATIC_DIR`)
    pub fn from_env() -> Self {
        let get = |name: &str, default: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            bind_addr: get("BIND_ADDR", "0.0.0.0:3000"),
            log_filter: get("RUST_LOG", "info,tower_http=debug"),
            static_dir: get("STATIC_DIR", "static"),
        }
    }
}
