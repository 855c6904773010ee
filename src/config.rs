use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Command line and environment configuration for the service.
#[derive(Parser, Debug, Clone)]
#[command(name = "payment-blocks")]
#[command(author, version, about = "Internal API for blocking and unblocking client payments", long_about = None)]
pub struct Config {
    /// Listen address for the HTTP API
    #[arg(short, long, env = "PAYMENT_BLOCKS_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "PAYMENT_BLOCKS_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Log level, used when RUST_LOG is not set
    #[arg(long, env = "PAYMENT_BLOCKS_LOG", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "PAYMENT_BLOCKS_LOG_JSON", default_value_t = false)]
    pub log_json: bool,

    /// Allowed CORS origins ("*" allows any origin)
    #[arg(
        long = "cors-allow-origin",
        env = "PAYMENT_BLOCKS_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub cors_allow_origins: Vec<String>,

    /// How long browsers may cache a preflight response, in seconds
    #[arg(long, env = "PAYMENT_BLOCKS_CORS_MAX_AGE", default_value_t = 12 * 60 * 60)]
    pub cors_max_age_secs: u64,
}

impl Config {
    pub fn cors(&self) -> CorsConfig {
        CorsConfig {
            allowed_origins: self.cors_allow_origins.clone(),
            max_age: Duration::from_secs(self.cors_max_age_secs),
        }
    }
}

/// Cross-origin policy applied to the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age: Duration,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            max_age: Duration::from_secs(12 * 60 * 60),
        }
    }
}
