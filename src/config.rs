//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address to bind the HTTP server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Serve the OpenAPI document at `/api-docs/openapi.json`.
    #[serde(default = "default_true")]
    pub enable_openapi: bool,

    /// Install the Prometheus recorder and serve `/metrics`.
    #[serde(default = "default_true")]
    pub enable_metrics: bool,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Log output format: "pretty" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_openapi: true,
            enable_metrics: true,
            rust_log: default_log_level(),
            log_format: default_log_format(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.host.parse::<IpAddr>().is_err() {
            return Err(format!("HOST is not an IP address: {}", self.host));
        }

        if !matches!(self.log_format.as_str(), "pretty" | "json") {
            return Err("LOG_FORMAT must be pretty or json".to_string());
        }

        Ok(())
    }

    /// Socket address to listen on. Call [`Config::validate`] first.
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| format!("HOST is not an IP address: {}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Whether logs should be emitted as JSON.
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
