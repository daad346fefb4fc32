//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::backend::ClientConfig;
use crate::interval::DEFAULT_MAX_INDICES;
use crate::pattern::IndexPattern;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub resolve: ResolveConfig,

    /// Index patterns known to the server and CLI
    #[serde(default)]
    pub patterns: Vec<IndexPattern>,
}

/// Search backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    pub username: Option<String>,

    pub password: Option<String>,
}

fn default_backend_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_request_timeout() -> u64 {
    30_000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            request_timeout_ms: default_request_timeout(),
            username: None,
            password: None,
        }
    }
}

impl BackendConfig {
    /// Settings for the backend HTTP client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.url.clone(),
            request_timeout_ms: self.request_timeout_ms,
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ApiConfig {
    /// Socket address to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Resolution limits
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveConfig {
    /// Most index names one interval pattern may expand to
    #[serde(default = "default_max_indices")]
    pub max_indices: usize,
}

fn default_max_indices() -> usize {
    DEFAULT_MAX_INDICES
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            max_indices: default_max_indices(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber, writing to stdout
    ///
    /// `RUST_LOG` takes precedence over the configured level.
    pub fn init(&self) {
        self.install(std::io::stdout);
    }

    /// Install the global tracing subscriber, writing to stderr
    pub fn init_stderr(&self) {
        self.install(std::io::stderr);
    }

    /// Filter directives used when `RUST_LOG` is unset
    pub fn directives(&self) -> String {
        format!("sextant={},tower_http=info", self.level)
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    fn install<W>(&self, writer: W)
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| self.directives().into());

        let registry = tracing_subscriber::registry().with(filter);
        if self.is_json() {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
                .init();
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(writer))
                .init();
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("sextant").join("config.toml")),
            Some(PathBuf::from("/etc/sextant/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Find a configured pattern by id
    pub fn pattern(&self, id: &str) -> Option<&IndexPattern> {
        self.patterns.iter().find(|p| p.id == id)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Backend overrides
        if let Ok(url) = std::env::var("SEXTANT_BACKEND_URL") {
            self.backend.url = url;
        }

        // API overrides
        if let Ok(host) = std::env::var("SEXTANT_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("SEXTANT_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Resolution overrides
        if let Ok(limit) = std::env::var("SEXTANT_MAX_INDICES") {
            if let Ok(n) = limit.parse() {
                self.resolve.max_indices = n;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("SEXTANT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SEXTANT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Sextant Configuration
#
# Environment variables override these settings:
# - SEXTANT_BACKEND_URL
# - SEXTANT_API_HOST
# - SEXTANT_API_PORT
# - SEXTANT_LOG_LEVEL
# - SEXTANT_LOG_FORMAT
# - SEXTANT_MAX_INDICES

[backend]
# Search backend base URL
url = "http://localhost:9200"

# Request timeout in milliseconds
request_timeout_ms = 30000

# Optional basic auth
# username = "elastic"
# password = "changeme"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8086

[resolve]
# Most index names one interval pattern may expand to per request
max_indices = 10000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Wildcard pattern, resolved through field statistics
[[patterns]]
id = "logstash-*"
time_field_name = "@timestamp"
fields = [
    { name = "@timestamp", type = "date" },
    { name = "bytes", type = "number" },
]

# Daily rollover pattern, expanded locally
[[patterns]]
id = "[logstash-]YYYY.MM.DD"
time_field_name = "@timestamp"
interval = "days"
fields = [
    { name = "@timestamp", type = "date" },
]
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.url, "http://localhost:9200");
        assert_eq!(config.api.addr(), "0.0.0.0:8086");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.resolve.max_indices, DEFAULT_MAX_INDICES);
        assert!(config.patterns.is_empty());
    }

    #[test]
    fn test_default_config_template_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.patterns.len(), 2);
        assert_eq!(config.resolve.max_indices, 10_000);

        let wildcard = config.pattern("logstash-*").unwrap();
        assert!(wildcard.is_wildcard());
        assert!(wildcard.has_time_field());

        let daily = config.pattern("[logstash-]YYYY.MM.DD").unwrap();
        assert_eq!(daily.get_interval(), Some("days"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[backend]
url = "http://search:9200"
username = "reader"

[resolve]
max_indices = 500

[logging]
format = "JSON"

[[patterns]]
id = "metrics-*"
time_field_name = "ts"
fields = [{{ name = "ts", type = "date" }}]
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.backend.url, "http://search:9200");
        assert_eq!(config.backend.request_timeout_ms, 30_000);
        assert_eq!(config.resolve.max_indices, 500);
        assert!(config.logging.is_json());
        assert_eq!(config.logging.directives(), "sextant=info,tower_http=info");

        let client = config.backend.client_config();
        assert_eq!(client.username.as_deref(), Some("reader"));
        assert!(client.password.is_none());

        assert!(config.pattern("metrics-*").unwrap().has_time_field());
        assert!(config.pattern("missing").is_none());
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/sextant.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[backend\nurl = 1").unwrap();
        let invalid = Config::load(file.path()).unwrap_err();
        assert!(matches!(invalid, ConfigError::Parse { .. }));
    }
}
