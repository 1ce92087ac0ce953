use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub delivery: DeliveryConfig,
    pub registry: RegistryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let country_code = env::var("LIFESCORE_COUNTRY_CODE")
            .unwrap_or_else(|_| DeliveryConfig::DEFAULT_COUNTRY_CODE.to_string());
        if country_code.is_empty() || !country_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidCountryCode(country_code));
        }

        let auto_report_delay_ms = env::var("LIFESCORE_AUTO_REPORT_DELAY_MS")
            .unwrap_or_else(|_| DeliveryConfig::DEFAULT_AUTO_REPORT_DELAY_MS.to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidAutoReportDelay)?;

        let report_dir = env::var("LIFESCORE_REPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("reports"));

        let users_per_page = env::var("LIFESCORE_USERS_PER_PAGE")
            .unwrap_or_else(|_| RegistryConfig::DEFAULT_USERS_PER_PAGE.to_string())
            .parse::<usize>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or(ConfigError::InvalidPageSize)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            delivery: DeliveryConfig {
                country_code,
                auto_report_delay: Duration::from_millis(auto_report_delay_ms),
                report_dir,
            },
            registry: RegistryConfig { users_per_page },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Report delivery settings shared by the share-link builder and the auto-report trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
    pub country_code: String,
    pub auto_report_delay: Duration,
    pub report_dir: PathBuf,
}

impl DeliveryConfig {
    pub const DEFAULT_COUNTRY_CODE: &'static str = "94";
    pub const DEFAULT_AUTO_REPORT_DELAY_MS: u64 = 3000;
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            country_code: Self::DEFAULT_COUNTRY_CODE.to_string(),
            auto_report_delay: Duration::from_millis(Self::DEFAULT_AUTO_REPORT_DELAY_MS),
            report_dir: PathBuf::from("reports"),
        }
    }
}

/// Admin listing controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    pub users_per_page: usize,
}

impl RegistryConfig {
    pub const DEFAULT_USERS_PER_PAGE: usize = 30;
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            users_per_page: Self::DEFAULT_USERS_PER_PAGE,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCountryCode(String),
    InvalidAutoReportDelay,
    InvalidPageSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCountryCode(value) => write!(
                f,
                "LIFESCORE_COUNTRY_CODE must contain only digits (got '{value}')"
            ),
            ConfigError::InvalidAutoReportDelay => {
                write!(f, "LIFESCORE_AUTO_REPORT_DELAY_MS must be a whole number of milliseconds")
            }
            ConfigError::InvalidPageSize => {
                write!(f, "LIFESCORE_USERS_PER_PAGE must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidCountryCode(_)
            | ConfigError::InvalidAutoReportDelay
            | ConfigError::InvalidPageSize => None,
        }
    }
}
