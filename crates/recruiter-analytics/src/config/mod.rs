use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::analytics::{ReportOptions, TimeRange, DEFAULT_TIME_RANGE_DAYS, DEFAULT_TOP_JOBS_LIMIT};

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
    pub analytics: AnalyticsConfig,
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

        let default_time_range_days = positive_var(
            "ANALYTICS_DEFAULT_TIME_RANGE_DAYS",
            DEFAULT_TIME_RANGE_DAYS as u64,
        )?;
        let top_jobs_limit = positive_var("ANALYTICS_TOP_JOBS_LIMIT", DEFAULT_TOP_JOBS_LIMIT as u64)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            analytics: AnalyticsConfig {
                default_time_range_days: i64::try_from(default_time_range_days).map_err(|_| {
                    ConfigError::InvalidPositiveInteger {
                        key: "ANALYTICS_DEFAULT_TIME_RANGE_DAYS",
                    }
                })?,
                top_jobs_limit: usize::try_from(top_jobs_limit).map_err(|_| {
                    ConfigError::InvalidPositiveInteger {
                        key: "ANALYTICS_TOP_JOBS_LIMIT",
                    }
                })?,
            },
        })
    }
}

fn positive_var(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(ConfigError::InvalidPositiveInteger { key }),
        },
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Defaults applied when a caller does not pick a reporting window.
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    pub default_time_range_days: i64,
    pub top_jobs_limit: usize,
}

impl AnalyticsConfig {
    pub fn default_time_range(&self) -> TimeRange {
        TimeRange::from_days(self.default_time_range_days).unwrap_or_default()
    }

    pub fn report_options(&self, time_range: TimeRange) -> ReportOptions {
        ReportOptions {
            time_range,
            top_jobs_limit: self.top_jobs_limit,
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_time_range_days: DEFAULT_TIME_RANGE_DAYS,
            top_jobs_limit: DEFAULT_TOP_JOBS_LIMIT,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPositiveInteger { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPositiveInteger { key } => {
                write!(f, "{key} must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidPositiveInteger { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
