use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::workflows::scoring::ScoringConfig;

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
    pub scoring: ScoringConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: load_scoring()?,
        })
    }
}

fn load_scoring() -> Result<ScoringConfig, ConfigError> {
    let defaults = ScoringConfig::default();

    let minimum_criteria = env_or("SPK_MIN_CRITERIA", defaults.minimum_criteria)?;
    let gpa_scale = env_or("SPK_GPA_SCALE", defaults.gpa_scale)?;
    let disciplinary_ceiling = env_or("SPK_DISCIPLINARY_CEILING", defaults.disciplinary_ceiling)?;
    let max_competency_level = env_or("SPK_MAX_COMPETENCY_LEVEL", defaults.max_competency_level)?;

    if !(gpa_scale.is_finite() && gpa_scale > 0.0) {
        return Err(ConfigError::InvalidScoringValue {
            key: "SPK_GPA_SCALE",
        });
    }
    if disciplinary_ceiling == 0 {
        return Err(ConfigError::InvalidScoringValue {
            key: "SPK_DISCIPLINARY_CEILING",
        });
    }
    if max_competency_level == 0 {
        return Err(ConfigError::InvalidScoringValue {
            key: "SPK_MAX_COMPETENCY_LEVEL",
        });
    }

    Ok(ScoringConfig {
        minimum_criteria,
        gpa_scale,
        disciplinary_ceiling,
        max_competency_level,
    })
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidScoringValue { key }),
        Err(_) => Ok(default),
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

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidScoringValue { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidScoringValue { key } => {
                write!(f, "{key} must be a positive number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidScoringValue { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
