use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::applications::{
    Amount, AmountParseError, EvaluationThresholds, ValidationMode,
    DEFAULT_AUTO_REFERRAL_MAX_AGE, DEFAULT_HIGH_INCOME_THRESHOLD, DEFAULT_LOW_INCOME_THRESHOLD,
};

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
    pub evaluation: EvaluationThresholds,
    pub validator: ValidatorConfig,
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
            evaluation: load_thresholds()?,
            validator: load_validator()?,
        })
    }
}

fn load_thresholds() -> Result<EvaluationThresholds, ConfigError> {
    let high_income_threshold = threshold_var(
        "PREMIUM_HIGH_INCOME_THRESHOLD",
        DEFAULT_HIGH_INCOME_THRESHOLD,
    )?;
    let low_income_threshold =
        threshold_var("PREMIUM_LOW_INCOME_THRESHOLD", DEFAULT_LOW_INCOME_THRESHOLD)?;
    let auto_referral_max_age = match env::var("PREMIUM_AUTO_REFERRAL_MAX_AGE") {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidAge)?,
        Err(_) => DEFAULT_AUTO_REFERRAL_MAX_AGE,
    };

    Ok(EvaluationThresholds {
        high_income_threshold,
        low_income_threshold,
        auto_referral_max_age,
    })
}

fn threshold_var(name: &'static str, default: u32) -> Result<Amount, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<Amount>()
            .map_err(|source| ConfigError::InvalidThreshold { name, source }),
        Err(_) => Ok(Amount::units(default)),
    }
}

fn load_validator() -> Result<ValidatorConfig, ConfigError> {
    let license_key =
        env::var("PREMIUM_LICENSE_KEY").unwrap_or_else(|_| "DEMO-LICENSE".to_string());
    let raw_mode = env::var("PREMIUM_VALIDATION_MODE").unwrap_or_else(|_| "quick".to_string());
    let validation_mode =
        ValidationMode::parse(&raw_mode).ok_or_else(|| ConfigError::InvalidValidationMode {
            value: raw_mode.clone(),
        })?;
    let accounts = env::var("PREMIUM_ACCOUNTS")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|account| !account.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(ValidatorConfig {
        license_key,
        validation_mode,
        accounts,
    })
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

/// Settings for the bundled in-memory account validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub license_key: String,
    pub validation_mode: ValidationMode,
    /// Registry consulted by detailed validation.
    pub accounts: Vec<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidThreshold {
        name: &'static str,
        source: AmountParseError,
    },
    InvalidAge,
    InvalidValidationMode {
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { name, source } => {
                write!(f, "{name} must be a decimal amount ({source})")
            }
            ConfigError::InvalidAge => {
                write!(f, "PREMIUM_AUTO_REFERRAL_MAX_AGE must be a valid u32")
            }
            ConfigError::InvalidValidationMode { value } => write!(
                f,
                "PREMIUM_VALIDATION_MODE must be 'quick' or 'detailed', got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidThreshold { source, .. } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidAge
            | ConfigError::InvalidValidationMode { .. } => None,
        }
    }
}
