use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_REGISTRY_URL: &str =
    "https://www.zefix.admin.ch/ZefixPublicREST/api/v1/shab/search";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const DEFAULT_CANTONS: &[&str] = &["GE", "VD"];
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;
pub const MAX_LOOKBACK_DAYS: u32 = 365;

/// The 26 canton codes the registry accepts.
pub const SWISS_CANTONS: [&str; 26] = [
    "AG", "AI", "AR", "BE", "BL", "BS", "FR", "GE", "GL", "GR", "JU", "LU", "NE", "NW", "OW",
    "SG", "SH", "SO", "SZ", "TG", "TI", "UR", "VD", "VS", "ZG", "ZH",
];

pub fn is_swiss_canton(code: &str) -> bool {
    SWISS_CANTONS.contains(&code)
}

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
    pub registry: RegistryConfig,
    pub extraction: ExtractionDefaults,
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

        let registry = RegistryConfig {
            search_url: env::var("ZEFIX_API_URL")
                .unwrap_or_else(|_| DEFAULT_REGISTRY_URL.to_string()),
            timeout_secs: parse_var("ZEFIX_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            page_size: parse_var("ZEFIX_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
        };

        let cantons = match env::var("ZEFIX_DEFAULT_CANTONS") {
            Ok(raw) => parse_canton_list(&raw)?,
            Err(_) => ExtractionDefaults::default().cantons,
        };
        let lookback_days = parse_var("ZEFIX_DEFAULT_DAYS", DEFAULT_LOOKBACK_DAYS)?;
        if lookback_days > MAX_LOOKBACK_DAYS {
            return Err(ConfigError::DefaultDaysOutOfRange(lookback_days));
        }
        let extraction = ExtractionDefaults {
            cantons,
            lookback_days,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            registry,
            extraction,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        Err(_) => Ok(default),
    }
}

fn parse_canton_list(raw: &str) -> Result<Vec<String>, ConfigError> {
    let cantons: Vec<String> = raw
        .split(',')
        .map(|code| code.trim().to_ascii_uppercase())
        .filter(|code| !code.is_empty())
        .collect();

    if cantons.is_empty() {
        return Err(ConfigError::EmptyCantonList);
    }
    if let Some(unknown) = cantons.iter().find(|code| !is_swiss_canton(code)) {
        return Err(ConfigError::UnknownDefaultCanton(unknown.clone()));
    }
    Ok(cantons)
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

/// Outbound registry endpoint settings.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub search_url: String,
    pub timeout_secs: u64,
    pub page_size: u32,
}

impl RegistryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Values substituted when an extraction request omits `cantons` or `days`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionDefaults {
    pub cantons: Vec<String>,
    pub lookback_days: u32,
}

impl Default for ExtractionDefaults {
    fn default() -> Self {
        Self {
            cantons: DEFAULT_CANTONS.iter().map(|code| code.to_string()).collect(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { name: &'static str, value: String },
    EmptyCantonList,
    UnknownDefaultCanton(String),
    DefaultDaysOutOfRange(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be a non-negative integer, got '{value}'")
            }
            ConfigError::EmptyCantonList => {
                write!(f, "ZEFIX_DEFAULT_CANTONS must list at least one canton")
            }
            ConfigError::UnknownDefaultCanton(code) => {
                write!(f, "ZEFIX_DEFAULT_CANTONS contains unknown canton code '{code}'")
            }
            ConfigError::DefaultDaysOutOfRange(days) => write!(
                f,
                "ZEFIX_DEFAULT_DAYS must be at most {MAX_LOOKBACK_DAYS}, got {days}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::EmptyCantonList
            | ConfigError::UnknownDefaultCanton(_)
            | ConfigError::DefaultDaysOutOfRange(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for name in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "ZEFIX_API_URL",
            "ZEFIX_TIMEOUT_SECS",
            "ZEFIX_PAGE_SIZE",
            "ZEFIX_DEFAULT_CANTONS",
            "ZEFIX_DEFAULT_DAYS",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.registry.search_url, DEFAULT_REGISTRY_URL);
        assert_eq!(config.registry.timeout(), Duration::from_secs(30));
        assert_eq!(config.extraction.cantons, vec!["GE", "VD"]);
        assert_eq!(config.extraction.lookback_days, 7);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn default_cantons_are_normalized_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ZEFIX_DEFAULT_CANTONS", " fr, ne ,,");
        env::set_var("ZEFIX_DEFAULT_DAYS", "14");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.extraction.cantons, vec!["FR", "NE"]);
        assert_eq!(config.extraction.lookback_days, 14);
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ZEFIX_TIMEOUT_SECS", "soon");
        let error = AppConfig::load().expect_err("timeout must be numeric");
        assert!(matches!(
            error,
            ConfigError::InvalidNumber {
                name: "ZEFIX_TIMEOUT_SECS",
                ..
            }
        ));
        reset_env();
    }

    #[test]
    fn rejects_unknown_default_canton() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ZEFIX_DEFAULT_CANTONS", "GE,xx");
        let error = AppConfig::load().expect_err("XX is not a canton");
        assert!(matches!(error, ConfigError::UnknownDefaultCanton(ref code) if code == "XX"));
        reset_env();
    }

    #[test]
    fn rejects_default_days_beyond_limit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ZEFIX_DEFAULT_DAYS", "1000");
        let error = AppConfig::load().expect_err("window too wide");
        assert!(matches!(error, ConfigError::DefaultDaysOutOfRange(1000)));
        assert_eq!(
            error.to_string(),
            "ZEFIX_DEFAULT_DAYS must be at most 365, got 1000"
        );
        reset_env();
    }

    #[test]
    fn built_in_defaults_are_valid_cantons() {
        assert!(DEFAULT_CANTONS.iter().all(|code| is_swiss_canton(code)));
        assert!(DEFAULT_LOOKBACK_DAYS <= MAX_LOOKBACK_DAYS);
    }
}
