use std::net::{AddrParseError, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

use crate::{database_url, env_or, server_bind_address};

/// Deployment the server runs in; selects the log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(ConfigError::InvalidEnvironment(value.to_owned())),
        }
    }
}

impl Environment {
    /// Label used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

/// Server settings resolved from the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub environment: Environment,
    pub database_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env_or("APP_ENV", "development").parse::<Environment>()?;
        let bind_addr = server_bind_address()?;
        let database_url = database_url();
        if database_url.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }

        Ok(Self {
            bind_addr,
            environment,
            database_url,
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("APP_ENV must be development, production or test (got {0:?})")]
    InvalidEnvironment(String),
    #[error("invalid APP_BIND_ADDR value: {0}")]
    BindAddress(#[from] AddrParseError),
    #[error("DATABASE_URL must not be empty")]
    EmptyDatabaseUrl,
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;
    use crate::tests::ENV_GUARD;
    use crate::{DEFAULT_BIND_ADDR, DEFAULT_DATABASE_URL};

    fn clear() {
        for key in ["APP_ENV", "APP_BIND_ADDR", "DATABASE_URL"] {
            env::remove_var(key);
        }
    }

    #[test]
    fn environment_names_and_aliases() {
        assert_eq!("prod".parse::<Environment>().ok(), Some(Environment::Production));
        assert_eq!(" Test ".parse::<Environment>().ok(), Some(Environment::Test));
        assert_eq!("dev".parse::<Environment>().ok(), Some(Environment::Development));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn loads_defaults_in_development() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear();

        let config = AppConfig::from_env().expect("config should load with defaults");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn reports_each_invalid_setting() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear();

        env::set_var("APP_ENV", "staging");
        let err = AppConfig::from_env().expect_err("unknown env");
        assert!(matches!(&err, ConfigError::InvalidEnvironment(value) if value == "staging"));
        assert_eq!(
            err.to_string(),
            "APP_ENV must be development, production or test (got \"staging\")"
        );
        env::remove_var("APP_ENV");

        env::set_var("APP_BIND_ADDR", "localhost");
        let err = AppConfig::from_env().expect_err("bad address");
        assert!(matches!(err, ConfigError::BindAddress(_)));
        env::remove_var("APP_BIND_ADDR");

        env::set_var("DATABASE_URL", " ");
        let err = AppConfig::from_env().expect_err("empty url");
        assert!(matches!(err, ConfigError::EmptyDatabaseUrl));
        clear();
    }

    #[test]
    fn parses_production_environment() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        env::set_var("APP_ENV", "production");
        env::set_var("APP_BIND_ADDR", "0.0.0.0:9000");
        env::set_var("DATABASE_URL", "sqlite:///var/lib/catalogo/catalogo.db");

        let config = AppConfig::from_env().expect("config should load");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:9000");
        assert_eq!(config.database_url, "sqlite:///var/lib/catalogo/catalogo.db");
        clear();
    }
}
