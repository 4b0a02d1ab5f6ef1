//! Environment-driven settings shared by the server and the console client.
pub mod config;

use std::env;
use std::net::{AddrParseError, SocketAddr};

pub use config::{AppConfig, ConfigError, Environment};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://catalogo.db";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/";

/// Reads `.env` into the process environment. A missing file is not an error.
pub fn load_env_file() {
    let _ = dotenvy::dotenv();
}

/// Value of `key`, or `default` when unset or not valid unicode.
pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// `APP_BIND_ADDR`, parsed.
pub fn server_bind_address() -> Result<SocketAddr, AddrParseError> {
    env_or("APP_BIND_ADDR", DEFAULT_BIND_ADDR).parse()
}

/// `DATABASE_URL`, the SQLite connection string.
pub fn database_url() -> String {
    env_or("DATABASE_URL", DEFAULT_DATABASE_URL)
}

/// `CATALOGO_API_URL`, where the console client sends its requests.
pub fn api_base_url() -> String {
    env_or("CATALOGO_API_URL", DEFAULT_API_URL)
}
