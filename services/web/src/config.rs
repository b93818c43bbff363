//! Web server configuration

use ::config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// HTTP server settings
///
/// # Environment Variables
/// - `SNIPPETBOX_ADDR`: listen address (default: "0.0.0.0:4000")
/// - `SNIPPETBOX_SECURE_COOKIES`: mark the session cookie `Secure` (default: true)
/// - `SNIPPETBOX_SESSION_LIFETIME_HOURS`: idle session lifetime (default: 12)
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
    pub secure_cookies: bool,
    pub session_lifetime_hours: i64,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: ServerConfig = Config::builder()
            .set_default("addr", "0.0.0.0:4000")?
            .set_default("secure_cookies", true)?
            .set_default("session_lifetime_hours", 12)?
            .add_source(Environment::with_prefix("SNIPPETBOX").try_parsing(true))
            .build()?
            .try_deserialize()?;

        if config.session_lifetime_hours <= 0 {
            return Err(ConfigError::Message(
                "SNIPPETBOX_SESSION_LIFETIME_HOURS must be positive".to_string(),
            ));
        }

        Ok(config)
    }
}
