//! Configuration management for the OTP mailer

use crate::error::NotifyError;
use anyhow::{Context, Result};
use std::env;
use std::fmt;
use validator::Validate;

pub const SENDER_ADDRESS_VAR: &str = "GMAIL_USER";
pub const SENDER_SECRET_VAR: &str = "GMAIL_APP_PASS";

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_HELLO_NAME: &str = "localhost";

const MISSING_CREDENTIALS: &str =
    "GMAIL_USER or GMAIL_APP_PASS are not set in environment variables.";

/// Application configuration, built once at process entry
#[derive(Debug, Clone)]
pub struct Config {
    /// Account the OTP is sent from
    pub sender: SenderCredentials,
    /// Relay the message is submitted to
    pub relay: RelayConfig,
}

/// Authenticated sender account
#[derive(Clone, PartialEq, Validate)]
pub struct SenderCredentials {
    #[validate(length(min = 1))]
    pub address: String,

    /// App password; never printed
    #[validate(length(min = 1))]
    pub secret: String,
}

impl fmt::Debug for SenderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderCredentials")
            .field("address", &self.address)
            .field("secret", &"***")
            .finish()
    }
}

/// SMTP relay endpoint
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct RelayConfig {
    #[validate(length(min = 1, max = 255))]
    pub host: String,

    /// 587 for STARTTLS submission
    pub port: u16,

    /// Name sent with EHLO
    #[validate(length(min = 1, max = 255))]
    pub hello_name: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
            hello_name: DEFAULT_HELLO_NAME.to_string(),
        }
    }
}

impl RelayConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryConfig {
    /// "json" or "pretty"
    pub log_format: String,
}

impl TelemetryConfig {
    /// Only reads the environment; usable before the rest of the config exists
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_format: lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
        }
    }

    pub fn is_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration through `lookup`, which maps a variable name to its
    /// value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> crate::error::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sender = SenderCredentials {
            address: lookup(SENDER_ADDRESS_VAR).unwrap_or_default(),
            secret: lookup(SENDER_SECRET_VAR).unwrap_or_default(),
        };
        sender
            .validate()
            .map_err(|_| NotifyError::Configuration(MISSING_CREDENTIALS.to_string()))?;

        let relay = relay_from_lookup(&lookup)
            .map_err(|e| NotifyError::Configuration(format!("{:#}", e)))?;
        relay.validate()?;

        Ok(Self { sender, relay })
    }
}

fn relay_from_lookup<F>(lookup: &F) -> Result<RelayConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = RelayConfig::default();
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    Ok(RelayConfig {
        host: non_empty("SMTP_HOST").unwrap_or(defaults.host),
        port: match non_empty("SMTP_PORT") {
            Some(port) => port.trim().parse().context("Invalid SMTP_PORT")?,
            None => defaults.port,
        },
        hello_name: non_empty("SMTP_HELLO_NAME").unwrap_or(defaults.hello_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults_to_gmail_relay() {
        let config = Config::from_lookup(lookup_from(&[
            ("GMAIL_USER", "sender@gmail.com"),
            ("GMAIL_APP_PASS", "abcd efgh ijkl mnop"),
        ]))
        .unwrap();

        assert_eq!(config.sender.address, "sender@gmail.com");
        assert_eq!(config.sender.secret, "abcd efgh ijkl mnop");
        assert_eq!(config.relay.addr(), "smtp.gmail.com:587");
        assert_eq!(config.relay.hello_name, "localhost");
    }

    #[test]
    fn test_config_missing_credentials() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Fatal: GMAIL_USER or GMAIL_APP_PASS are not set in environment variables."
        );
    }

    #[test]
    fn test_config_missing_secret_only() {
        let err = Config::from_lookup(lookup_from(&[("GMAIL_USER", "sender@gmail.com")]))
            .unwrap_err();
        assert!(matches!(err, NotifyError::Configuration(_)));
    }

    #[test]
    fn test_config_empty_credentials_count_as_unset() {
        let err = Config::from_lookup(lookup_from(&[
            ("GMAIL_USER", ""),
            ("GMAIL_APP_PASS", "secret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, NotifyError::Configuration(_)));
    }

    #[test]
    fn test_config_relay_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GMAIL_USER", "sender@example.com"),
            ("GMAIL_APP_PASS", "secret"),
            ("SMTP_HOST", "127.0.0.1"),
            ("SMTP_PORT", "2525"),
            ("SMTP_HELLO_NAME", "mailer.local"),
        ]))
        .unwrap();

        assert_eq!(config.relay.addr(), "127.0.0.1:2525");
        assert_eq!(config.relay.hello_name, "mailer.local");
    }

    #[test]
    fn test_telemetry_log_format() {
        assert!(TelemetryConfig::from_lookup(lookup_from(&[("LOG_FORMAT", "JSON")])).is_json());
        assert!(!TelemetryConfig::from_lookup(lookup_from(&[])).is_json());
    }

    #[test]
    fn test_config_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[
            ("GMAIL_USER", "sender@example.com"),
            ("GMAIL_APP_PASS", "secret"),
            ("SMTP_PORT", "not-a-port"),
        ]))
        .unwrap_err();

        assert!(matches!(err, NotifyError::Configuration(_)));
        assert!(err.to_string().contains("Invalid SMTP_PORT"));
    }

    #[test]
    fn test_sender_debug_masks_secret() {
        let sender = SenderCredentials {
            address: "sender@gmail.com".to_string(),
            secret: "super-secret-app-pass".to_string(),
        };
        let debug_str = format!("{:?}", sender);

        assert!(debug_str.contains("sender@gmail.com"));
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("super-secret-app-pass"));
    }

    #[test]
    fn test_relay_config_default() {
        let relay = RelayConfig::default();
        assert_eq!(relay.host, "smtp.gmail.com");
        assert_eq!(relay.port, 587);
        assert!(relay.validate().is_ok());
    }
}
