//! Mail session traits and error types

use crate::config::{RelayConfig, SenderCredentials};
use lettre::Message;
use thiserror::Error;

/// Failures raised while talking to the relay
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("TLS error: {0}")]
    TlsError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// One open conversation with a relay.
///
/// Steps are driven in order by the caller: `starttls`, `login`, `send`, and
/// finally `close`, which may run after any earlier step failed.
#[cfg_attr(test, mockall::automock)]
pub trait MailSession {
    /// Upgrade the plain connection to TLS
    fn starttls(&mut self) -> Result<(), SessionError>;

    fn login(&mut self, sender: &SenderCredentials) -> Result<(), SessionError>;

    /// Submit one message; returns the relay's reply text
    fn send(&mut self, email: &Message) -> Result<String, SessionError>;

    /// End the session with QUIT
    fn close(&mut self) -> Result<(), SessionError>;
}

/// Opens sessions against a relay
#[cfg_attr(test, mockall::automock)]
pub trait MailConnector {
    fn connect(&self, relay: &RelayConfig) -> Result<Box<dyn MailSession>, SessionError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
