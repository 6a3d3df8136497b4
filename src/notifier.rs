//! OTP delivery: one linear pass over a single SMTP session

use crate::config::Config;
use crate::domain::OtpMessage;
use crate::email::{build_email, MailConnector, MailSession, SessionError};
use crate::error::{NotifyError, Result};
use std::ops::{Deref, DerefMut};
use tracing::{debug, info, info_span, warn};

/// Outcome of a successful send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub recipient: String,
    /// Relay reply to the end of DATA, e.g. "2.0.0 OK"
    pub relay_reply: String,
}

/// Sends OTP emails with the configured sender through one connector
pub struct Notifier<'a> {
    config: &'a Config,
    connector: &'a dyn MailConnector,
}

impl<'a> Notifier<'a> {
    pub fn new(config: &'a Config, connector: &'a dyn MailConnector) -> Self {
        Self { config, connector }
    }

    /// Deliver `message` exactly once.
    ///
    /// Connects, upgrades to TLS, authenticates, and submits. Once the
    /// connection is open the session is closed exactly once whatever the
    /// outcome; a failed close is logged and does not change the result.
    pub fn send(&self, message: &OtpMessage) -> Result<Delivery> {
        let span = info_span!(
            "send_otp",
            recipient = %message.recipient,
            provider = self.connector.provider_name()
        );
        let _enter = span.enter();

        let session = self
            .connector
            .connect(&self.config.relay)
            .map_err(into_notify_error)?;
        let mut session = ClosingSession::new(session);

        session.starttls().map_err(into_notify_error)?;
        session
            .login(&self.config.sender)
            .map_err(into_notify_error)?;

        let email = build_email(message, &self.config.sender.address).map_err(into_notify_error)?;
        let relay_reply = session.send(&email).map_err(into_notify_error)?;

        info!(reply = %relay_reply, "OTP email accepted by relay");
        Ok(Delivery {
            recipient: message.recipient.clone(),
            relay_reply,
        })
    }
}

fn into_notify_error(error: SessionError) -> NotifyError {
    match error {
        SessionError::AuthenticationFailed(reply) => NotifyError::Authentication(reply),
        other => NotifyError::Send(other.to_string()),
    }
}

/// Session that sends QUIT when dropped
struct ClosingSession {
    inner: Box<dyn MailSession>,
}

impl ClosingSession {
    fn new(inner: Box<dyn MailSession>) -> Self {
        Self { inner }
    }
}

impl Deref for ClosingSession {
    type Target = dyn MailSession;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl DerefMut for ClosingSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_mut()
    }
}

impl Drop for ClosingSession {
    fn drop(&mut self) {
        match self.inner.close() {
            Ok(()) => debug!("SMTP session closed"),
            Err(e) => warn!(error = %e, "Failed to close SMTP session"),
        }
    }
}
