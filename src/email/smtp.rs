//! SMTP session implementation using lettre

use super::provider::{MailConnector, MailSession, SessionError};
use crate::config::{RelayConfig, SenderCredentials};
use lettre::{
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        client::{SmtpConnection, TlsParameters},
        extension::ClientId,
        Error as SmtpError,
    },
    Message,
};
use tracing::debug;

/// Mechanisms offered to the relay, in order of preference
const AUTH_MECHANISMS: &[Mechanism] = &[Mechanism::Plain, Mechanism::Login];

/// Opens blocking STARTTLS-capable connections to an SMTP relay
#[derive(Debug, Default, Clone, Copy)]
pub struct SmtpConnector;

impl SmtpConnector {
    pub fn new() -> Self {
        Self
    }
}

impl MailConnector for SmtpConnector {
    fn connect(&self, relay: &RelayConfig) -> Result<Box<dyn MailSession>, SessionError> {
        let session = SmtpSession::connect(relay)?;
        Ok(Box::new(session))
    }

    fn provider_name(&self) -> &'static str {
        "smtp"
    }
}

/// A live connection to the relay
pub struct SmtpSession {
    connection: SmtpConnection,
    tls_parameters: TlsParameters,
    hello_name: ClientId,
}

impl SmtpSession {
    /// Open a plain connection and greet the relay with EHLO
    pub fn connect(relay: &RelayConfig) -> Result<Self, SessionError> {
        let hello_name = ClientId::Domain(relay.hello_name.clone());
        let tls_parameters = TlsParameters::new(relay.host.clone())
            .map_err(|e| SessionError::InvalidConfiguration(e.to_string()))?;

        debug!(relay = %relay.addr(), "Connecting to SMTP relay");
        let connection = SmtpConnection::connect(relay.addr(), None, &hello_name, None, None)
            .map_err(|e| SessionError::ConnectionError(e.to_string()))?;

        Ok(Self {
            connection,
            tls_parameters,
            hello_name,
        })
    }
}

impl MailSession for SmtpSession {
    fn starttls(&mut self) -> Result<(), SessionError> {
        if !self.connection.can_starttls() {
            return Err(SessionError::TlsError(
                "relay does not advertise STARTTLS".to_string(),
            ));
        }

        self.connection
            .starttls(&self.tls_parameters, &self.hello_name)
            .map_err(|e| SessionError::TlsError(e.to_string()))?;
        debug!("STARTTLS negotiated");
        Ok(())
    }

    fn login(&mut self, sender: &SenderCredentials) -> Result<(), SessionError> {
        let credentials = Credentials::new(sender.address.clone(), sender.secret.clone());

        self.connection
            .auth(AUTH_MECHANISMS, &credentials)
            .map_err(classify_auth_error)?;
        debug!("Authenticated with relay");
        Ok(())
    }

    fn send(&mut self, email: &Message) -> Result<String, SessionError> {
        let response = self
            .connection
            .send(email.envelope(), &email.formatted())
            .map_err(|e| SessionError::SendFailed(e.to_string()))?;

        Ok(response.message().collect::<Vec<_>>().join(" "))
    }

    fn close(&mut self) -> Result<(), SessionError> {
        self.connection
            .quit()
            .map(|_| ())
            .map_err(|e| SessionError::ConnectionError(e.to_string()))
    }
}

/// A reply code from the relay during AUTH means the credentials were
/// refused; anything else (I/O, no shared mechanism) is a transport problem.
fn classify_auth_error(error: SmtpError) -> SessionError {
    if error.is_permanent() || error.is_transient() {
        SessionError::AuthenticationFailed(error.to_string())
    } else {
        SessionError::ConnectionError(error.to_string())
    }
}
