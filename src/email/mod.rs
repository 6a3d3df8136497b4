//! Email delivery for the OTP mailer
//!
//! - `provider`: the session seam the notifier drives
//! - `smtp`: blocking SMTP implementation using lettre
//! - `message`: OTP message to RFC 5322 email

pub mod message;
pub mod provider;
pub mod smtp;

pub use message::build_email;
pub use provider::{MailConnector, MailSession, SessionError};
pub use smtp::{SmtpConnector, SmtpSession};
