//! Conversion of an [`OtpMessage`] into a wire-ready email

use super::provider::SessionError;
use crate::domain::{OtpMessage, SENDER_DISPLAY_NAME};
use lettre::{
    message::{header::ContentType, Mailbox},
    Address, Message,
};

/// Build the plain-text email sent from `sender` to the message recipient.
///
/// An address lettre cannot parse is reported as [`SessionError::InvalidMessage`].
pub fn build_email(message: &OtpMessage, sender: &str) -> Result<Message, SessionError> {
    let from_address: Address = sender.parse().map_err(|e| {
        SessionError::InvalidMessage(format!("Invalid from address: {}", e))
    })?;
    let from = Mailbox::new(Some(SENDER_DISPLAY_NAME.to_string()), from_address);

    let to: Mailbox = message.recipient.parse().map_err(|e| {
        SessionError::InvalidMessage(format!("Invalid to address: {}", e))
    })?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject())
        .header(ContentType::TEXT_PLAIN)
        .body(message.text_body())
        .map_err(|e| SessionError::InvalidMessage(e.to_string()))
}
