//! OTP notification message

/// Display name shown in the `From` header
pub const SENDER_DISPLAY_NAME: &str = "Auth App";

pub const OTP_SUBJECT: &str = "Your One-Time Password (OTP) for Password Reset";

/// How long the code stays valid, as told to the recipient
pub const OTP_EXPIRY_NOTE: &str = "10 minutes";

/// One password-reset code addressed to one recipient.
///
/// Neither field is checked: the recipient is handed to the mail layer as
/// typed and the code is interpolated verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpMessage {
    pub recipient: String,
    pub code: String,
}

impl OtpMessage {
    pub fn new(recipient: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            code: code.into(),
        }
    }

    pub fn subject(&self) -> &'static str {
        OTP_SUBJECT
    }

    /// Plain text body
    pub fn text_body(&self) -> String {
        format!(
            "Your OTP for password reset is: {code}\n\
             \n\
             This code will expire in {expiry}.\n\
             \n\
             If you didn't request this password reset, please ignore this email.\n\
             \n\
             Best regards,\n\
             {team} Team\n",
            code = self.code,
            expiry = OTP_EXPIRY_NOTE,
            team = SENDER_DISPLAY_NAME,
        )
    }
}
