//! Command-line arguments

use clap::Parser;

/// Send a one-time password for a password reset by email
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "otp-mailer", version)]
pub struct Cli {
    /// Address the OTP is sent to
    pub recipient_email: String,

    /// The one-time password, sent verbatim
    #[arg(allow_hyphen_values = true)]
    pub otp: String,

    /// Trailing arguments are accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}
