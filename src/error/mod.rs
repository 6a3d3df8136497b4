//! Unified error handling for the OTP mailer

use thiserror::Error;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Every way a single invocation can end without delivering the email
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Wrong command line; raised before the environment is read
    #[error("{0}")]
    Usage(#[from] clap::Error),

    #[error("Fatal: {0}")]
    Configuration(String),

    /// The relay refused the sender credentials. The relay's own reply is
    /// kept for logging but the operator-facing message is fixed.
    #[error("Authentication error: Check your GMAIL_USER and GMAIL_APP_PASS in the .env file.")]
    Authentication(String),

    #[error("An error occurred while sending email: {0}")]
    Send(String),
}

impl NotifyError {
    /// Process exit status for this failure.
    ///
    /// All failures currently share status 1; callers that script against
    /// the mailer only distinguish zero from non-zero. `--help` and
    /// `--version` surface as `Usage` but are not failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(err) if !err.use_stderr() => 0,
            Self::Usage(_) | Self::Configuration(_) | Self::Authentication(_) | Self::Send(_) => 1,
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
}

impl From<validator::ValidationErrors> for NotifyError {
    fn from(errors: validator::ValidationErrors) -> Self {
        NotifyError::Configuration(errors.to_string())
    }
}
