//! OTP Mailer - one-shot password-reset code delivery
//!
//! Sends a single one-time-password email through an SMTP relay using
//! STARTTLS and the sender credentials found in the environment.

pub mod cli;
pub mod command;
pub mod config;
pub mod domain;
pub mod email;
pub mod error;
pub mod notifier;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{NotifyError, Result};
pub use notifier::{Delivery, Notifier};
