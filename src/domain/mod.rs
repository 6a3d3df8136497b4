//! Domain models for the OTP mailer

pub mod otp;

pub use otp::*;
