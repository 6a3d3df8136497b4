//! Entry procedure shared by the binary and the integration tests

use crate::cli::Cli;
use crate::config::Config;
use crate::domain::OtpMessage;
use crate::email::MailConnector;
use crate::error::{NotifyError, Result};
use crate::notifier::{Delivery, Notifier};
use clap::Parser;
use std::ffi::OsString;
use std::io::Write;
use tracing::{debug, warn};

/// Line printed on stdout after the relay accepted the message
pub const SUCCESS_LINE: &str = "Email sent successfully.";

/// Parse the command line. Touches nothing but `args`.
pub fn parse_args<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Ok(Cli::try_parse_from(args)?)
}

/// Build the configuration through `lookup` and send one OTP.
///
/// The configuration is complete before `connector` is asked for a session.
pub fn execute<F>(cli: Cli, lookup: F, connector: &dyn MailConnector) -> Result<Delivery>
where
    F: Fn(&str) -> Option<String>,
{
    if !cli.extra.is_empty() {
        warn!(count = cli.extra.len(), "Ignoring extra arguments");
    }

    let config = Config::from_lookup(lookup)?;
    let message = OtpMessage::new(cli.recipient_email, cli.otp);

    Notifier::new(&config, connector).send(&message)
}

/// [`parse_args`] then [`execute`]: `lookup` is never called for a bad
/// command line. The process is never exited from here.
pub fn run<I, T, F>(args: I, lookup: F, connector: &dyn MailConnector) -> Result<Delivery>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    F: Fn(&str) -> Option<String>,
{
    let cli = parse_args(args)?;
    execute(cli, lookup, connector)
}

/// Write the outcome of a run to the process streams and return the exit
/// status.
///
/// Success prints [`SUCCESS_LINE`] on `stdout`. Help and version text also go
/// to `stdout`; every error goes to `stderr`. Write failures are ignored.
pub fn report<O, E>(result: Result<Delivery>, stdout: &mut O, stderr: &mut E) -> u8
where
    O: Write,
    E: Write,
{
    match result {
        Ok(delivery) => {
            debug!(recipient = %delivery.recipient, reply = %delivery.relay_reply, "Delivered");
            writeln!(stdout, "{}", SUCCESS_LINE).ok();
            0
        }
        Err(NotifyError::Usage(err)) => {
            // clap's rendering already ends with a newline
            if err.use_stderr() {
                write!(stderr, "{}", err).ok();
            } else {
                write!(stdout, "{}", err).ok();
            }
            NotifyError::Usage(err).exit_code()
        }
        Err(err) => {
            if let NotifyError::Authentication(reply) = &err {
                debug!(%reply, "Relay rejected credentials");
            }
            writeln!(stderr, "{}", err).ok();
            err.exit_code()
        }
    }
}
