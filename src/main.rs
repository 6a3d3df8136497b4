use otp_mailer::{command, config::TelemetryConfig, email::SmtpConnector, telemetry};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    // A bad command line is reported before .env or any variable is read
    let result = command::parse_args(std::env::args_os()).and_then(|cli| {
        // Variables already in the environment win over .env
        dotenvy::dotenv().ok();
        telemetry::init(&TelemetryConfig::from_env());

        let connector = SmtpConnector::new();
        command::execute(cli, |key| std::env::var(key).ok(), &connector)
    });

    let code = command::report(result, &mut io::stdout().lock(), &mut io::stderr().lock());
    ExitCode::from(code)
}
