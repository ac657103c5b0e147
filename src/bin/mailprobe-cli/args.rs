use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use mailprobe_lib::check::CheckOptions;
use mailprobe_lib::probe::ProbeOptions;

use crate::output::{self, OutputFormat};

/// Pre-screens email addresses: MX lookup plus a best-effort SMTP
/// handshake, without ever sending mail.
#[derive(Parser)]
#[command(name = "mailprobe-cli")]
pub struct Cli {
    /// path to a text file with addresses (one per line); stdin when
    /// omitted
    #[arg(long)]
    pub input: Option<String>,

    /// skip the SMTP handshake step (domain/MX verdicts only)
    #[arg(long = "no-smtp")]
    pub no_smtp: bool,

    /// DNS timeout in seconds
    #[arg(long = "dns-timeout", default_value_t = 4.0)]
    pub dns_timeout: f64,

    /// SMTP connect/command timeout in seconds
    #[arg(long = "smtp-timeout", default_value_t = 6.0)]
    pub smtp_timeout: f64,

    /// name announced in EHLO
    #[arg(long = "helo-host", default_value = "localhost")]
    pub helo_host: String,

    /// envelope sender for MAIL FROM
    #[arg(long = "mail-from", default_value = "no-reply@example.com")]
    pub mail_from: String,

    /// pause between successive addresses, in seconds
    #[arg(long, default_value_t = 1.0)]
    pub sleep: f64,

    /// SMTP port (useful against a local test server)
    #[arg(long, default_value_t = 25)]
    pub port: u16,

    /// output format: human|ndjson
    #[arg(long, default_value = "human")]
    pub format: String,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        output::parse_format(&self.format)
    }

    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            smtp_enabled: !self.no_smtp,
            sleep: Duration::from_secs_f64(self.sleep.max(0.0)),
            dns_timeout: Duration::from_secs_f64(self.dns_timeout.max(0.1)),
            probe: ProbeOptions {
                port: self.port,
                helo_host: self.helo_host.clone(),
                mail_from: self.mail_from.clone(),
                connect_timeout: Duration::from_secs_f64(self.smtp_timeout.max(0.1)),
                command_timeout: Duration::from_secs_f64(self.smtp_timeout.max(0.1)),
            },
        }
    }
}
