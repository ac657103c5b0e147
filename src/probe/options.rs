use std::time::Duration;

/// Controls how the probe talks to a domain's exchangers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    pub port: u16,
    /// Name announced in `EHLO`; deliberately non-identifying.
    pub helo_host: String,
    /// Envelope sender for `MAIL FROM`.
    pub mail_from: String,
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            helo_host: "localhost".to_string(),
            mail_from: "no-reply@example.com".to_string(),
            connect_timeout: Duration::from_secs(6),
            command_timeout: Duration::from_secs(6),
        }
    }
}
