//! The per-address checking engine: parse → resolve → probe → classify.
//!
//! [`Checker::check`] never fails; malformed input and network trouble
//! both come back as degraded verdicts so every input line yields exactly
//! one [`ValidationResult`].

mod pacer;
mod types;

pub use pacer::Pacer;
pub use types::{DomainStatus, SmtpStatus, ValidationResult};

use std::time::Duration;

use tracing::debug;

use crate::address;
use crate::mx::{Error as MxError, MxResolver, ResolveMx};
use crate::probe::{ProbeFailure, ProbeOptions, ProbeOutcome, ProbeStage, Prober, SmtpProber};

/// Engine-level knobs; the SMTP dialogue has its own set in
/// [`ProbeOptions`].
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// When false the handshake is skipped entirely; the domain verdict
    /// is still computed.
    pub smtp_enabled: bool,
    /// Pause between successive addresses.
    pub sleep: Duration,
    /// Per-query DNS deadline.
    pub dns_timeout: Duration,
    pub probe: ProbeOptions,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            smtp_enabled: true,
            sleep: Duration::from_secs(1),
            dns_timeout: Duration::from_secs(4),
            probe: ProbeOptions::default(),
        }
    }
}

/// The engine. Stateless across addresses; the resolver and prober are
/// injected so tests can run without touching the network.
pub struct Checker<R = MxResolver, P = SmtpProber> {
    resolver: R,
    prober: P,
    options: CheckOptions,
}

impl Checker {
    /// Engine wired to the system DNS configuration and a real TCP
    /// prober.
    pub fn from_system_conf(options: CheckOptions) -> Result<Self, MxError> {
        let resolver = MxResolver::with_timeout(options.dns_timeout)?;
        let prober = SmtpProber::new(options.probe.clone());
        Ok(Self::with_backends(resolver, prober, options))
    }
}

impl<R: ResolveMx, P: Prober> Checker<R, P> {
    pub fn with_backends(resolver: R, prober: P, options: CheckOptions) -> Self {
        Self {
            resolver,
            prober,
            options,
        }
    }

    /// Classifies one raw input line.
    pub fn check(&self, raw: &str) -> ValidationResult {
        let address = match address::parse_address(raw) {
            Ok(address) => address,
            Err(err) => {
                debug!(input = raw, error = %err, "address rejected before any lookup");
                return ValidationResult {
                    address: raw.trim().to_string(),
                    domain: String::new(),
                    mx_hosts: Vec::new(),
                    domain_status: DomainStatus::NoDomain,
                    smtp_status: SmtpStatus::Unknown,
                };
            }
        };

        let candidates = self.resolver.resolve(&address.domain);
        if candidates.is_empty() {
            return ValidationResult {
                address: address.to_string(),
                domain: address.domain,
                mx_hosts: Vec::new(),
                domain_status: DomainStatus::NoValidMx,
                smtp_status: SmtpStatus::Unknown,
            };
        }
        let mx_hosts: Vec<String> = candidates
            .iter()
            .map(|candidate| candidate.hostname.clone())
            .collect();

        let smtp_status = if self.options.smtp_enabled {
            let outcome = self.prober.probe(&candidates, &address);
            debug!(
                address = %address,
                exchange = %outcome.exchange,
                stage = ?outcome.stage_reached,
                code = ?outcome.reply_code,
                "probe finished"
            );
            classify_probe(&outcome)
        } else {
            SmtpStatus::Unknown
        };

        ValidationResult {
            address: address.to_string(),
            domain: address.domain,
            mx_hosts,
            domain_status: DomainStatus::ValidDomain,
            smtp_status,
        }
    }

    /// Lazily checks a sequence of input lines in order, pacing between
    /// successive items.
    pub fn check_all<'a, I>(&'a self, inputs: I) -> impl Iterator<Item = ValidationResult> + 'a
    where
        I: IntoIterator + 'a,
        I::IntoIter: 'a,
        I::Item: AsRef<str>,
    {
        let mut pacer = Pacer::new(self.options.sleep);
        inputs.into_iter().map(move |raw| {
            pacer.pace();
            self.check(raw.as_ref())
        })
    }
}

/// Maps a probe observation onto the advisory SMTP verdict. A 4xx reply
/// is never a rejection; greylisting looks exactly like one.
fn classify_probe(outcome: &ProbeOutcome) -> SmtpStatus {
    match (outcome.stage_reached, outcome.reply_code) {
        (ProbeStage::RcptTo, Some(code)) if (200..300).contains(&code) => SmtpStatus::Accepted,
        (ProbeStage::RcptTo, Some(code)) if (500..600).contains(&code) => SmtpStatus::Rejected,
        // A permanent MAIL FROM refusal followed by the server hanging up
        // is as close to a rejection as that stage gets.
        (ProbeStage::MailFrom, Some(code))
            if (500..600).contains(&code)
                && matches!(outcome.error, Some(ProbeFailure::Io { .. })) =>
        {
            SmtpStatus::Rejected
        }
        _ => SmtpStatus::Unknown,
    }
}
