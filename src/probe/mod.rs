//! SMTP handshake probing.
//!
//! The probe runs connect → banner → `EHLO` → `MAIL FROM` → `RCPT TO` →
//! `QUIT` against a domain's exchangers in priority order and records what
//! it observed. `DATA` is never sent, so no message can ever be delivered
//! by a probe. Exchangers that cannot be talked to at all are skipped in
//! favour of the next candidate; once a dialogue is underway the probe
//! settles on that exchanger, even when the answer stays ambiguous.

mod options;
mod session;
mod types;

pub use options::ProbeOptions;
pub use types::{ProbeFailure, ProbeOutcome, ProbeStage};

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use tracing::debug;

use crate::address::Address;
use crate::mx::MxCandidate;

use session::SmtpSession;

/// Seam between the checking engine and the network; tests swap in
/// scripted probers.
pub trait Prober {
    fn probe(&self, candidates: &[MxCandidate], recipient: &Address) -> ProbeOutcome;
}

/// The production prober, speaking plain SMTP over TCP.
#[derive(Debug, Clone, Default)]
pub struct SmtpProber {
    options: ProbeOptions,
}

impl SmtpProber {
    pub fn new(options: ProbeOptions) -> Self {
        Self { options }
    }
}

impl Prober for SmtpProber {
    fn probe(&self, candidates: &[MxCandidate], recipient: &Address) -> ProbeOutcome {
        let mut last = ProbeOutcome::failed(
            String::new(),
            ProbeStage::Connect,
            ProbeFailure::Connect {
                message: "no exchanger to try".to_string(),
            },
        );
        for candidate in candidates {
            let outcome = probe_exchanger(candidate, recipient, &self.options);
            if !outcome.is_connection_failure() {
                return outcome;
            }
            debug!(
                exchange = %candidate.hostname,
                stage = ?outcome.stage_reached,
                "exchanger yielded no dialogue, trying next candidate"
            );
            last = outcome;
        }
        last
    }
}

fn probe_exchanger(
    candidate: &MxCandidate,
    recipient: &Address,
    options: &ProbeOptions,
) -> ProbeOutcome {
    let exchange = candidate.hostname.as_str();

    let addrs = match socket_addrs(exchange, options.port) {
        Ok(addrs) if !addrs.is_empty() => addrs,
        Ok(_) => {
            return ProbeOutcome::failed(
                exchange,
                ProbeStage::Connect,
                ProbeFailure::Connect {
                    message: "no socket addresses resolved".to_string(),
                },
            );
        }
        Err(err) => {
            return ProbeOutcome::failed(
                exchange,
                ProbeStage::Connect,
                ProbeFailure::Connect {
                    message: err.to_string(),
                },
            );
        }
    };

    let mut session =
        match SmtpSession::connect(&addrs, options.connect_timeout, options.command_timeout) {
            Ok(session) => session,
            Err(err) => {
                return ProbeOutcome::failed(exchange, ProbeStage::Connect, failure_from_io(&err));
            }
        };

    let banner = match session.read_reply() {
        Ok(reply) => reply,
        Err(err) => {
            return ProbeOutcome::failed(exchange, ProbeStage::Banner, failure_from_io(&err));
        }
    };
    if !banner.is_positive() {
        // A server that greets with a refusal is treated like one we
        // could not reach; the next exchanger gets its turn.
        let outcome = ProbeOutcome {
            exchange: exchange.to_string(),
            reply_code: Some(banner.code),
            reply_text: banner.text,
            stage_reached: ProbeStage::Banner,
            error: Some(ProbeFailure::ProtocolViolation {
                message: format!("unexpected banner code {}", banner.code),
            }),
        };
        session.quit();
        return outcome;
    }

    // A sour EHLO reply is not decisive; plenty of servers loosen up at
    // the envelope stage.
    match session.command(&format!("EHLO {}", options.helo_host)) {
        Ok(reply) if !reply.is_positive() => {
            debug!(exchange, code = reply.code, "EHLO refused, continuing anyway");
        }
        Ok(_) => {}
        Err(err) => {
            return ProbeOutcome::failed(exchange, ProbeStage::Ehlo, failure_from_io(&err));
        }
    }

    let mail_reply = match session.command(&format!("MAIL FROM:<{}>", options.mail_from)) {
        Ok(reply) => reply,
        Err(err) => {
            return ProbeOutcome::failed(exchange, ProbeStage::MailFrom, failure_from_io(&err));
        }
    };
    // A non-2xx MAIL FROM is carried forward rather than acted on: the
    // RCPT reply decides, unless the server hangs up first.

    let rcpt_cmd = format!(
        "RCPT TO:<{}@{}>",
        recipient.local_part, recipient.domain
    );
    let outcome = match session.command(&rcpt_cmd) {
        Ok(reply) => ProbeOutcome {
            exchange: exchange.to_string(),
            reply_code: Some(reply.code),
            reply_text: reply.text,
            stage_reached: ProbeStage::RcptTo,
            error: None,
        },
        Err(err) if !mail_reply.is_positive() => ProbeOutcome {
            exchange: exchange.to_string(),
            reply_code: Some(mail_reply.code),
            reply_text: mail_reply.text.clone(),
            stage_reached: ProbeStage::MailFrom,
            error: Some(failure_from_io(&err)),
        },
        Err(err) => ProbeOutcome::failed(exchange, ProbeStage::RcptTo, failure_from_io(&err)),
    };

    session.quit();
    outcome
}

/// Resolves an exchanger hostname to socket addresses. A port embedded in
/// the hostname wins over the configured one; MX hosts normally carry
/// none.
fn socket_addrs(hostname: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
    if let Ok(addrs) = hostname.to_socket_addrs() {
        return Ok(addrs.collect());
    }
    (hostname, port).to_socket_addrs().map(Iterator::collect)
}

fn failure_from_io(err: &io::Error) -> ProbeFailure {
    let message = err.to_string();
    match err.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => ProbeFailure::Timeout { message },
        io::ErrorKind::InvalidData => ProbeFailure::ProtocolViolation { message },
        io::ErrorKind::ConnectionRefused => ProbeFailure::Connect { message },
        _ => ProbeFailure::Io { message },
    }
}
