#![forbid(unsafe_code)]
//! mailprobe_lib — pre-screen deliverability of email addresses without
//! sending mail: MX resolution plus a best-effort SMTP handshake
//! (EHLO → MAIL FROM → RCPT TO, never DATA).

pub mod address;
pub mod check;
pub mod mx;
pub mod probe;

pub use address::{Address, ParseError, parse_address};
pub use check::{CheckOptions, Checker, DomainStatus, Pacer, SmtpStatus, ValidationResult};
pub use mx::{Error as MxError, MxCandidate, MxResolver, ResolveMx};
pub use probe::{ProbeFailure, ProbeOptions, ProbeOutcome, ProbeStage, Prober, SmtpProber};
