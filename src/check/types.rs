use std::fmt;

/// Domain-level verdict for one input address.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainStatus {
    /// The input could not be parsed into a usable domain.
    NoDomain,
    /// The domain yielded no mail exchanger, explicit or implicit.
    NoValidMx,
    /// At least one exchanger exists for the domain.
    ValidDomain,
}

impl fmt::Display for DomainStatus {
    // Labels kept verbatim from the original reporting surface;
    // downstream consumers match on them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDomain => f.write_str("домен отсутствует"),
            Self::NoValidMx => f.write_str("MX-записи отсутствуют или некорректны"),
            Self::ValidDomain => f.write_str("домен валиден"),
        }
    }
}

/// Advisory verdict from the SMTP dialogue, independent of the domain
/// verdict. `Unknown` is a first-class answer: greylisting, timeouts and
/// unreachable servers all land here, never in `Rejected`.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpStatus {
    Accepted,
    Rejected,
    Unknown,
}

impl fmt::Display for SmtpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => f.write_str("accepted"),
            Self::Rejected => f.write_str("rejected"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Final per-address verdict, one per input line, emitted exactly once.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// The normalized address, or the trimmed raw input when parsing
    /// failed.
    pub address: String,
    /// Empty when no domain could be extracted.
    pub domain: String,
    /// Exchanger hostnames in the order they were tried.
    pub mx_hosts: Vec<String>,
    pub domain_status: DomainStatus,
    pub smtp_status: SmtpStatus,
}
