use std::fmt;

use thiserror::Error;

/// One parsed input address. The domain is lowercased and
/// punycode-normalized; the local part is kept as extracted.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub local_part: String,
    pub domain: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local_part, self.domain)
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no '@' separator")]
    MissingSeparator,
    #[error("local part is empty")]
    EmptyLocalPart,
    #[error("domain is empty")]
    EmptyDomain,
    #[error("domain IDNA conversion failed")]
    IdnaConversion {
        #[source]
        source: idna::Errors,
    },
}
