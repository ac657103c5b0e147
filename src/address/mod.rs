//! Address parsing and normalization.
//!
//! Only does enough syntax work to pull a usable domain out of one raw
//! input line; reachability is what the rest of the crate establishes,
//! not RFC 5321 grammar conformance.

mod types;

pub use types::{Address, ParseError};

/// Characters commonly wrapping pasted addresses (`<user@host>`,
/// trailing commas from lists, etc.).
const EDGE_PUNCTUATION: &[char] = &[
    '"', '\'', '<', '>', '[', ']', '(', ')', '{', '}', '.', ',', ';', ':',
];

/// Extracts the local part and domain from a raw line of text.
///
/// Whitespace and surrounding punctuation are stripped, the address is
/// split on its last `@`, and the domain is converted to lowercase
/// ASCII via IDNA. No network calls are made here.
pub fn parse_address(raw: &str) -> Result<Address, ParseError> {
    let trimmed = raw.trim().trim_matches(EDGE_PUNCTUATION);

    let Some((local, domain)) = trimmed.rsplit_once('@') else {
        return Err(ParseError::MissingSeparator);
    };
    let local = local.trim();
    let domain = domain.trim();

    if local.is_empty() {
        return Err(ParseError::EmptyLocalPart);
    }
    if domain.is_empty() {
        return Err(ParseError::EmptyDomain);
    }

    let ascii_domain =
        idna::domain_to_ascii(domain).map_err(|source| ParseError::IdnaConversion { source })?;
    if ascii_domain.is_empty() {
        return Err(ParseError::EmptyDomain);
    }

    Ok(Address {
        local_part: local.to_lowercase(),
        domain: ascii_domain,
    })
}
