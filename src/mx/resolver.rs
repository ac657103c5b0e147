use std::thread;
use std::time::Duration;

use tracing::{debug, warn};
use trust_dns_resolver::Resolver;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::system_conf::read_system_conf;

use super::{Error, MxCandidate};

/// Pause before the single retry after a DNS timeout.
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Lookup seam between the resolution logic and the wire, stubbed out in
/// tests.
pub(crate) trait LookupMx {
    /// MX records for `domain`, in answer order. Missing records (including
    /// NXDOMAIN) are an empty vec, not an error.
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxCandidate>, ResolveError>;

    /// Whether the domain itself resolves to at least one A/AAAA record.
    fn has_address(&self, domain: &str) -> Result<bool, ResolveError>;
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxCandidate>, ResolveError> {
        let lookup = match Resolver::mx_lookup(self, domain) {
            Ok(lookup) => lookup,
            Err(err) => {
                return match err.kind() {
                    ResolveErrorKind::NoRecordsFound { .. } => Ok(Vec::new()),
                    _ => Err(err),
                };
            }
        };
        let mut candidates = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(mx.exchange().to_utf8());
            if exchange.is_empty() {
                continue;
            }
            candidates.push(MxCandidate::new(mx.preference(), exchange));
        }
        Ok(candidates)
    }

    fn has_address(&self, domain: &str) -> Result<bool, ResolveError> {
        match self.lookup_ip(domain) {
            Ok(lookup) => Ok(lookup.iter().next().is_some()),
            Err(err) => match err.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => Ok(false),
                _ => Err(err),
            },
        }
    }
}

/// Resolves the ordered mail-exchanger candidates for a domain using the
/// system resolver configuration.
pub struct MxResolver {
    inner: Resolver,
}

impl MxResolver {
    pub fn from_system_conf() -> Result<Self, Error> {
        let inner = Resolver::from_system_conf().map_err(Error::resolver_init)?;
        Ok(Self { inner })
    }

    /// Same as [`from_system_conf`](Self::from_system_conf), with an
    /// explicit per-query timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let (config, mut options) = read_system_conf().map_err(Error::resolver_init)?;
        options.timeout = timeout;
        let inner = Resolver::new(config, options).map_err(Error::resolver_init)?;
        Ok(Self { inner })
    }
}

/// Seam between the checking engine and DNS; tests swap in stub
/// resolvers to avoid the network entirely.
pub trait ResolveMx {
    /// Candidates ordered by ascending priority, ties kept in answer
    /// order so runs stay reproducible. Empty when the domain routes no
    /// mail or does not resolve at all.
    fn resolve(&self, domain: &str) -> Vec<MxCandidate>;
}

impl ResolveMx for MxResolver {
    fn resolve(&self, domain: &str) -> Vec<MxCandidate> {
        resolve_with(&self.inner, domain)
    }
}

pub(crate) fn resolve_with<R: LookupMx>(resolver: &R, domain: &str) -> Vec<MxCandidate> {
    let mut candidates = match lookup_with_retry(resolver, domain) {
        Ok(candidates) => candidates,
        Err(err) => {
            debug!(domain, error = %err, "MX lookup failed, treating as no exchangers");
            return Vec::new();
        }
    };

    if candidates.is_empty() {
        // Implicit MX: a domain with only address records still receives
        // mail on those addresses (RFC 5321 §5.1).
        match resolver.has_address(domain) {
            Ok(true) => candidates.push(MxCandidate::new(0, domain)),
            Ok(false) => {}
            Err(err) => {
                debug!(domain, error = %err, "address lookup failed during implicit-MX fallback");
            }
        }
    }

    candidates.sort_by_key(|candidate| candidate.priority);
    candidates
}

fn lookup_with_retry<R: LookupMx>(
    resolver: &R,
    domain: &str,
) -> Result<Vec<MxCandidate>, ResolveError> {
    match resolver.lookup_mx(domain) {
        Err(err) if matches!(err.kind(), ResolveErrorKind::Timeout) => {
            warn!(domain, "DNS timeout, retrying once");
            thread::sleep(RETRY_BACKOFF);
            resolver.lookup_mx(domain)
        }
        other => other,
    }
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}
