use std::cell::Cell;

use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};

use super::MxCandidate;
use super::resolver::{self, LookupMx};

type MxResult = Result<Vec<MxCandidate>, ResolveError>;
type AddrResult = Result<bool, ResolveError>;

pub(crate) struct StubResolver {
    pub on_mx: Box<dyn Fn(&str) -> MxResult>,
    pub on_addr: Box<dyn Fn(&str) -> AddrResult>,
}

impl StubResolver {
    pub(crate) fn new<M, A>(on_mx: M, on_addr: A) -> Self
    where
        M: Fn(&str) -> MxResult + 'static,
        A: Fn(&str) -> AddrResult + 'static,
    {
        Self {
            on_mx: Box::new(on_mx),
            on_addr: Box::new(on_addr),
        }
    }

    pub(crate) fn without_addresses<M>(on_mx: M) -> Self
    where
        M: Fn(&str) -> MxResult + 'static,
    {
        Self::new(on_mx, |_| Ok(false))
    }
}

impl LookupMx for StubResolver {
    fn lookup_mx(&self, domain: &str) -> MxResult {
        (self.on_mx)(domain)
    }

    fn has_address(&self, domain: &str) -> AddrResult {
        (self.on_addr)(domain)
    }
}

#[test]
fn orders_by_priority_keeping_answer_order_for_ties() {
    let stub = StubResolver::without_addresses(|domain| {
        assert_eq!(domain, "example.com");
        Ok(vec![
            MxCandidate::new(10, "mx-b.example.com"),
            MxCandidate::new(10, "mx-a.example.com"),
            MxCandidate::new(5, "mx-c.example.com"),
        ])
    });

    let candidates = resolver::resolve_with(&stub, "example.com");
    let hostnames: Vec<&str> = candidates
        .iter()
        .map(|candidate| candidate.hostname.as_str())
        .collect();
    assert_eq!(
        hostnames,
        ["mx-c.example.com", "mx-b.example.com", "mx-a.example.com"]
    );
}

#[test]
fn falls_back_to_implicit_mx_when_domain_has_addresses() {
    let stub = StubResolver::new(|_| Ok(Vec::new()), |_| Ok(true));

    let candidates = resolver::resolve_with(&stub, "example.com");
    assert_eq!(candidates, vec![MxCandidate::new(0, "example.com")]);
}

#[test]
fn unresolvable_domain_yields_no_candidates() {
    let stub = StubResolver::new(|_| Ok(Vec::new()), |_| Ok(false));

    assert!(resolver::resolve_with(&stub, "nonexistent-domain-xyz123.invalid").is_empty());
}

#[test]
fn lookup_error_downgrades_to_empty() {
    let stub = StubResolver::without_addresses(|_| {
        Err(ResolveErrorKind::Message("SERVFAIL from upstream").into())
    });

    assert!(resolver::resolve_with(&stub, "example.com").is_empty());
}

#[test]
fn timeout_is_retried_once() {
    let calls = Cell::new(0usize);
    let stub = StubResolver::without_addresses(move |_| {
        calls.set(calls.get() + 1);
        if calls.get() == 1 {
            Err(ResolveErrorKind::Timeout.into())
        } else {
            assert_eq!(calls.get(), 2);
            Ok(vec![MxCandidate::new(10, "mx.example.com")])
        }
    });

    let candidates = resolver::resolve_with(&stub, "example.com");
    assert_eq!(candidates, vec![MxCandidate::new(10, "mx.example.com")]);
}

#[test]
fn persistent_timeout_downgrades_to_empty() {
    let calls = Cell::new(0usize);
    let stub = StubResolver::without_addresses(move |_| {
        calls.set(calls.get() + 1);
        Err(ResolveErrorKind::Timeout.into())
    });

    assert!(resolver::resolve_with(&stub, "example.com").is_empty());
}

#[test]
fn normalize_exchange_trims_dot_and_lowercases() {
    let out = resolver::normalize_exchange("Mail.EXAMPLE.com.".to_string());
    assert_eq!(out, "mail.example.com");
}
