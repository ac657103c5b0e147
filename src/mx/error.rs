use thiserror::Error;

/// Failures that abort a run before any address is processed. Per-domain
/// lookup trouble is not represented here; it degrades the one address.
#[derive(Debug, Error)]
pub enum MxError {
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
}

impl MxError {
    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }
}
