//! DNS MX resolution.
//!
//! The public entry point is [`MxResolver`], which performs a synchronous
//! lookup using the system resolver and returns the ordered mail-exchanger
//! candidates for a domain. Domains without explicit MX records but with
//! address records get a single implicit candidate, per standard mail
//! routing. Lookup failures are local to the queried domain and come back
//! as an empty candidate set, never as a run-level error.

mod error;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use resolver::{MxResolver, ResolveMx};
pub use types::MxCandidate;

#[cfg(test)]
mod tests;
