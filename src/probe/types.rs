use std::fmt;

/// How far a probe got against one exchanger. Stages past `Banner` mean
/// a real SMTP dialogue took place.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProbeStage {
    Connect,
    Banner,
    Ehlo,
    MailFrom,
    RcptTo,
}

/// Connection-level trouble observed during a probe. Recorded inside the
/// outcome rather than propagated; a single exchanger misbehaving never
/// fails the run.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    /// Connect or read deadline expired.
    Timeout { message: String },
    /// TCP-level failure before any dialogue.
    Connect { message: String },
    /// The server said something that is not SMTP.
    ProtocolViolation { message: String },
    /// Other I/O trouble, typically the server hanging up mid-dialogue.
    Io { message: String },
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { message } => write!(f, "timeout: {message}"),
            Self::Connect { message } => write!(f, "connection failed: {message}"),
            Self::ProtocolViolation { message } => write!(f, "protocol violation: {message}"),
            Self::Io { message } => write!(f, "i/o error: {message}"),
        }
    }
}

/// What one SMTP dialogue observed. `reply_code` belongs to
/// `stage_reached`: it is the reply that settled the dialogue, absent
/// when that stage died without one.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub exchange: String,
    pub reply_code: Option<u16>,
    pub reply_text: String,
    pub stage_reached: ProbeStage,
    pub error: Option<ProbeFailure>,
}

impl ProbeOutcome {
    pub(crate) fn failed(
        exchange: impl Into<String>,
        stage_reached: ProbeStage,
        error: ProbeFailure,
    ) -> Self {
        Self {
            exchange: exchange.into(),
            reply_code: None,
            reply_text: String::new(),
            stage_reached,
            error: Some(error),
        }
    }

    /// True when no usable dialogue happened on this exchanger and the
    /// next candidate should be tried.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self.stage_reached,
            ProbeStage::Connect | ProbeStage::Banner
        )
    }
}
