/// One resolved mail exchanger for a domain. Lower priority wins.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxCandidate {
    pub hostname: String,
    pub priority: u16,
}

impl MxCandidate {
    pub fn new(priority: u16, hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            priority,
        }
    }
}
