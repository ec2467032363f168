use serde::{Deserialize, Serialize};

/// Address/route hint for establishing the direct transport path.
///
/// Candidates are generated asynchronously and independently of the
/// description exchange, so arrival order relative to the remote
/// description is not guaranteed.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkCandidate {
    pub candidate: String,
    pub sdp_mid: Option<String>,
    pub sdp_m_line_index: Option<u16>,
}

impl NetworkCandidate {
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            sdp_mid: None,
            sdp_m_line_index: None,
        }
    }
}
