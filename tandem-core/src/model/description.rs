use serde::{Deserialize, Serialize};
use std::fmt;

/// Role tag of a negotiated-capability document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SdpKind {
    Offer,
    Answer,
}

impl fmt::Display for SdpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdpKind::Offer => write!(f, "offer"),
            SdpKind::Answer => write!(f, "answer"),
        }
    }
}

/// Immutable negotiated-capability document for one side of a session.
///
/// Exactly one local and one remote description exist per negotiation
/// round; each role is set at most once per round.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct SessionDescription {
    pub kind: SdpKind,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpKind::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpKind::Answer,
            sdp: sdp.into(),
        }
    }
}
