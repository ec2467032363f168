use tandem_core::SdpKind;
use thiserror::Error;

/// Local media acquisition failures, distinguished where the platform
/// exposes a reason.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum MediaError {
    #[error("camera/microphone permission denied")]
    PermissionDenied,
    #[error("no capture device found")]
    DeviceNotFound,
    #[error("capture device already in use")]
    DeviceInUse,
    #[error("media unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum SignalingError {
    #[error("signaling channel unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("description rejected by transport: {0}")]
    DescriptionRejected(String),
    #[error("candidate rejected by transport: {0}")]
    CandidateRejected(String),
    #[error("peer transport disconnected")]
    Disconnected,
    #[error("transport setup failed: {0}")]
    Setup(String),
}

#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("{kind} description already set in this negotiation round")]
    DescriptionAlreadySet { kind: SdpKind },
    #[error("received an answer with no outstanding offer")]
    UnexpectedAnswer,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Signaling(#[from] SignalingError),
}
