use crate::transport::RemoteTrackSet;
use tandem_core::NetworkCandidate;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TransportState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

/// Events the peer transport feeds into the session loop.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    CandidateGenerated(NetworkCandidate),
    RemoteTracksChanged(RemoteTrackSet),
    ConnectionStateChanged(TransportState),
}
