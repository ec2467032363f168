//! Two-party call core: room rendezvous, offer/answer negotiation,
//! candidate trickling and session lifecycle, over injected signaling,
//! media and transport capabilities.

mod config;
mod error;
pub mod media;
pub mod negotiation;
pub mod rendezvous;
pub mod session;
pub mod transport;

pub use config::SessionConfig;
pub use error::{MediaError, NegotiationError, SignalingError, TransportError};
pub use media::{LocalMediaManager, MediaConstraints, MediaDevices, MediaSource};
pub use negotiation::NegotiationEngine;
pub use rendezvous::{RendezvousClient, SignalingChannel};
pub use session::{
    BinderOutcome, CallCommand, CallRole, CallSession, CallState, FailureReason, MediaSink,
    RemoteSinkBinder, SessionHandle,
};
pub use transport::{
    PeerTransport, RemoteTrack, RemoteTrackSet, TrackKind, TransportEvent, TransportFactory,
    TransportState,
};
