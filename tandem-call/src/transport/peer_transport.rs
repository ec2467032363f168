use crate::error::TransportError;
use crate::media::MediaSource;
use crate::transport::TransportEvent;
use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::{NetworkCandidate, SessionDescription};
use tokio::sync::mpsc;

/// The platform's real-time transport primitive, used as a black box.
///
/// Codec selection, packetization and the actual media path live behind
/// this seam. Implementations report asynchronous activity through the
/// event sender handed to the factory.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    async fn create_offer(&self) -> Result<SessionDescription, TransportError>;
    async fn create_answer(&self) -> Result<SessionDescription, TransportError>;
    async fn set_local_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), TransportError>;
    async fn set_remote_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), TransportError>;
    async fn add_candidate(&self, candidate: NetworkCandidate) -> Result<(), TransportError>;
    /// Closes the transport. Idempotent.
    async fn close(&self);
}

/// Builds one transport per session, wired to the local source and the
/// session's event inflow.
#[async_trait]
pub trait TransportFactory: Send + Sync {
    async fn create(
        &self,
        source: Arc<dyn MediaSource>,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Arc<dyn PeerTransport>, TransportError>;
}
