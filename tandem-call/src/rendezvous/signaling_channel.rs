use crate::error::SignalingError;
use async_trait::async_trait;
use tandem_core::SignalMessage;

/// Outbound half of the signaling channel, implemented by the concrete
/// transport (a websocket, a hosted relay, a test double).
///
/// Inbound messages are pushed by the same implementation into the
/// session's signal sender, forming one ordered event stream per room.
/// The channel handle is injected and owned explicitly; there is no
/// ambient singleton connection.
#[async_trait]
pub trait SignalingChannel: Send + Sync {
    async fn send(&self, message: SignalMessage) -> Result<(), SignalingError>;
}
