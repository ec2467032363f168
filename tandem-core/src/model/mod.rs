mod candidate;
mod description;
mod peer;
mod room;
mod signaling;

pub use candidate::NetworkCandidate;
pub use description::{SdpKind, SessionDescription};
pub use peer::PeerId;
pub use room::RoomId;
pub use signaling::SignalMessage;
