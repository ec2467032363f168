pub mod model;

pub use model::{NetworkCandidate, PeerId, RoomId, SdpKind, SessionDescription, SignalMessage};
