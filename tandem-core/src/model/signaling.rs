use crate::model::candidate::NetworkCandidate;
use crate::model::description::SessionDescription;
use crate::model::peer::PeerId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

/// Room-scoped signaling schema, transport-agnostic.
///
/// `create`/`join`/`leave` flow client to server, `created`/`joined`/
/// `welcome`/`peerLeft` flow server to client, and `offer`/`answer`/
/// `candidate` are relayed between the (at most two) room members. The
/// concrete channel owns the encoding; the tagged serde layout here is
/// the wire shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SignalMessage {
    Create,
    Created {
        room: RoomId,
    },
    Join {
        room: RoomId,
    },
    Joined {
        room: RoomId,
        peer: PeerId,
    },
    Welcome {
        peer: PeerId,
    },
    Offer {
        room: RoomId,
        from: PeerId,
        description: SessionDescription,
    },
    Answer {
        room: RoomId,
        from: PeerId,
        description: SessionDescription,
    },
    Candidate {
        room: RoomId,
        from: PeerId,
        candidate: NetworkCandidate,
    },
    Leave {
        room: RoomId,
    },
    PeerLeft {
        room: RoomId,
    },
}

impl SignalMessage {
    /// Room the message is scoped to, if any (`welcome` and `create`
    /// are connection-scoped).
    pub fn room(&self) -> Option<&RoomId> {
        match self {
            SignalMessage::Create | SignalMessage::Welcome { .. } => None,
            SignalMessage::Created { room }
            | SignalMessage::Join { room }
            | SignalMessage::Joined { room, .. }
            | SignalMessage::Offer { room, .. }
            | SignalMessage::Answer { room, .. }
            | SignalMessage::Candidate { room, .. }
            | SignalMessage::Leave { room }
            | SignalMessage::PeerLeft { room } => Some(room),
        }
    }
}
