use crate::error::SignalingError;
use crate::rendezvous::SignalingChannel;
use std::sync::Arc;
use tandem_core::{NetworkCandidate, PeerId, RoomId, SessionDescription, SignalMessage};
use tracing::{debug, info, warn};

/// Room rendezvous over an injected signaling channel.
///
/// One client instance serves one session: it binds to a single room id
/// (assigned on `created` for the creator, chosen up front for the
/// joiner) and relays offer/answer/candidate traffic for that room only.
pub struct RendezvousClient {
    channel: Arc<dyn SignalingChannel>,
    room: Option<RoomId>,
    left: bool,
}

impl RendezvousClient {
    pub fn new(channel: Arc<dyn SignalingChannel>) -> Self {
        Self {
            channel,
            room: None,
            left: false,
        }
    }

    pub fn room(&self) -> Option<&RoomId> {
        self.room.as_ref()
    }

    /// Requests a fresh room from the signaling collaborator. The room id
    /// arrives later in a `created` message and is bound via `bind_room`.
    pub async fn create_room(&self) -> Result<(), SignalingError> {
        info!("requesting room creation");
        self.channel.send(SignalMessage::Create).await
    }

    /// Requests membership in an existing room. Acceptance arrives as a
    /// `joined` message carrying our own peer id.
    pub async fn join_room(&mut self, room: RoomId) -> Result<(), SignalingError> {
        info!("joining room {}", room);
        self.room = Some(room.clone());
        self.channel.send(SignalMessage::Join { room }).await
    }

    /// Binds the room id announced by the server (creator side).
    pub fn bind_room(&mut self, room: RoomId) {
        if let Some(bound) = &self.room {
            if bound != &room {
                warn!("ignoring room rebind {} -> {}", bound, room);
            }
            return;
        }
        self.room = Some(room);
    }

    /// Room-scoped inbound filter: one ordered stream per room. `created`
    /// is accepted while no room is bound yet; `welcome` is
    /// connection-scoped and always accepted upstream of this client.
    pub fn accepts(&self, message: &SignalMessage) -> bool {
        match message.room() {
            None => true,
            Some(room) => match &self.room {
                Some(bound) => bound == room,
                None => matches!(message, SignalMessage::Created { .. }),
            },
        }
    }

    pub async fn send_offer(
        &self,
        from: PeerId,
        description: SessionDescription,
    ) -> Result<(), SignalingError> {
        let room = self.bound_room()?;
        self.channel
            .send(SignalMessage::Offer {
                room,
                from,
                description,
            })
            .await
    }

    pub async fn send_answer(
        &self,
        from: PeerId,
        description: SessionDescription,
    ) -> Result<(), SignalingError> {
        let room = self.bound_room()?;
        self.channel
            .send(SignalMessage::Answer {
                room,
                from,
                description,
            })
            .await
    }

    pub async fn send_candidate(
        &self,
        from: PeerId,
        candidate: NetworkCandidate,
    ) -> Result<(), SignalingError> {
        let room = self.bound_room()?;
        self.channel
            .send(SignalMessage::Candidate {
                room,
                from,
                candidate,
            })
            .await
    }

    /// Leaves the bound room. Best-effort and idempotent: a second leave
    /// is a no-op and a send failure is only logged.
    pub async fn leave(&mut self) {
        if self.left {
            debug!("leave already performed");
            return;
        }
        self.left = true;

        let Some(room) = self.room.clone() else {
            return;
        };
        info!("leaving room {}", room);
        if let Err(e) = self.channel.send(SignalMessage::Leave { room }).await {
            warn!("failed to send leave: {}", e);
        }
    }

    fn bound_room(&self) -> Result<RoomId, SignalingError> {
        self.room
            .clone()
            .ok_or_else(|| SignalingError::Unavailable("no room bound".into()))
    }
}
