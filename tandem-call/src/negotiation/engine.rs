use crate::error::NegotiationError;
use crate::rendezvous::RendezvousClient;
use crate::transport::PeerTransport;
use std::sync::Arc;
use tandem_core::{NetworkCandidate, PeerId, SdpKind, SessionDescription};
use tracing::{debug, info, warn};

/// Drives exactly one offer/answer exchange plus a live candidate
/// trickle for one session.
///
/// The engine is bound to one transport and one local peer id for its
/// whole lifetime; a new session gets a new instance. Candidates that
/// arrive before the remote description are buffered in arrival order
/// and flushed, in order, the moment the description is accepted.
pub struct NegotiationEngine {
    transport: Arc<dyn PeerTransport>,
    local_peer: PeerId,
    remote_peer: Option<PeerId>,
    local_description: Option<SessionDescription>,
    remote_description: Option<SessionDescription>,
    pending_candidates: Vec<NetworkCandidate>,
}

impl NegotiationEngine {
    pub fn new(local_peer: PeerId, transport: Arc<dyn PeerTransport>) -> Self {
        Self {
            transport,
            local_peer,
            remote_peer: None,
            local_description: None,
            remote_description: None,
            pending_candidates: Vec::new(),
        }
    }

    pub fn local_peer(&self) -> &PeerId {
        &self.local_peer
    }

    pub fn remote_peer(&self) -> Option<&PeerId> {
        self.remote_peer.as_ref()
    }

    /// Negotiation is complete at the description layer once both sides
    /// are recorded.
    pub fn descriptions_complete(&self) -> bool {
        self.local_description.is_some() && self.remote_description.is_some()
    }

    /// Joiner path: generate the first offer and relay it. The joiner
    /// always offers; the room creator waits.
    pub async fn send_offer(
        &mut self,
        rendezvous: &RendezvousClient,
    ) -> Result<(), NegotiationError> {
        let offer = self.transport.create_offer().await?;
        self.record_local(offer.clone())?;
        self.transport.set_local_description(offer.clone()).await?;
        info!("sending offer");
        rendezvous
            .send_offer(self.local_peer.clone(), offer)
            .await?;
        Ok(())
    }

    /// Incoming offer: record it as remote, flush buffered candidates,
    /// answer.
    ///
    /// Glare: if our own offer is outstanding, the side with the
    /// lexicographically smaller peer id yields and answers; the other
    /// side ignores the incoming offer and waits for the answer.
    pub async fn handle_offer(
        &mut self,
        from: PeerId,
        description: SessionDescription,
        rendezvous: &RendezvousClient,
    ) -> Result<(), NegotiationError> {
        if !self.note_remote_peer(&from) {
            return Ok(());
        }

        if let Some(local) = &self.local_description {
            if local.kind != SdpKind::Offer {
                // already answered once this round
                return Err(NegotiationError::DescriptionAlreadySet {
                    kind: SdpKind::Answer,
                });
            }
            if self.local_peer < from {
                info!("offer glare with {}: yielding, answering theirs", from);
                self.local_description = None;
            } else {
                info!("offer glare with {}: holding our offer", from);
                return Ok(());
            }
        }

        self.record_remote(description.clone())?;
        self.transport.set_remote_description(description).await?;
        self.flush_pending_candidates().await;

        let answer = self.transport.create_answer().await?;
        self.record_local(answer.clone())?;
        self.transport.set_local_description(answer.clone()).await?;
        info!("sending answer");
        rendezvous
            .send_answer(self.local_peer.clone(), answer)
            .await?;
        Ok(())
    }

    /// Incoming answer to our outstanding offer.
    pub async fn handle_answer(
        &mut self,
        from: PeerId,
        description: SessionDescription,
    ) -> Result<(), NegotiationError> {
        if !self.note_remote_peer(&from) {
            return Ok(());
        }
        match &self.local_description {
            Some(local) if local.kind == SdpKind::Offer => {}
            _ => return Err(NegotiationError::UnexpectedAnswer),
        }

        self.record_remote(description.clone())?;
        self.transport.set_remote_description(description).await?;
        self.flush_pending_candidates().await;
        info!("description exchange complete");
        Ok(())
    }

    /// Incoming candidate. Applied immediately once the remote
    /// description is set, buffered otherwise. Application failures are
    /// never fatal to the session.
    pub async fn handle_remote_candidate(&mut self, from: PeerId, candidate: NetworkCandidate) {
        if !self.note_remote_peer(&from) {
            return;
        }

        if self.remote_description.is_none() {
            debug!("buffering candidate until remote description is set");
            self.pending_candidates.push(candidate);
            return;
        }

        if let Err(e) = self.transport.add_candidate(candidate).await {
            warn!("failed to apply candidate, dropping it: {}", e);
        }
    }

    /// Locally generated candidate: trickled out immediately, never
    /// batched. Send failure is logged, not propagated.
    pub async fn handle_local_candidate(
        &self,
        candidate: NetworkCandidate,
        rendezvous: &RendezvousClient,
    ) {
        if let Err(e) = rendezvous
            .send_candidate(self.local_peer.clone(), candidate)
            .await
        {
            warn!("failed to trickle candidate: {}", e);
        }
    }

    async fn flush_pending_candidates(&mut self) {
        if self.pending_candidates.is_empty() {
            return;
        }
        debug!("flushing {} buffered candidates", self.pending_candidates.len());
        for candidate in self.pending_candidates.drain(..) {
            if let Err(e) = self.transport.add_candidate(candidate).await {
                warn!("failed to apply buffered candidate, dropping it: {}", e);
            }
        }
    }

    /// Two-party constraint: the first counterpart we hear from is the
    /// remote participant; traffic from anyone else is ignored.
    fn note_remote_peer(&mut self, from: &PeerId) -> bool {
        match &self.remote_peer {
            None => {
                self.remote_peer = Some(from.clone());
                true
            }
            Some(remote) if remote == from => true,
            Some(remote) => {
                warn!("ignoring message from third peer {} (remote is {})", from, remote);
                false
            }
        }
    }

    fn record_local(&mut self, description: SessionDescription) -> Result<(), NegotiationError> {
        if self.local_description.is_some() {
            return Err(NegotiationError::DescriptionAlreadySet {
                kind: description.kind,
            });
        }
        self.local_description = Some(description);
        Ok(())
    }

    fn record_remote(&mut self, description: SessionDescription) -> Result<(), NegotiationError> {
        if self.remote_description.is_some() {
            return Err(NegotiationError::DescriptionAlreadySet {
                kind: description.kind,
            });
        }
        self.remote_description = Some(description);
        Ok(())
    }
}
