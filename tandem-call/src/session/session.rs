use crate::config::SessionConfig;
use crate::error::NegotiationError;
use crate::media::{LocalMediaManager, MediaDevices};
use crate::negotiation::NegotiationEngine;
use crate::rendezvous::{RendezvousClient, SignalingChannel};
use crate::session::{BinderOutcome, CallCommand, CallState, FailureReason, MediaSink, RemoteSinkBinder};
use crate::transport::{PeerTransport, TransportEvent, TransportFactory, TransportState};
use std::sync::Arc;
use tandem_core::{PeerId, RoomId, SignalMessage};
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CallRole {
    /// Created the room; waits for the joiner's offer and answers it.
    Creator,
    /// Joined an existing room; sends the first offer on join
    /// confirmation.
    Joiner,
}

/// Handles the outside world holds on a running session: user commands,
/// the inbound signaling stream, and the published call state.
pub struct SessionHandle {
    pub commands: mpsc::Sender<CallCommand>,
    pub signals: mpsc::Sender<SignalMessage>,
    pub state: watch::Receiver<CallState>,
}

/// Everything owned by the current call attempt. Replaced wholesale on
/// teardown; a new session never reuses negotiation state.
struct ActiveCall {
    role: CallRole,
    rendezvous: RendezvousClient,
    media: LocalMediaManager,
    transport: Arc<dyn PeerTransport>,
    negotiation: NegotiationEngine,
    binder: RemoteSinkBinder,
    /// Negotiation deadline; set on entering Negotiating, cleared on
    /// Active.
    deadline: Option<Instant>,
}

/// Single-threaded, event-driven call session.
///
/// All work is a reaction to one of three inflows (user commands,
/// signaling messages, transport events) plus the negotiation deadline,
/// dispatched by one `select!` loop. Each handler runs to completion
/// before the next event is taken, so handlers never interleave
/// mid-step.
pub struct CallSession {
    config: SessionConfig,
    channel: Arc<dyn SignalingChannel>,
    devices: Arc<dyn MediaDevices>,
    transports: Arc<dyn TransportFactory>,
    sink: Arc<dyn MediaSink>,

    local_peer: Option<PeerId>,
    state: CallState,
    state_tx: watch::Sender<CallState>,
    last_failure: Option<FailureReason>,
    signaling_closed: bool,

    command_rx: mpsc::Receiver<CallCommand>,
    signal_rx: mpsc::Receiver<SignalMessage>,
    // Replaced per session so a stale transport cannot feed events into
    // the next call.
    transport_tx: mpsc::Sender<TransportEvent>,
    transport_rx: mpsc::Receiver<TransportEvent>,

    call: Option<ActiveCall>,
}

impl CallSession {
    pub fn new(
        config: SessionConfig,
        channel: Arc<dyn SignalingChannel>,
        devices: Arc<dyn MediaDevices>,
        transports: Arc<dyn TransportFactory>,
        sink: Arc<dyn MediaSink>,
    ) -> (Self, SessionHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (signal_tx, signal_rx) = mpsc::channel(64);
        let (transport_tx, transport_rx) = mpsc::channel(64);
        let (state_tx, state_rx) = watch::channel(CallState::Idle);

        let session = Self {
            config,
            channel,
            devices,
            transports,
            sink,
            local_peer: None,
            state: CallState::Idle,
            state_tx,
            last_failure: None,
            signaling_closed: false,
            command_rx,
            signal_rx,
            transport_tx,
            transport_rx,
            call: None,
        };

        let handle = SessionHandle {
            commands: command_tx,
            signals: signal_tx,
            state: state_rx,
        };

        (session, handle)
    }

    pub fn state(&self) -> CallState {
        self.state
    }

    pub fn last_failure(&self) -> Option<FailureReason> {
        self.last_failure
    }

    pub fn role(&self) -> Option<CallRole> {
        self.call.as_ref().map(|call| call.role)
    }

    /// Event loop. Exits when the command channel closes.
    pub async fn run(mut self) {
        info!("call session loop started");

        loop {
            let deadline = self.call.as_ref().and_then(|call| call.deadline);

            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(cmd) => self.handle_command(cmd).await,
                        None => {
                            info!("command channel closed, shutting down session");
                            break;
                        }
                    }
                }

                msg = self.signal_rx.recv(), if !self.signaling_closed => {
                    match msg {
                        Some(msg) => self.handle_signal(msg).await,
                        None => self.handle_signaling_closed().await,
                    }
                }

                evt = self.transport_rx.recv() => {
                    if let Some(evt) = evt {
                        self.handle_transport_event(evt).await;
                    }
                }

                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)),
                    if deadline.is_some() =>
                {
                    self.handle_negotiation_timeout().await;
                }
            }
        }

        self.teardown().await;
        info!("call session loop finished");
    }

    pub async fn handle_command(&mut self, command: CallCommand) {
        match command {
            CallCommand::CreateRoom => self.start_call(CallRole::Creator, None).await,
            CallCommand::JoinRoom(room) => self.start_call(CallRole::Joiner, Some(room)).await,
            CallCommand::HangUp => self.end_call().await,
            CallCommand::SetAudioEnabled(enabled) => {
                if let Some(call) = &self.call {
                    call.media.set_audio_enabled(enabled);
                }
            }
            CallCommand::SetVideoEnabled(enabled) => {
                if let Some(call) = &self.call {
                    call.media.set_video_enabled(enabled);
                }
            }
        }
    }

    pub async fn handle_signal(&mut self, message: SignalMessage) {
        if let SignalMessage::Welcome { peer } = &message {
            info!("signaling welcome, local peer {}", peer);
            self.local_peer = Some(peer.clone());
            return;
        }

        let accepted = match &self.call {
            Some(call) => call.rendezvous.accepts(&message),
            None => {
                debug!("no active call, ignoring {:?}", message.room());
                return;
            }
        };
        if !accepted {
            warn!("ignoring message for foreign room {:?}", message.room());
            return;
        }

        match message {
            SignalMessage::Created { room } => {
                info!("room {} ready", room);
                if let Some(call) = self.call.as_mut() {
                    call.rendezvous.bind_room(room);
                }
            }

            SignalMessage::Joined { room, peer } => {
                let own_join = Some(&peer) == self.local_peer.as_ref();
                if own_join {
                    // the joiner always sends the first offer
                    info!("joined room {}, starting negotiation", room);
                    let result = match self.call.as_mut() {
                        Some(call) => call.negotiation.send_offer(&call.rendezvous).await,
                        None => return,
                    };
                    if let Err(e) = result {
                        self.fail_negotiation(e).await;
                    }
                } else {
                    info!("peer {} joined room {}", peer, room);
                }
            }

            SignalMessage::Offer {
                from, description, ..
            } => {
                let result = match self.call.as_mut() {
                    Some(call) => {
                        call.negotiation
                            .handle_offer(from, description, &call.rendezvous)
                            .await
                    }
                    None => return,
                };
                match result {
                    Ok(()) => self.maybe_activate(),
                    Err(e) => self.fail_negotiation(e).await,
                }
            }

            SignalMessage::Answer {
                from, description, ..
            } => {
                let result = match self.call.as_mut() {
                    Some(call) => call.negotiation.handle_answer(from, description).await,
                    None => return,
                };
                match result {
                    Ok(()) => self.maybe_activate(),
                    Err(e) => self.fail_negotiation(e).await,
                }
            }

            SignalMessage::Candidate {
                from, candidate, ..
            } => {
                // never fatal, the engine drops what it cannot apply
                if let Some(call) = self.call.as_mut() {
                    call.negotiation
                        .handle_remote_candidate(from, candidate)
                        .await;
                }
            }

            SignalMessage::PeerLeft { room } => {
                info!("peer left room {}", room);
                match self.state {
                    CallState::Active => self.end_call().await,
                    CallState::Negotiating => self.fail(FailureReason::PeerLeft).await,
                    _ => {}
                }
            }

            // client -> server kinds, not expected on the inbound stream
            SignalMessage::Create
            | SignalMessage::Join { .. }
            | SignalMessage::Leave { .. }
            | SignalMessage::Welcome { .. } => {}
        }
    }

    pub async fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::CandidateGenerated(candidate) => {
                if let Some(call) = &self.call {
                    call.negotiation
                        .handle_local_candidate(candidate, &call.rendezvous)
                        .await;
                }
            }

            TransportEvent::RemoteTracksChanged(tracks) => {
                let outcome = match self.call.as_mut() {
                    Some(call) => call.binder.on_remote_tracks(tracks),
                    None => return,
                };
                match outcome {
                    BinderOutcome::Attached => self.maybe_activate(),
                    BinderOutcome::Detached => {
                        if self.state == CallState::Active {
                            self.end_call().await;
                        }
                    }
                    BinderOutcome::Ignored => {}
                }
            }

            TransportEvent::ConnectionStateChanged(state) => {
                debug!("transport connection state: {:?}", state);
                if matches!(
                    state,
                    TransportState::Disconnected | TransportState::Failed | TransportState::Closed
                ) {
                    match self.state {
                        CallState::Active => self.end_call().await,
                        CallState::Negotiating | CallState::AwaitingMedia => {
                            self.fail(FailureReason::TransportFailed).await;
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    pub async fn handle_negotiation_timeout(&mut self) {
        if self.state == CallState::Negotiating {
            warn!("negotiation timed out");
            self.fail(FailureReason::NegotiationTimeout).await;
        } else if let Some(call) = self.call.as_mut() {
            call.deadline = None;
        }
    }

    /// The inbound signaling stream ended. An established media session
    /// keeps flowing peer-to-peer; anything earlier cannot complete.
    pub async fn handle_signaling_closed(&mut self) {
        self.signaling_closed = true;
        match self.state {
            CallState::Active => warn!("signaling channel closed, media session continues"),
            CallState::Negotiating | CallState::AwaitingMedia => {
                error!("signaling channel closed mid-negotiation");
                self.fail(FailureReason::SignalingUnavailable).await;
            }
            _ => warn!("signaling channel closed"),
        }
    }

    async fn start_call(&mut self, role: CallRole, room: Option<RoomId>) {
        // one active session per client: replace the previous one
        // wholesale before starting
        if self.call.is_some() {
            self.end_call().await;
        }
        self.last_failure = None;

        let Some(local_peer) = self.local_peer.clone() else {
            warn!("create/join before signaling welcome, channel not ready");
            self.fail(FailureReason::SignalingUnavailable).await;
            return;
        };

        info!("starting call as {:?}", role);
        self.transition(CallState::AwaitingMedia);

        let mut media = LocalMediaManager::new(self.devices.clone());
        if let Err(e) = media.acquire(self.config.constraints).await {
            // zero signaling messages have been sent on this path
            error!("local media acquisition failed: {}", e);
            self.fail(FailureReason::MediaUnavailable).await;
            return;
        }
        let Some(source) = media.source() else {
            self.fail(FailureReason::MediaUnavailable).await;
            return;
        };

        self.transition(CallState::Negotiating);

        let (transport_tx, transport_rx) = mpsc::channel(64);
        self.transport_tx = transport_tx.clone();
        self.transport_rx = transport_rx;

        let transport = match self.transports.create(source, transport_tx).await {
            Ok(transport) => transport,
            Err(e) => {
                error!("failed to create peer transport: {}", e);
                media.release();
                self.fail(FailureReason::TransportFailed).await;
                return;
            }
        };

        let mut rendezvous = RendezvousClient::new(self.channel.clone());
        let sent = match (role, room) {
            (CallRole::Creator, _) => rendezvous.create_room().await,
            (CallRole::Joiner, Some(room)) => rendezvous.join_room(room).await,
            (CallRole::Joiner, None) => {
                // unreachable by construction of CallCommand
                warn!("join without a room id");
                return;
            }
        };
        if let Err(e) = sent {
            error!("signaling send failed: {}", e);
            media.release();
            transport.close().await;
            self.fail(FailureReason::SignalingUnavailable).await;
            return;
        }

        let negotiation = NegotiationEngine::new(local_peer, transport.clone());
        self.call = Some(ActiveCall {
            role,
            rendezvous,
            media,
            transport,
            negotiation,
            binder: RemoteSinkBinder::new(self.sink.clone()),
            deadline: Some(Instant::now() + self.config.negotiation_timeout),
        });
    }

    /// Negotiating -> Active once both descriptions are set and a
    /// non-empty remote track set has been observed, in either order.
    fn maybe_activate(&mut self) {
        let ready = self
            .call
            .as_ref()
            .is_some_and(|call| call.negotiation.descriptions_complete() && call.binder.is_bound());

        if ready && self.state == CallState::Negotiating {
            if let Some(call) = self.call.as_mut() {
                call.deadline = None;
            }
            self.transition(CallState::Active);
        }
    }

    /// Explicit hang-up or remote-initiated end. Idempotent.
    async fn end_call(&mut self) {
        if self.call.is_none() && self.state == CallState::Idle {
            debug!("hang-up with no active call");
            return;
        }
        self.transition(CallState::Ending);
        self.teardown().await;
        self.transition(CallState::Idle);
    }

    async fn fail(&mut self, reason: FailureReason) {
        self.transition(CallState::Failed(reason));
        self.last_failure = Some(reason);
        self.teardown().await;
        // Failed is terminal for the session instance only; the machine
        // is ready for a fresh user action
        self.transition(CallState::Idle);
    }

    async fn fail_negotiation(&mut self, error: NegotiationError) {
        error!("negotiation failed: {}", error);
        let reason = match error {
            NegotiationError::Signaling(_) => FailureReason::SignalingUnavailable,
            NegotiationError::Transport(crate::error::TransportError::Disconnected) => {
                FailureReason::TransportFailed
            }
            _ => FailureReason::NegotiationRejected,
        };
        self.fail(reason).await;
    }

    /// Releases everything the call owned: local tracks, the transport,
    /// room membership, buffered candidates and negotiation state. Each
    /// step is idempotent and order-independent.
    async fn teardown(&mut self) {
        let Some(mut call) = self.call.take() else {
            return;
        };
        call.media.release();
        call.transport.close().await;
        call.rendezvous.leave().await;
        // negotiation state and buffered candidates drop with the call;
        // drain anything a stale transport managed to queue
        while self.transport_rx.try_recv().is_ok() {}
    }

    fn transition(&mut self, next: CallState) {
        if self.state == next {
            return;
        }
        if !self.state.may_enter(&next) {
            warn!(
                "illegal call state transition {} -> {}",
                self.state.label(),
                next.label()
            );
        }
        info!("call state {} -> {}", self.state.label(), next.label());
        self.state = next;
        let _ = self.state_tx.send(next);
    }
}
