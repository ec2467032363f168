use crate::utils::{harness, no_tracks, peer, tracks};
use tandem_call::{CallState, TransportEvent};
use tandem_core::{RoomId, SessionDescription, SignalMessage};

/// Active requires both descriptions AND an observed non-empty remote
/// track set; neither alone is enough, and either arrival order works.
#[tokio::test]
async fn descriptions_alone_do_not_activate() {
    let mut h = harness();
    let room = RoomId::from("r1");
    h.start_as_creator(peer(1), &room).await;

    h.deliver(SignalMessage::Offer {
        room: room.clone(),
        from: peer(2),
        description: SessionDescription::offer("remote-offer"),
    })
    .await;

    assert_eq!(h.session.state(), CallState::Negotiating);
}

#[tokio::test]
async fn tracks_alone_do_not_activate() {
    let mut h = harness();
    let room = RoomId::from("r1");
    h.start_as_creator(peer(1), &room).await;

    h.event(TransportEvent::RemoteTracksChanged(tracks())).await;

    assert_eq!(h.session.state(), CallState::Negotiating);
    // the sink is still bound eagerly, activation just waits
    assert_eq!(h.sink.bound().len(), 1);
}

#[tokio::test]
async fn tracks_then_descriptions_activates() {
    let mut h = harness();
    let room = RoomId::from("r1");
    h.start_as_creator(peer(1), &room).await;

    h.event(TransportEvent::RemoteTracksChanged(tracks())).await;
    h.deliver(SignalMessage::Offer {
        room: room.clone(),
        from: peer(2),
        description: SessionDescription::offer("remote-offer"),
    })
    .await;

    assert_eq!(h.session.state(), CallState::Active);
}

#[tokio::test]
async fn empty_track_set_does_not_bind_or_activate() {
    let mut h = harness();
    let room = RoomId::from("r1");
    h.start_as_creator(peer(1), &room).await;

    h.deliver(SignalMessage::Offer {
        room: room.clone(),
        from: peer(2),
        description: SessionDescription::offer("remote-offer"),
    })
    .await;
    h.event(TransportEvent::RemoteTracksChanged(no_tracks())).await;

    assert_eq!(h.session.state(), CallState::Negotiating);
    assert!(h.sink.bound().is_empty());
}

#[tokio::test]
async fn remote_stopping_all_tracks_ends_the_active_session() {
    let mut h = harness();
    let room = RoomId::from("r1");
    h.connect_as_creator(peer(1), peer(2), &room).await;

    h.event(TransportEvent::RemoteTracksChanged(no_tracks())).await;

    assert_eq!(h.session.state(), CallState::Idle);
    assert_eq!(h.sink.clear_count(), 1);
    // teardown ran: local tracks stopped, room left, transport closed
    let source = h.devices.last_source().expect("source acquired");
    assert_eq!(source.lock().unwrap().stop_count, 1);
    assert_eq!(h.channel.leaves().len(), 1);
    assert_eq!(h.transport().close_count(), 1);
}
