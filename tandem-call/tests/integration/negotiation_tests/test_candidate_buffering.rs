use crate::utils::{harness, peer};
use tandem_call::CallState;
use tandem_core::{NetworkCandidate, RoomId, SessionDescription, SignalMessage};

fn candidate(n: u32) -> NetworkCandidate {
    NetworkCandidate::new(format!("candidate:{n} 1 UDP 2122252543 10.0.0.{n} 50000 typ host"))
}

#[tokio::test]
async fn candidates_before_remote_description_are_buffered_then_flushed_in_order() {
    let mut h = harness();
    let room = RoomId::from("r1");
    let remote = peer(2);
    h.start_as_creator(peer(1), &room).await;

    // trickle arrives ahead of the offer
    for n in 1..=3 {
        h.deliver(SignalMessage::Candidate {
            room: room.clone(),
            from: remote.clone(),
            candidate: candidate(n),
        })
        .await;
    }
    assert!(h.transport().applied_candidates().is_empty());

    h.deliver(SignalMessage::Offer {
        room: room.clone(),
        from: remote.clone(),
        description: SessionDescription::offer("remote-offer"),
    })
    .await;

    // flushed in arrival order, each exactly once
    assert_eq!(
        h.transport().applied_candidates(),
        vec![candidate(1), candidate(2), candidate(3)]
    );

    // a later candidate is applied immediately
    h.deliver(SignalMessage::Candidate {
        room: room.clone(),
        from: remote,
        candidate: candidate(4),
    })
    .await;
    assert_eq!(h.transport().applied_candidates().len(), 4);
}

#[tokio::test]
async fn candidate_application_failure_is_not_fatal() {
    let mut h = harness();
    let room = RoomId::from("r1");
    let remote = peer(2);
    h.start_as_creator(peer(1), &room).await;

    h.deliver(SignalMessage::Offer {
        room: room.clone(),
        from: remote.clone(),
        description: SessionDescription::offer("remote-offer"),
    })
    .await;

    h.transport().fail_candidates();
    h.deliver(SignalMessage::Candidate {
        room: room.clone(),
        from: remote,
        candidate: candidate(1),
    })
    .await;

    // dropped, session continues
    assert_eq!(h.session.state(), CallState::Negotiating);
    assert!(h.session.last_failure().is_none());
}

#[tokio::test]
async fn candidates_from_a_third_peer_are_ignored() {
    let mut h = harness();
    let room = RoomId::from("r1");
    h.start_as_creator(peer(1), &room).await;

    h.deliver(SignalMessage::Offer {
        room: room.clone(),
        from: peer(2),
        description: SessionDescription::offer("remote-offer"),
    })
    .await;

    h.deliver(SignalMessage::Candidate {
        room: room.clone(),
        from: peer(3),
        candidate: candidate(9),
    })
    .await;

    assert!(h.transport().applied_candidates().is_empty());
    assert_eq!(h.session.state(), CallState::Negotiating);
}
