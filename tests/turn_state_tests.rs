use armada::{Acceptance, MessageKind, TurnState};

const ALL_KINDS: [MessageKind; 6] = [
    MessageKind::Ready,
    MessageKind::Bomb,
    MessageKind::Stat,
    MessageKind::Quit,
    MessageKind::Sunk,
    MessageKind::End,
];

const ALL_STATES: [TurnState; 5] = [
    TurnState::AwaitPeerReady,
    TurnState::TurnIdle,
    TurnState::AwaitPeerBomb,
    TurnState::AwaitStatReply,
    TurnState::Terminated,
];

#[test]
fn quit_is_acceptable_everywhere() {
    for state in ALL_STATES {
        assert_eq!(state.classify(MessageKind::Quit), Acceptance::PeerQuit);
    }
}

#[test]
fn each_receiving_state_expects_exactly_one_kind() {
    let expectations = [
        (TurnState::AwaitPeerReady, MessageKind::Ready),
        (TurnState::AwaitPeerBomb, MessageKind::Bomb),
        (TurnState::AwaitStatReply, MessageKind::Stat),
    ];
    for (state, expected) in expectations {
        let matches: Vec<MessageKind> = ALL_KINDS
            .iter()
            .copied()
            .filter(|k| state.classify(*k) == Acceptance::Expected)
            .collect();
        assert_eq!(matches, vec![expected], "state {:?}", state);
    }
}

#[test]
fn non_receiving_states_expect_nothing() {
    for state in [TurnState::TurnIdle, TurnState::Terminated] {
        for kind in ALL_KINDS {
            assert_ne!(state.classify(kind), Acceptance::Expected, "{:?}/{:?}", state, kind);
        }
    }
}

#[test]
fn advisories_only_after_the_handshake() {
    for kind in [MessageKind::Sunk, MessageKind::End] {
        assert_eq!(
            TurnState::AwaitPeerReady.classify(kind),
            Acceptance::Violation,
            "{:?} before READY must be a violation",
            kind
        );
        assert_eq!(TurnState::AwaitPeerBomb.classify(kind), Acceptance::Advisory);
        assert_eq!(TurnState::AwaitStatReply.classify(kind), Acceptance::Advisory);
    }
}

#[test]
fn game_messages_before_handshake_are_violations() {
    assert_eq!(
        TurnState::AwaitPeerReady.classify(MessageKind::Bomb),
        Acceptance::Violation
    );
    assert_eq!(
        TurnState::AwaitPeerReady.classify(MessageKind::Stat),
        Acceptance::Violation
    );
}

#[test]
fn wrong_turn_messages_are_violations() {
    // a second READY after the handshake
    assert_eq!(
        TurnState::AwaitPeerBomb.classify(MessageKind::Ready),
        Acceptance::Violation
    );
    // a BOMB while we are owed a STAT
    assert_eq!(
        TurnState::AwaitStatReply.classify(MessageKind::Bomb),
        Acceptance::Violation
    );
    // a STAT we never asked for
    assert_eq!(
        TurnState::AwaitPeerBomb.classify(MessageKind::Stat),
        Acceptance::Violation
    );
}
