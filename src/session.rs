//! The turn state machine driving one live connection.
//!
//! After the READY handshake both peers run the identical machine; the
//! only asymmetry is that the host sends the first BOMB. The protocol is
//! strictly synchronous request/reply: there is never more than one
//! unanswered BOMB, and STAT is only ever sent as the immediate reply to
//! one. STAT carries no coordinate, so the last bomb we sent is kept to
//! correlate the reply.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::Board;
use crate::common::{BoardError, Coord, ShotOutcome};
use crate::config::FLEET_CELLS;
use crate::player::Player;
use crate::transport::Transport;
use crate::wire::{Message, MessageKind, WireError};

/// Which side of the connection this session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Listened and accepted the connection; sends the first BOMB.
    Host,
    /// Connected out; receives the first BOMB.
    Guest,
}

impl Role {
    pub fn moves_first(self) -> bool {
        matches!(self, Role::Host)
    }
}

/// Receiving states of the turn machine. Local placement happens before
/// a session exists: a `Session` is built from an already-placed board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Our READY is out; nothing but the peer's READY may follow.
    AwaitPeerReady,
    /// Our turn to choose and send a bomb; we are not reading.
    TurnIdle,
    /// Peer's turn; the next game message must be a BOMB.
    AwaitPeerBomb,
    /// Our BOMB is out; the next game message must be its STAT.
    AwaitStatReply,
    /// Session over, no further messages.
    Terminated,
}

/// How a received message kind relates to the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// The one message kind this state is waiting for.
    Expected,
    /// SUNK/END after the handshake: logged, no reply, no turn change.
    Advisory,
    /// QUIT, acceptable in every state.
    PeerQuit,
    /// Anything else: fatal protocol violation.
    Violation,
}

impl TurnState {
    /// Pure classification of an inbound message kind. Exactly one kind
    /// is `Expected` per receiving state; QUIT is acceptable everywhere;
    /// the advisory kinds only once the handshake barrier has passed.
    pub fn classify(self, kind: MessageKind) -> Acceptance {
        use MessageKind::*;
        match (self, kind) {
            (_, Quit) => Acceptance::PeerQuit,
            (TurnState::AwaitPeerReady, Ready) => Acceptance::Expected,
            (TurnState::AwaitPeerBomb, Bomb) => Acceptance::Expected,
            (TurnState::AwaitStatReply, Stat) => Acceptance::Expected,
            (TurnState::AwaitPeerBomb | TurnState::AwaitStatReply, Sunk | End) => {
                Acceptance::Advisory
            }
            _ => Acceptance::Violation,
        }
    }
}

/// How a session ended. Only `SessionError` values are errors; a peer
/// leaving is a normal result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Peer's fleet eliminated.
    Victory,
    /// Our fleet eliminated.
    Defeat,
    /// Peer sent QUIT.
    PeerQuit,
    /// We were interrupted and sent QUIT.
    LocalQuit,
}

impl core::fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SessionOutcome::Victory => write!(f, "you sank the entire enemy fleet"),
            SessionOutcome::Defeat => write!(f, "your fleet was destroyed"),
            SessionOutcome::PeerQuit => write!(f, "peer left the game"),
            SessionOutcome::LocalQuit => write!(f, "game abandoned"),
        }
    }
}

/// Fatal session failures. Each one tears the session down after a
/// best-effort QUIT to the peer; there is no resync, because the wire
/// format has no frame boundary to resynchronize on.
#[derive(Debug)]
pub enum SessionError {
    /// Read or write failure on the transport.
    Transport(anyhow::Error),
    /// Peer sent bytes that do not decode.
    Malformed(WireError),
    /// Well-formed message in the wrong state.
    Unexpected { state: TurnState, got: MessageKind },
    /// Our own board state broke an invariant.
    Internal(BoardError),
}

impl core::fmt::Display for SessionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SessionError::Transport(e) => write!(f, "transport failure: {}", e),
            SessionError::Malformed(e) => write!(f, "malformed message: {}", e),
            SessionError::Unexpected { state, got } => {
                write!(f, "unexpected {:?} while in {:?}", got, state)
            }
            SessionError::Internal(e) => write!(f, "internal board error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

const HIT_TAUNTS: [&str; 4] = [
    "Ouch, direct hit.",
    "You got a piece of one.",
    "Lucky shot, sailor.",
    "That one will buff out.",
];

const MISS_TAUNTS: [&str; 4] = [
    "Splash, nothing there.",
    "Not even close.",
    "The fish send their regards.",
    "Wide of the mark.",
];

fn taunt(rng: &mut SmallRng, hit: bool) -> &'static str {
    let pool: &[&'static str] = if hit { &HIT_TAUNTS } else { &MISS_TAUNTS };
    pool[rng.random_range(0..pool.len())]
}

enum Inbound {
    Msg(Message),
    Interrupted,
}

/// One live connection: board, player front end, transport, and the
/// turn cursor, owned together so no state leaks across functions.
pub struct Session<T: Transport> {
    role: Role,
    board: Board,
    player: Box<dyn Player + Send>,
    transport: T,
    state: TurnState,
    last_bomb: Option<Coord>,
    peer_commitment: Option<u16>,
    enemy_cells_left: usize,
}

impl<T: Transport> Session<T> {
    /// Build a session from an already-placed board. The transport must
    /// be connected; the handshake has not happened yet.
    pub fn new(role: Role, board: Board, player: Box<dyn Player + Send>, transport: T) -> Self {
        Self {
            role,
            board,
            player,
            transport,
            state: TurnState::AwaitPeerReady,
            last_bomb: None,
            peer_commitment: None,
            enemy_cells_left: FLEET_CELLS,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Peer commitment received during the handshake, for sanity
    /// display; never verified beyond equality with itself.
    pub fn peer_commitment(&self) -> Option<u16> {
        self.peer_commitment
    }

    /// Enemy fleet cells not yet confirmed hit.
    pub fn enemy_cells_remaining(&self) -> usize {
        self.enemy_cells_left
    }

    /// Run the session to completion: handshake, then the bomb/status
    /// loop until a terminal message or a fatal fault.
    pub async fn run(&mut self, rng: &mut SmallRng) -> Result<SessionOutcome, SessionError> {
        if let Some(outcome) = self.handshake().await? {
            return Ok(outcome);
        }

        let mut my_turn = self.role.moves_first();
        loop {
            let outcome = if my_turn {
                self.bombing_turn(rng).await?
            } else {
                self.defending_turn(rng).await?
            };
            if let Some(outcome) = outcome {
                return Ok(outcome);
            }
            my_turn = !my_turn;
        }
    }

    /// Exchange READY messages. A pure barrier: nothing else is valid
    /// until both commitments have crossed the wire. Returns `Some`
    /// when the session ended during the handshake.
    async fn handshake(&mut self) -> Result<Option<SessionOutcome>, SessionError> {
        let commitment = self.board.commitment();
        log::info!("fleet placed, commitment {:05}", commitment);
        self.send(Message::Ready { commitment }).await?;
        self.state = TurnState::AwaitPeerReady;
        loop {
            let msg = match self.recv().await? {
                Inbound::Interrupted => return Ok(Some(self.local_quit().await)),
                Inbound::Msg(msg) => msg,
            };
            match self.state.classify(msg.kind()) {
                Acceptance::Expected => {
                    if let Message::Ready { commitment } = msg {
                        log::info!("peer ready, commitment {:05}", commitment);
                        self.peer_commitment = Some(commitment);
                        return Ok(None);
                    }
                }
                Acceptance::PeerQuit => return Ok(Some(self.peer_quit())),
                _ => return Err(self.violation(msg.kind()).await),
            }
        }
    }

    /// Our turn: send one BOMB, then block until its STAT arrives.
    /// Returns `Some` when the session reached a terminal outcome.
    async fn bombing_turn(
        &mut self,
        rng: &mut SmallRng,
    ) -> Result<Option<SessionOutcome>, SessionError> {
        self.state = TurnState::TurnIdle;
        let target = self.player.select_target(rng, &self.board);
        log::info!("bombing {}", target);
        self.last_bomb = Some(target);
        self.send(Message::Bomb { target }).await?;
        self.state = TurnState::AwaitStatReply;

        loop {
            let msg = match self.recv().await? {
                Inbound::Interrupted => return Ok(Some(self.local_quit().await)),
                Inbound::Msg(msg) => msg,
            };
            match self.state.classify(msg.kind()) {
                Acceptance::PeerQuit => return Ok(Some(self.peer_quit())),
                Acceptance::Advisory => {
                    if let Some(outcome) = self.advisory(msg) {
                        return Ok(Some(outcome));
                    }
                }
                Acceptance::Expected => {
                    if let Message::Stat { hit, text } = msg {
                        self.resolve_stat(hit, &text)?;
                        return Ok(None);
                    }
                }
                Acceptance::Violation => return Err(self.violation(msg.kind()).await),
            }
        }
    }

    /// Peer's turn: block for its BOMB, answer with exactly one STAT.
    async fn defending_turn(
        &mut self,
        rng: &mut SmallRng,
    ) -> Result<Option<SessionOutcome>, SessionError> {
        self.state = TurnState::AwaitPeerBomb;
        loop {
            let msg = match self.recv().await? {
                Inbound::Interrupted => return Ok(Some(self.local_quit().await)),
                Inbound::Msg(msg) => msg,
            };
            match self.state.classify(msg.kind()) {
                Acceptance::PeerQuit => return Ok(Some(self.peer_quit())),
                Acceptance::Advisory => {
                    if let Some(outcome) = self.advisory(msg) {
                        return Ok(Some(outcome));
                    }
                }
                Acceptance::Expected => {
                    if let Message::Bomb { target } = msg {
                        return self.answer_bomb(rng, target).await;
                    }
                }
                Acceptance::Violation => return Err(self.violation(msg.kind()).await),
            }
        }
    }

    /// Apply a peer bomb and reply. The reply is sent before anything
    /// else is processed; STAT is never sent unprompted.
    async fn answer_bomb(
        &mut self,
        rng: &mut SmallRng,
        target: Coord,
    ) -> Result<Option<SessionOutcome>, SessionError> {
        let outcome = self
            .board
            .receive_bomb(target)
            .map_err(SessionError::Internal)?;
        log::info!("peer bombed {}: {:?}", target, outcome);
        self.player.incoming_bomb(target, outcome);

        let hit = outcome.is_hit();
        let text = taunt(rng, hit);
        self.send(Message::Stat { hit, text: text.into() }).await?;

        if let ShotOutcome::Sunk(name) = outcome {
            log::info!("our {} was destroyed", name);
            self.send(Message::Sunk { text: format!("You sank my {}!", name) })
                .await?;
            if self.board.all_sunk() {
                self.send(Message::End).await?;
                self.state = TurnState::Terminated;
                return Ok(Some(SessionOutcome::Defeat));
            }
        }
        Ok(None)
    }

    /// Record the STAT reply for our outstanding bomb.
    fn resolve_stat(&mut self, hit: bool, text: &str) -> Result<(), SessionError> {
        // a STAT with no bomb outstanding is unanswerable
        let target = self.last_bomb.take().ok_or(SessionError::Unexpected {
            state: TurnState::AwaitStatReply,
            got: MessageKind::Stat,
        })?;
        self.board
            .record_shot(target, hit)
            .map_err(SessionError::Internal)?;
        if hit {
            self.enemy_cells_left = self.enemy_cells_left.saturating_sub(1);
            if self.enemy_cells_left == 0 {
                log::info!("every enemy fleet cell accounted for");
            }
        }
        if !text.is_empty() {
            log::info!("peer says: {}", text);
        }
        self.player.shot_resolved(target, hit);
        Ok(())
    }

    /// Handle an advisory SUNK/END. Returns a terminal outcome for END.
    fn advisory(&mut self, msg: Message) -> Option<SessionOutcome> {
        match msg {
            Message::Sunk { text } => {
                log::info!("enemy ship destroyed: {}", text);
                None
            }
            Message::End => {
                self.state = TurnState::Terminated;
                Some(SessionOutcome::Victory)
            }
            _ => None,
        }
    }

    fn peer_quit(&mut self) -> SessionOutcome {
        log::info!("peer left the game");
        self.state = TurnState::Terminated;
        SessionOutcome::PeerQuit
    }

    async fn local_quit(&mut self) -> SessionOutcome {
        log::info!("interrupted, notifying peer");
        self.quit_best_effort().await;
        self.state = TurnState::Terminated;
        SessionOutcome::LocalQuit
    }

    /// Fatal protocol violation: best-effort QUIT, then the error.
    async fn violation(&mut self, got: MessageKind) -> SessionError {
        let state = self.state;
        log::error!("protocol violation: {:?} while in {:?}", got, state);
        self.quit_best_effort().await;
        self.state = TurnState::Terminated;
        SessionError::Unexpected { state, got }
    }

    async fn quit_best_effort(&mut self) {
        if let Err(e) = self.transport.send(Message::Quit).await {
            log::debug!("could not notify peer: {}", e);
        }
    }

    async fn send(&mut self, msg: Message) -> Result<(), SessionError> {
        match self.transport.send(msg).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.state = TurnState::Terminated;
                match e.downcast::<WireError>() {
                    Ok(wire) => Err(SessionError::Malformed(wire)),
                    Err(other) => Err(SessionError::Transport(other)),
                }
            }
        }
    }

    /// Receive one message, letting Ctrl-C interrupt the blocking read.
    /// A malformed inbound message tears the session down here, after a
    /// best-effort QUIT.
    async fn recv(&mut self) -> Result<Inbound, SessionError> {
        let received = tokio::select! {
            received = self.transport.recv() => received,
            _ = tokio::signal::ctrl_c() => return Ok(Inbound::Interrupted),
        };
        match received {
            Ok(msg) => Ok(Inbound::Msg(msg)),
            Err(e) => match e.downcast::<WireError>() {
                Ok(wire) => {
                    log::error!("malformed message from peer: {}", wire);
                    self.quit_best_effort().await;
                    self.state = TurnState::Terminated;
                    Err(SessionError::Malformed(wire))
                }
                Err(other) => {
                    self.state = TurnState::Terminated;
                    Err(SessionError::Transport(other))
                }
            },
        }
    }
}
