//! Game controller sitting between the presentation and the search worker
//!
//! The session owns the board while no search is running and lends it to
//! the [`SearchWorker`] for the duration of a computer move. Presentation
//! code drives it with commands ([`GameSession::start_round`],
//! [`GameSession::human_select`], ...) and learns about progress only
//! through the [`GameEvent`] channel returned by [`GameSession::new`].

use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::board::{Board, Player};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::rules::GameOutcome;
use crate::worker::{SearchWorker, WorkerReply};

/// Who controls a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    Human,
    Computer,
}

/// Notifications for the presentation layer, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The board was cleared for a new round
    RoundStarted { a: PlayerKind, b: PlayerKind },
    MoveApplied { index: u8, by: Player },
    /// Always follows the `MoveApplied` that decided the game
    GameEnded(GameOutcome),
}

/// Closing message for a finished game, worded for the match-up
pub fn result_message(players: [PlayerKind; 2], outcome: GameOutcome) -> Option<&'static str> {
    use PlayerKind::{Computer, Human};

    let winner = match outcome {
        GameOutcome::Ongoing => return None,
        GameOutcome::Draw => return Some("Draw! Try again."),
        GameOutcome::Win(player) => player,
    };
    let message = match (players, winner) {
        ([Human, Human], Player::A) => "Player 1 wins!",
        ([Human, Human], Player::B) => "Player 2 wins!",
        ([Computer, Computer], Player::A) => "Computer 1 beat computer 2!",
        ([Computer, Computer], Player::B) => "Computer 2 beat computer 1!",
        ([Human, Computer], Player::A) | ([Computer, Human], Player::B) => "You beat the computer!",
        ([Human, Computer], Player::B) | ([Computer, Human], Player::A) => "The computer beat you!",
    };
    Some(message)
}

/// A game between two seats, each human or computer.
pub struct GameSession {
    /// `None` while lent to the worker
    board: Option<Board>,
    players: Option<[PlayerKind; 2]>,
    /// Seat the worker is searching for
    thinking_for: Option<Player>,
    worker: SearchWorker,
    events: Sender<GameEvent>,
}

impl GameSession {
    /// Create a session and the channel its events arrive on
    pub fn new(config: EngineConfig) -> Result<(Self, Receiver<GameEvent>)> {
        let (tx, rx) = channel();
        let session = Self {
            board: Some(Board::new()),
            players: None,
            thinking_for: None,
            worker: SearchWorker::spawn(config)?,
            events: tx,
        };
        Ok((session, rx))
    }

    /// Board as of the last event, `None` while a computer is thinking
    #[inline]
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    #[inline]
    pub fn players(&self) -> Option<[PlayerKind; 2]> {
        self.players
    }

    pub fn kind_of(&self, player: Player) -> Option<PlayerKind> {
        self.players.map(|[a, b]| match player {
            Player::A => a,
            Player::B => b,
        })
    }

    /// Check if a computer is currently thinking
    #[inline]
    pub fn is_thinking(&self) -> bool {
        self.worker.is_searching()
    }

    /// Player to move, whether or not the board is lent out
    pub fn to_move(&self) -> Option<Player> {
        self.players?;
        self.thinking_for
            .or_else(|| self.board.as_ref().map(Board::active_player))
    }

    /// Result of the current position; a position being searched is ongoing
    pub fn outcome(&self) -> GameOutcome {
        self.board
            .as_ref()
            .map_or(GameOutcome::Ongoing, Board::outcome)
    }

    /// Check if it's a human's turn in a live round
    pub fn is_human_turn(&self) -> bool {
        if self.is_thinking() || self.outcome().is_over() {
            return false;
        }
        self.to_move().and_then(|player| self.kind_of(player)) == Some(PlayerKind::Human)
    }

    /// Begin a round on an empty board. A computer in seat A starts thinking
    /// right away.
    pub fn start_round(&mut self, a: PlayerKind, b: PlayerKind) -> Result<()> {
        if let Some(reply) = self.worker.stop() {
            debug!("discarding reply from previous round: {reply:?}");
        }
        self.thinking_for = None;
        self.board = Some(Board::new());
        self.players = Some([a, b]);

        info!("round started: A={a:?} B={b:?}");
        self.emit(GameEvent::RoundStarted { a, b });
        self.schedule_computer()
    }

    /// Play `index` for the human to move.
    ///
    /// Rejected (with the board untouched) when no round is running, the
    /// game is over, a computer is to move, or the cell is not empty.
    pub fn human_select(&mut self, index: usize) -> Result<()> {
        if self.players.is_none() {
            return Err(Error::NoRoundInProgress);
        }
        if let Some(to_move) = self.thinking_for {
            return Err(Error::NotHumanTurn { to_move });
        }
        let board = self.board.as_ref().ok_or(Error::WorkerUnavailable)?;
        if board.outcome().is_over() {
            return Err(Error::GameOver);
        }

        let mover = board.active_player();
        if self.kind_of(mover) != Some(PlayerKind::Human) {
            return Err(Error::NotHumanTurn { to_move: mover });
        }

        self.board
            .as_mut()
            .ok_or(Error::WorkerUnavailable)?
            .apply(index, mover)?;
        info!("{mover:?} (human) plays {index}");
        self.emit(GameEvent::MoveApplied {
            index: index as u8,
            by: mover,
        });
        self.after_move()
    }

    /// Handle any finished computer move. Never blocks.
    ///
    /// Returns `true` if a reply was processed.
    pub fn poll(&mut self) -> bool {
        match self.worker.try_recv() {
            Some(reply) => {
                self.absorb(reply, true);
                true
            }
            None => false,
        }
    }

    /// Like [`poll`](Self::poll), but waits up to `timeout` for a reply
    pub fn wait(&mut self, timeout: Duration) -> bool {
        match self.worker.recv_timeout(timeout) {
            Some(reply) => {
                self.absorb(reply, true);
                true
            }
            None => false,
        }
    }

    /// Cancel the computer's search and take the board back.
    ///
    /// No further computer moves are requested until the next round.
    pub fn request_stop(&mut self) {
        if let Some(reply) = self.worker.stop() {
            self.absorb(reply, false);
        }
    }

    /// Abandon the current round and start over with the same seats
    pub fn request_reset(&mut self) -> Result<()> {
        let [a, b] = self.players.ok_or(Error::NoRoundInProgress)?;
        self.board = Some(self.worker.reset());
        self.thinking_for = None;
        info!("round reset");
        self.start_round(a, b)
    }

    fn emit(&self, event: GameEvent) {
        // The receiver may have been dropped
        let _ = self.events.send(event);
    }

    /// End the game or pass the turn after a move
    fn after_move(&mut self) -> Result<()> {
        let outcome = self.outcome();
        if outcome.is_over() {
            info!("game ended: {outcome:?}");
            self.emit(GameEvent::GameEnded(outcome));
            return Ok(());
        }
        self.schedule_computer()
    }

    /// Lend the board to the worker if a computer is to move
    fn schedule_computer(&mut self) -> Result<()> {
        let Some(board) = self.board.take() else {
            return Ok(());
        };
        let mover = board.active_player();
        if board.outcome().is_over() || self.kind_of(mover) != Some(PlayerKind::Computer) {
            self.board = Some(board);
            return Ok(());
        }

        match self.worker.request_move(board, mover) {
            Ok(()) => {
                self.thinking_for = Some(mover);
                Ok(())
            }
            Err(rejected) => {
                self.board = Some(rejected.board);
                Err(rejected.error)
            }
        }
    }

    fn absorb(&mut self, reply: WorkerReply, chain: bool) {
        self.thinking_for = None;
        match reply {
            WorkerReply::MoveChosen {
                board,
                index,
                player,
                outcome,
            } => {
                info!("{player:?} (computer) plays {index}");
                self.board = Some(board);
                self.emit(GameEvent::MoveApplied { index, by: player });
                if outcome.is_over() {
                    info!("game ended: {outcome:?}");
                    self.emit(GameEvent::GameEnded(outcome));
                } else if chain {
                    if let Err(e) = self.schedule_computer() {
                        warn!("could not request next computer move: {e}");
                    }
                }
            }
            WorkerReply::Cancelled { board } => {
                debug!("search cancelled, board returned");
                self.board = Some(board);
            }
            WorkerReply::Failed { error, board } => {
                error!("computer move failed: {error}");
                match board {
                    Some(board) => self.board = Some(board),
                    None => {
                        // Nothing trustworthy to continue from
                        self.board = Some(Board::new());
                        self.players = None;
                    }
                }
            }
        }
    }
}
