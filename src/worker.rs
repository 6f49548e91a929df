//! Background search worker
//!
//! One long-lived thread per worker. Between requests it blocks on its
//! command channel; a request moves the [`Board`] into the thread, and the
//! reply moves it back. While a search runs the caller has no board to
//! touch, so the two sides never mutate it at the same time.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use ttt3d::{Board, EngineConfig, Player, SearchWorker, WorkerReply};
//!
//! let config = EngineConfig::default()
//!     .with_lookahead(2)
//!     .with_min_think_time(Duration::from_millis(10));
//! let mut worker = SearchWorker::spawn(config).unwrap();
//!
//! let mut board = Board::new();
//! board.apply(0, Player::A).unwrap();
//! board.apply(1, Player::A).unwrap();
//! worker.request_move(board, Player::A).unwrap();
//!
//! match worker.recv_timeout(Duration::from_secs(5)) {
//!     Some(WorkerReply::MoveChosen { index, .. }) => assert_eq!(index, 2),
//!     other => panic!("unexpected reply: {other:?}"),
//! }
//! ```

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error, warn};

use crate::board::{Board, Player};
use crate::config::EngineConfig;
use crate::error::{Error, Rejected, Result};
use crate::rules::GameOutcome;
use crate::search::{Searcher, StopSignal};

/// What the worker sends back when a request ends
#[derive(Debug)]
pub enum WorkerReply {
    /// The chosen move has been applied to `board`
    MoveChosen {
        board: Board,
        index: u8,
        player: Player,
        outcome: GameOutcome,
    },
    /// Stopped before a move was applied; `board` is as it was sent
    Cancelled { board: Board },
    /// The search aborted. `board` is `None` when it could not be trusted.
    Failed { error: Error, board: Option<Board> },
}

/// Worker activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Searching,
}

/// One search request; the board travels with it
struct Job {
    board: Board,
    player: Player,
}

/// Runs searches on a dedicated thread without blocking the caller.
pub struct SearchWorker {
    /// Dropped on shutdown, which ends the worker loop
    jobs: Option<Sender<Job>>,
    replies: Receiver<WorkerReply>,
    stop: Arc<StopSignal>,
    state: WorkerState,
    handle: Option<JoinHandle<()>>,
}

impl SearchWorker {
    /// Start the worker thread
    pub fn spawn(config: EngineConfig) -> Result<Self> {
        let (job_tx, job_rx) = channel();
        let (reply_tx, reply_rx) = channel();
        let stop = Arc::new(StopSignal::new());

        let handle = {
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("search-worker".into())
                .spawn(move || run(job_rx, reply_tx, stop, config))
                .map_err(|e| {
                    error!("failed to start search worker: {e}");
                    Error::WorkerUnavailable
                })?
        };

        Ok(Self {
            jobs: Some(job_tx),
            replies: reply_rx,
            stop,
            state: WorkerState::Idle,
            handle: Some(handle),
        })
    }

    #[inline]
    pub fn state(&self) -> WorkerState {
        self.state
    }

    #[inline]
    pub fn is_searching(&self) -> bool {
        self.state == WorkerState::Searching
    }

    /// Hand `board` to the worker and search a move for `player`.
    ///
    /// Refused requests give the board back unchanged.
    pub fn request_move(
        &mut self,
        board: Board,
        player: Player,
    ) -> std::result::Result<(), Rejected> {
        let reject = |board: Board, error: Error| -> std::result::Result<(), Rejected> {
            warn!("search request rejected: {error}");
            Err(Rejected { board, error })
        };

        if self.is_searching() {
            return reject(board, Error::ConcurrentSearchRequested);
        }
        if board.outcome().is_over() {
            return reject(board, Error::GameOver);
        }
        let to_move = board.active_player();
        if player != to_move {
            return reject(board, Error::OutOfTurn { requested: player, to_move });
        }

        let Some(jobs) = self.jobs.as_ref() else {
            return reject(board, Error::WorkerUnavailable);
        };

        self.stop.clear();
        match jobs.send(Job { board, player }) {
            Ok(()) => {
                debug!("search requested for {player:?}");
                self.state = WorkerState::Searching;
                Ok(())
            }
            Err(err) => reject(err.0.board, Error::WorkerUnavailable),
        }
    }

    /// Take a finished reply if there is one. Never blocks.
    pub fn try_recv(&mut self) -> Option<WorkerReply> {
        if !self.is_searching() {
            return None;
        }
        match self.replies.try_recv() {
            Ok(reply) => Some(self.finish(reply)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(self.finish(Self::hung_up())),
        }
    }

    /// Wait up to `timeout` for a reply
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<WorkerReply> {
        if !self.is_searching() {
            return None;
        }
        match self.replies.recv_timeout(timeout) {
            Ok(reply) => Some(self.finish(reply)),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(self.finish(Self::hung_up())),
        }
    }

    /// Ask the running search to give up, and wait until the worker is idle.
    ///
    /// Returns the reply of the interrupted request (usually
    /// [`WorkerReply::Cancelled`]; a search that finished just before the
    /// signal reports its move as normal). `None` if nothing was running.
    pub fn stop(&mut self) -> Option<WorkerReply> {
        if !self.is_searching() {
            return None;
        }

        warn!("stopping search in progress");
        self.stop.raise();
        let reply = self.replies.recv().unwrap_or_else(|_| Self::hung_up());
        Some(self.finish(reply))
    }

    /// Abandon any running search and return an empty board
    pub fn reset(&mut self) -> Board {
        if let Some(reply) = self.stop() {
            debug!("discarding reply on reset: {reply:?}");
        }
        Board::new()
    }

    fn finish(&mut self, reply: WorkerReply) -> WorkerReply {
        self.state = WorkerState::Idle;
        reply
    }

    fn hung_up() -> WorkerReply {
        error!("search worker hung up");
        WorkerReply::Failed {
            error: Error::WorkerUnavailable,
            board: None,
        }
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        self.stop.raise();
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("search worker panicked");
            }
        }
    }
}

fn run(
    jobs: Receiver<Job>,
    replies: Sender<WorkerReply>,
    stop: Arc<StopSignal>,
    config: EngineConfig,
) {
    let mut searcher = Searcher::new(config.lookahead);

    while let Ok(Job { board, player }) = jobs.recv() {
        let reply = think(&mut searcher, board, player, &stop, config.min_think_time);
        if replies.send(reply).is_err() {
            break;
        }
    }
    debug!("search worker exiting");
}

/// Search, hold the reply until `min_think_time` has passed, then play.
fn think(
    searcher: &mut Searcher,
    mut board: Board,
    player: Player,
    stop: &StopSignal,
    min_think_time: Duration,
) -> WorkerReply {
    let started = Instant::now();

    let result = match searcher.search(&mut board, stop) {
        Ok(result) => result,
        Err(error) => {
            error!("search aborted: {error}");
            return WorkerReply::Failed { error, board: None };
        }
    };
    if result.cancelled {
        debug!("search cancelled after {} nodes", result.nodes);
        return WorkerReply::Cancelled { board };
    }

    let remaining = min_think_time.saturating_sub(started.elapsed());
    if stop.wait_timeout(remaining) {
        debug!("stopped while holding a move");
        return WorkerReply::Cancelled { board };
    }

    let Some(index) = result.best_move else {
        return WorkerReply::Failed {
            error: Error::GameOver,
            board: Some(board),
        };
    };
    if let Err(error) = board.apply(index as usize, player) {
        error!("chosen move {index} could not be applied: {error}");
        return WorkerReply::Failed {
            error,
            board: Some(board),
        };
    }

    let outcome = board.outcome();
    debug!(
        "{player:?} plays {index} (score {}) after {:?}",
        result.score,
        started.elapsed()
    );
    WorkerReply::MoveChosen {
        board,
        index,
        player,
        outcome,
    }
}
