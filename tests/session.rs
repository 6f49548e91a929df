//! End-to-end games driven through `GameSession`

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use ttt3d::{Board, Cell, EngineConfig, GameEvent, GameSession, Player, PlayerKind, WIN_LINES};

const WAIT: Duration = Duration::from_secs(30);

fn new_session(lookahead: usize, think_ms: u64) -> (GameSession, Receiver<GameEvent>) {
    let config = EngineConfig::default()
        .with_lookahead(lookahead)
        .with_min_think_time(Duration::from_millis(think_ms));
    GameSession::new(config).unwrap()
}

/// Cell and player of the most recent `MoveApplied`
fn last_move(events: &[GameEvent]) -> Option<(u8, Player)> {
    events.iter().rev().find_map(|e| match *e {
        GameEvent::MoveApplied { index, by } => Some((index, by)),
        _ => None,
    })
}

#[test]
fn test_computer_vs_computer_plays_to_the_end() {
    let (mut session, events) = new_session(2, 1);
    session
        .start_round(PlayerKind::Computer, PlayerKind::Computer)
        .unwrap();

    let deadline = Instant::now() + WAIT;
    while !session.outcome().is_over() && Instant::now() < deadline {
        session.wait(Duration::from_millis(200));
    }
    assert!(session.outcome().is_over(), "match did not finish in time");

    let seen: Vec<GameEvent> = events.try_iter().collect();
    assert_eq!(
        seen.first(),
        Some(&GameEvent::RoundStarted {
            a: PlayerKind::Computer,
            b: PlayerKind::Computer
        })
    );

    // Replay the reported moves; players alternate starting with A
    let mut replay = Board::new();
    let mut expected = Player::A;
    for event in &seen[1..seen.len() - 1] {
        match *event {
            GameEvent::MoveApplied { index, by } => {
                assert_eq!(by, expected);
                replay.apply(index as usize, by).unwrap();
                expected = expected.opponent();
            }
            other => panic!("unexpected event mid-game: {other:?}"),
        }
    }

    let final_outcome = replay.outcome();
    assert!(final_outcome.is_over());
    assert_eq!(seen.last(), Some(&GameEvent::GameEnded(final_outcome)));
    assert_eq!(session.board(), Some(&replay));
    assert!(!session.is_thinking());
}

#[test]
fn test_computer_blocks_human_threat() {
    let (mut session, events) = new_session(2, 1);
    session
        .start_round(PlayerKind::Human, PlayerKind::Computer)
        .unwrap();

    session.human_select(0).unwrap();
    assert!(session.wait(WAIT));
    let seen: Vec<GameEvent> = events.try_iter().collect();
    let (reply, by) = last_move(&seen).unwrap();
    assert_eq!(by, Player::B);

    // Open a line through 0 the computer has not touched
    let line = WIN_LINES
        .iter()
        .find(|line| line[0] == 0 && !line.contains(&reply))
        .unwrap();
    session.human_select(line[1] as usize).unwrap();
    assert!(session.wait(WAIT));

    let seen: Vec<GameEvent> = events.try_iter().collect();
    assert_eq!(last_move(&seen), Some((line[2], Player::B)));
    assert_eq!(session.board().unwrap().get(line[2] as usize), Some(Cell::B));
    assert!(session.is_human_turn());
}

#[test]
fn test_human_rejections_leave_state_alone() {
    let (mut session, events) = new_session(2, 1);
    assert!(session.human_select(0).is_err());

    session
        .start_round(PlayerKind::Human, PlayerKind::Human)
        .unwrap();
    session.human_select(13).unwrap();
    let board = session.board().cloned().unwrap();
    let _ = events.try_iter().count();

    assert!(session.human_select(13).is_err());
    assert!(session.human_select(99).is_err());
    assert_eq!(session.board(), Some(&board));
    assert_eq!(events.try_iter().count(), 0);
}

#[test]
fn test_stop_cancels_computer_move() {
    let (mut session, events) = new_session(2, 30_000);
    session
        .start_round(PlayerKind::Computer, PlayerKind::Computer)
        .unwrap();
    assert!(session.is_thinking());

    let start = Instant::now();
    session.request_stop();
    assert!(start.elapsed() < Duration::from_secs(10));

    assert!(!session.is_thinking());
    assert_eq!(session.board(), Some(&Board::new()));
    assert!(!session.poll());

    let seen: Vec<GameEvent> = events.try_iter().collect();
    assert!(seen
        .iter()
        .all(|e| matches!(e, GameEvent::RoundStarted { .. })));
}

#[test]
fn test_reset_restarts_computer_first() {
    let (mut session, events) = new_session(2, 30_000);
    session
        .start_round(PlayerKind::Computer, PlayerKind::Human)
        .unwrap();
    assert!(session.is_thinking());

    session.request_reset().unwrap();
    assert!(session.is_thinking());
    assert_eq!(session.to_move(), Some(Player::A));

    let started = events
        .try_iter()
        .filter(|e| matches!(e, GameEvent::RoundStarted { .. }))
        .count();
    assert_eq!(started, 2);

    session.request_stop();
    assert_eq!(session.board(), Some(&Board::new()));
}
