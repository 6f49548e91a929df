//! 3D tic-tac-toe
//!
//! Opens the game window, or with `--headless` plays a computer-vs-computer
//! match on the terminal.

use std::io::Write;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use ttt3d::ui::CubeApp;
use ttt3d::{result_message, EngineConfig, GameEvent, GameOutcome, GameSession, PlayerKind, Pos};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Play in the terminal instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Plies searched ahead of the current position
    #[arg(long, default_value_t = ttt3d::config::DEFAULT_LOOKAHEAD)]
    lookahead: usize,

    /// Minimum time a computer move takes, in milliseconds
    #[arg(long, default_value_t = ttt3d::config::DEFAULT_MIN_THINK_TIME.as_millis() as u64)]
    think_ms: u64,

    /// Who plays first (headless mode)
    #[arg(long, value_enum, default_value_t = Seat::Computer)]
    first: Seat,

    /// Who plays second (headless mode)
    #[arg(long, value_enum, default_value_t = Seat::Computer)]
    second: Seat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Seat {
    Human,
    Computer,
}

impl From<Seat> for PlayerKind {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::Human => PlayerKind::Human,
            Seat::Computer => PlayerKind::Computer,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .init();

    let config = EngineConfig::default()
        .with_lookahead(args.lookahead)
        .with_min_think_time(Duration::from_millis(args.think_ms));
    let (session, events) = GameSession::new(config)?;

    if args.headless {
        let players = [PlayerKind::from(args.first), PlayerKind::from(args.second)];
        if players.contains(&PlayerKind::Human) {
            bail!("headless mode has no input; both seats must be computer");
        }
        return run_headless(session, events, players);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 520.0])
            .with_min_inner_size([760.0, 400.0])
            .with_title("3D Tic-Tac-Toe"),
        ..Default::default()
    };

    eframe::run_native(
        "ttt3d",
        options,
        Box::new(move |cc| Ok(Box::new(CubeApp::new(cc, session, events)))),
    )
    .map_err(|e| anyhow::anyhow!("window closed with error: {e}"))
}

/// Play one match to the end, printing every move
fn run_headless(
    mut session: GameSession,
    events: Receiver<GameEvent>,
    players: [PlayerKind; 2],
) -> Result<()> {
    let [a, b] = players;
    session.start_round(a, b)?;

    loop {
        session.wait(Duration::from_secs(1));

        for event in events.try_iter() {
            match event {
                GameEvent::RoundStarted { .. } => println!("New round"),
                GameEvent::MoveApplied { index, by } => match Pos::from_index(index as usize) {
                    Some(pos) => println!(
                        "Player {} -> {index:>2} (x={}, y={}, z={})",
                        by.seat(),
                        pos.x,
                        pos.y,
                        pos.z
                    ),
                    None => println!("Player {} -> {index}", by.seat()),
                },
                GameEvent::GameEnded(outcome) => {
                    println!("{}", result_message(players, outcome).unwrap_or("Game over"));
                    return Ok(());
                }
            }
        }

        // An aborted round ends without a GameEnded event
        if session.players().is_none() {
            bail!("the search worker failed; see log output");
        }
        if !session.is_thinking() && session.outcome() == GameOutcome::Ongoing {
            bail!("no computer move pending in an unfinished game");
        }
    }
}
