//! Main application for the cube GUI

use std::sync::mpsc::Receiver;
use std::time::Duration;

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel};
use log::{debug, warn};

use crate::board::{Cell, Player, CELL_COUNT};
use crate::game::{result_message, GameEvent, GameSession, PlayerKind};
use super::board_view::BoardView;
use super::theme::*;

/// The four match-ups offered in the menu, as (seat A, seat B)
const MATCH_UPS: [(&str, PlayerKind, PlayerKind); 4] = [
    ("Human first", PlayerKind::Human, PlayerKind::Computer),
    ("Computer first", PlayerKind::Computer, PlayerKind::Human),
    ("Human vs Human", PlayerKind::Human, PlayerKind::Human),
    ("Computer vs Computer", PlayerKind::Computer, PlayerKind::Computer),
];

/// Main application.
///
/// Holds a mirror of the cube that is only ever updated from
/// [`GameEvent`]s; all game decisions go through the [`GameSession`].
pub struct CubeApp {
    session: GameSession,
    events: Receiver<GameEvent>,
    cells: [Cell; CELL_COUNT],
    last_move: Option<usize>,
    to_move: Option<Player>,
    players: Option<[PlayerKind; 2]>,
    message: Option<String>,
    board_view: BoardView,
}

impl CubeApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        session: GameSession,
        events: Receiver<GameEvent>,
    ) -> Self {
        Self {
            session,
            events,
            cells: [Cell::Empty; CELL_COUNT],
            last_move: None,
            to_move: None,
            players: None,
            message: Some("Pick a match-up from the Game menu.".to_string()),
            board_view: BoardView::default(),
        }
    }

    /// Fold pending events into the mirrored state
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                GameEvent::RoundStarted { a, b } => {
                    self.cells = [Cell::Empty; CELL_COUNT];
                    self.last_move = None;
                    self.to_move = Some(Player::A);
                    self.players = Some([a, b]);
                    self.message = None;
                }
                GameEvent::MoveApplied { index, by } => {
                    if let Some(cell) = self.cells.get_mut(index as usize) {
                        *cell = Cell::from(by);
                    }
                    self.last_move = Some(index as usize);
                    self.to_move = Some(by.opponent());
                }
                GameEvent::GameEnded(outcome) => {
                    self.to_move = None;
                    self.message = self
                        .players
                        .and_then(|players| result_message(players, outcome))
                        .map(str::to_string);
                }
            }
        }
    }

    fn start(&mut self, a: PlayerKind, b: PlayerKind) {
        if let Err(e) = self.session.start_round(a, b) {
            warn!("could not start round: {e}");
            self.message = Some(e.to_string());
        }
    }

    fn new_round(&mut self) {
        if let Err(e) = self.session.request_reset() {
            debug!("new round ignored: {e}");
        }
    }

    fn stop(&mut self) {
        let was_thinking = self.session.is_thinking();
        self.session.request_stop();
        if was_thinking {
            self.message = Some("Stopped. Start a new round to play on.".to_string());
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    for (label, a, b) in MATCH_UPS {
                        if ui.button(label).clicked() {
                            self.start(a, b);
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    if ui.button("New round (N)").clicked() {
                        self.new_round();
                        ui.close_menu();
                    }
                    if ui.button("Stop (S)").clicked() {
                        self.stop();
                        ui.close_menu();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = MATCH_UPS
                        .iter()
                        .find(|(_, a, b)| self.players == Some([*a, *b]))
                        .map_or("No game", |(label, _, _)| *label);
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Render the side panel with both players and the result
    fn render_side_panel(&self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(220.0)
            .max_width(260.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.label(RichText::new("3D TIC-TAC-TOE").size(20.0).strong().color(TEXT_PRIMARY));
                ui.add_space(12.0);

                for player in [Player::A, Player::B] {
                    self.render_player_card(ui, player);
                    ui.add_space(8.0);
                }

                if let Some(msg) = &self.message {
                    ui.add_space(8.0);
                    Frame::new()
                        .fill(CARD_BG)
                        .corner_radius(CornerRadius::same(8))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(msg).size(14.0).strong().color(WIN_HIGHLIGHT));
                        });
                }
            });
    }

    /// Player label, highlighted while that player is to move
    fn render_player_card(&self, ui: &mut egui::Ui, player: Player) {
        let active = self.to_move == Some(player);
        let kind = self.players.map(|[a, b]| match player {
            Player::A => a,
            Player::B => b,
        });

        Frame::new()
            .fill(if active { CARD_ACTIVE } else { CARD_BG })
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                let (mark, color) = match player {
                    Player::A => ("●", MARK_A),
                    Player::B => ("○", MARK_B),
                };
                ui.horizontal(|ui| {
                    ui.label(RichText::new(mark).size(22.0).color(color));
                    ui.vertical(|ui| {
                        let name = match kind {
                            Some(PlayerKind::Human) => "Human",
                            Some(PlayerKind::Computer) => "Computer",
                            None => "-",
                        };
                        ui.label(
                            RichText::new(format!("Player {}: {name}", player.seat()))
                                .size(15.0)
                                .strong()
                                .color(TEXT_PRIMARY),
                        );

                        let status = if !active {
                            ("", TEXT_MUTED)
                        } else if self.session.is_thinking() {
                            ("Thinking...", STATUS_THINKING)
                        } else {
                            ("To move", TEXT_SECONDARY)
                        };
                        ui.label(RichText::new(status.0).size(11.0).color(status.1));
                    });
                });
            });
    }

    /// Render the three levels
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.add_space(16.0);
            let clicked = self.board_view.show(
                ui,
                &self.cells,
                self.to_move,
                self.last_move,
                self.session.is_human_turn(),
            );

            if let Some(idx) = clicked {
                // Occupied cells and out-of-turn clicks are ignored
                if let Err(e) = self.session.human_select(idx) {
                    debug!("selection {idx} ignored: {e}");
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (new_round, stop) = ctx.input(|i| (i.key_pressed(egui::Key::N), i.key_pressed(egui::Key::S)));
        if new_round {
            self.new_round();
        }
        if stop {
            self.stop();
        }
    }
}

impl eframe::App for CubeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        // Pick up a finished computer move
        self.session.poll();
        self.drain_events();

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);
        self.drain_events();

        if self.session.is_thinking() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
