use crate::client::SendMsg;
use crate::util;
use common::{
    messages::{Command, Response},
    GameController, Phase,
};
use hashbrown::HashMap;
use serde::Serialize;
use serde_json::from_str;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub type Games = Arc<RwLock<HashMap<String, Game>>>;

/// One pass-and-play session. Both colors share a single connection and take
/// turns on the same screen, so the session owns exactly one controller.
#[derive(Debug, Default)]
pub struct Game {
    controller: GameController,
}

impl Game {
    pub fn new() -> Self {
        Game {
            controller: GameController::new(),
        }
    }

    pub fn handle_message(&mut self, msg: &str, client: &impl SendMsg) {
        let command: Command = match from_str(msg) {
            Ok(command) => command,
            Err(err) => {
                warn!("Failed to deserialize input into game command: {}", err);
                return;
            }
        };
        match command {
            Command::Start => {
                self.controller.start();
                info!("game started");
                self.send_state(client);
            }
            Command::Restart => {
                self.controller.restart();
                info!(
                    "game restarted, {:?} opens",
                    self.controller.current_turn()
                );
                self.send_state(client);
            }
            Command::Quit => {
                self.controller.quit();
                info!("game quit");
                send_message(client, Response::GameOver);
            }
            Command::Place { row, col } => {
                // Illegal placements are dropped by the controller, so the
                // snapshot sent back is simply unchanged.
                self.controller.place_stone(row, col);
                self.send_state(client);
                if let Some((winner, reason)) = self.controller.outcome() {
                    info!("{:?} wins by {:?}", winner, reason);
                    send_message(client, Response::GameEnd { winner, reason });
                }
            }
        }
    }

    /// Advance the turn countdown by one unit. Called once per second by the
    /// session's ticker task while the connection is open.
    pub fn handle_tick(&mut self, client: &impl SendMsg) {
        if self.controller.phase() != Phase::InProgress {
            return;
        }
        self.controller.tick();
        match self.controller.outcome() {
            Some((winner, reason)) => {
                info!("turn clock ran out, {:?} wins", winner);
                send_message(client, Response::GameEnd { winner, reason });
            }
            None => send_message(
                client,
                Response::TimeLeft {
                    turn: self.controller.current_turn(),
                    remaining_time: self.controller.remaining_time(),
                },
            ),
        }
    }

    fn send_state(&self, client: &impl SendMsg) {
        send_message(
            client,
            Response::GameState {
                board: self.controller.board().clone(),
                turn: self.controller.current_turn(),
                remaining_time: self.controller.remaining_time(),
            },
        );
    }
}

fn send_message<M: Serialize>(client: &impl SendMsg, message: M) {
    // If the message fails to send even after retries, there's not much we can do but proceed
    let _ = util::retry(1, || client.send(&serde_json::to_string(&message).unwrap()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SendError;
    use common::{StoneColor, WinReason, TURN_TIME_LIMIT};
    use std::cell::RefCell;

    struct MockSender;
    impl SendMsg for MockSender {
        fn send(&self, _msg: &str) -> Result<(), SendError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSender(RefCell<Vec<String>>);
    impl SendMsg for RecordingSender {
        fn send(&self, msg: &str) -> Result<(), SendError> {
            self.0.borrow_mut().push(msg.to_string());
            Ok(())
        }
    }

    fn place(game: &mut Game, row: usize, col: usize, client: &impl SendMsg) {
        let msg = format!("{{\"Place\":{{\"row\":{},\"col\":{}}}}}", row, col);
        game.handle_message(&msg, client);
    }

    #[test]
    fn test_invalid_message_is_dropped() {
        let mut game = Game::new();
        game.handle_message("foo", &MockSender);
        assert_eq!(game.controller.phase(), Phase::Idle);
    }

    #[test]
    fn test_start_sends_snapshot() {
        let mut game = Game::new();
        let sender = RecordingSender::default();
        game.handle_message("\"Start\"", &sender);
        assert_eq!(game.controller.phase(), Phase::InProgress);
        let sent = sender.0.borrow();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("GameState"));
        assert!(sent[0].contains("\"turn\":\"Black\""));
    }

    #[test]
    fn test_commands_drive_a_game_to_a_win() {
        let mut game = Game::new();
        let sender = RecordingSender::default();
        game.handle_message("\"Start\"", &sender);
        for col in 0..4 {
            place(&mut game, 7, col, &sender);
            place(&mut game, 0, col, &sender);
        }
        place(&mut game, 7, 4, &sender);
        assert_eq!(
            game.controller.outcome(),
            Some((StoneColor::Black, WinReason::FiveInARow))
        );
        let sent = sender.0.borrow();
        assert!(sent.last().unwrap().contains("GameEnd"));
        assert!(sent.last().unwrap().contains("\"winner\":\"Black\""));
    }

    #[test]
    fn test_ticks_run_the_clock_out() {
        let mut game = Game::new();
        let sender = RecordingSender::default();
        game.handle_message("\"Start\"", &sender);
        for _ in 0..TURN_TIME_LIMIT {
            game.handle_tick(&sender);
        }
        assert_eq!(
            game.controller.outcome(),
            Some((StoneColor::White, WinReason::Timeout))
        );
        let sent = sender.0.borrow();
        assert!(sent.last().unwrap().contains("GameEnd"));
        assert!(sent.last().unwrap().contains("\"reason\":\"Timeout\""));
        // Start snapshot plus one message per countdown unit
        assert_eq!(sent.len(), 1 + TURN_TIME_LIMIT as usize);
    }

    #[test]
    fn test_tick_outside_a_game_sends_nothing() {
        let mut game = Game::new();
        let sender = RecordingSender::default();
        game.handle_tick(&sender);
        assert!(sender.0.borrow().is_empty());
    }

    #[test]
    fn test_quit_acknowledges_and_stops_the_session() {
        let mut game = Game::new();
        let sender = RecordingSender::default();
        game.handle_message("\"Start\"", &sender);
        game.handle_message("\"Quit\"", &sender);
        assert_eq!(game.controller.phase(), Phase::Idle);
        assert!(sender.0.borrow().last().unwrap().contains("GameOver"));
        // No countdown survives the quit
        game.handle_tick(&sender);
        assert!(sender.0.borrow().last().unwrap().contains("GameOver"));
    }

    #[test]
    fn test_restart_after_win_lets_loser_open() {
        let mut game = Game::new();
        game.handle_message("\"Start\"", &MockSender);
        for col in 0..4 {
            place(&mut game, 7, col, &MockSender);
            place(&mut game, 0, col, &MockSender);
        }
        place(&mut game, 7, 4, &MockSender);
        let sender = RecordingSender::default();
        game.handle_message("\"Restart\"", &sender);
        assert_eq!(game.controller.current_turn(), StoneColor::White);
        assert!(sender.0.borrow()[0].contains("\"turn\":\"White\""));
    }
}
