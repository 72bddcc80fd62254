use crate::gomoku::{Board, StoneColor, WinReason};
use serde::{Deserialize, Serialize};

/// Commands a client sends over the wire to drive its game session.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Command {
    Start,
    Restart,
    Quit,
    Place { row: usize, col: usize },
}

/// Updates the server pushes back so the client can redraw.
#[derive(Serialize, Deserialize, Debug)]
pub enum Response {
    /// Full snapshot after a lifecycle command or a placement attempt.
    GameState {
        board: Board,
        turn: StoneColor,
        remaining_time: u32,
    },
    /// One countdown unit elapsed for the active turn.
    TimeLeft {
        turn: StoneColor,
        remaining_time: u32,
    },
    /// The game finished, either by five in a row or by timeout.
    GameEnd {
        winner: StoneColor,
        reason: WinReason,
    },
    /// The session was quit.
    GameOver,
}
