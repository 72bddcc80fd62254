use crate::gomoku::board::{Board, StoneColor};
use crate::gomoku::timer::{TimerEvent, TurnTimer};
use serde::{Deserialize, Serialize};

/// Stones in a row needed to win.
pub const WIN_LENGTH: u32 = 5;

// The four scan axes: horizontal, vertical, down-right and down-left diagonal.
const AXES: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum WinReason {
    FiveInARow,
    Timeout,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    InProgress,
    Finished {
        winner: StoneColor,
        reason: WinReason,
    },
}

/// Turn order, countdown lifecycle and win evaluation for one game session.
///
/// The controller is permissive at its boundary: placements on occupied or
/// out-of-range cells and commands arriving in the wrong phase are dropped
/// without an error, so callers can forward raw input as-is.
#[derive(Clone, Debug)]
pub struct GameController {
    board: Board,
    current_turn: StoneColor,
    previous_loser: Option<StoneColor>,
    timer: TurnTimer,
    phase: Phase,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl GameController {
    pub fn new() -> Self {
        GameController {
            board: Board::new(),
            current_turn: StoneColor::Black,
            previous_loser: None,
            timer: TurnTimer::new(),
            phase: Phase::Idle,
        }
    }

    /// Begin a fresh game. Black always opens the first game.
    pub fn start(&mut self) {
        self.board.reset();
        self.current_turn = StoneColor::Black;
        self.phase = Phase::InProgress;
        self.timer.arm();
    }

    /// Begin the next game after a finished one. The loser of the previous
    /// game opens; Black opens when no game has finished yet.
    pub fn restart(&mut self) {
        self.board.reset();
        self.current_turn = self.previous_loser.unwrap_or(StoneColor::Black);
        self.phase = Phase::InProgress;
        self.timer.arm();
    }

    /// Abandon the session. The countdown is cancelled first so no timeout
    /// can fire once the game is gone.
    pub fn quit(&mut self) {
        self.timer.cancel();
        self.phase = Phase::Idle;
    }

    /// Attempt a move at the given cell for the player whose turn it is.
    ///
    /// Out-of-range and occupied placements are no-ops. A legal move cancels
    /// the running countdown before the win scan, then either finishes the
    /// game or hands the turn (and a fresh countdown) to the other player.
    pub fn place_stone(&mut self, row: usize, col: usize) {
        if self.phase != Phase::InProgress {
            return;
        }
        if self.board.place(row, col, self.current_turn).is_err() {
            return;
        }
        self.timer.cancel();
        if is_winning_move(&self.board, row, col, self.current_turn) {
            self.previous_loser = Some(self.current_turn.opposite());
            self.phase = Phase::Finished {
                winner: self.current_turn,
                reason: WinReason::FiveInARow,
            };
        } else {
            self.current_turn = self.current_turn.opposite();
            self.timer.arm();
        }
    }

    /// Advance the turn countdown by one unit. When it runs out the player
    /// whose turn was active loses.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.phase != Phase::InProgress {
            return None;
        }
        let event = self.timer.tick();
        if event == Some(TimerEvent::Expired) {
            self.previous_loser = Some(self.current_turn);
            self.phase = Phase::Finished {
                winner: self.current_turn.opposite(),
                reason: WinReason::Timeout,
            };
        }
        event
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> StoneColor {
        self.current_turn
    }

    pub fn remaining_time(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<(StoneColor, WinReason)> {
        match self.phase {
            Phase::Finished { winner, reason } => Some((winner, reason)),
            _ => None,
        }
    }
}

fn is_winning_move(board: &Board, row: usize, col: usize, color: StoneColor) -> bool {
    AXES.iter().any(|&(row_step, col_step)| {
        let run = 1
            + count_stones(board, row, col, row_step, col_step, color)
            + count_stones(board, row, col, -row_step, -col_step, color);
        run >= WIN_LENGTH
    })
}

// Walk from (row, col) along the step direction, counting stones of the given
// color until the board edge or a different space.
fn count_stones(
    board: &Board,
    row: usize,
    col: usize,
    row_step: i32,
    col_step: i32,
    color: StoneColor,
) -> u32 {
    let mut count = 0;
    let mut row = row as i32 + row_step;
    let mut col = col as i32 + col_step;
    while let Some(space) = board.space_at(row, col) {
        if !space.is_stone(color) {
            break;
        }
        count += 1;
        row += row_step;
        col += col_step;
    }
    count
}
