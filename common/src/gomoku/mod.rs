mod board;
mod game;
mod timer;

pub use board::{Board, BoardError, BoardSpace, Coordinate, StoneColor, BOARD_SIZE};
pub use game::{GameController, Phase, WinReason, WIN_LENGTH};
pub use timer::{TimerEvent, TurnTimer, TURN_TIME_LIMIT};
