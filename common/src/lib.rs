pub mod messages;

mod gomoku;

pub use gomoku::{
    Board, BoardError, BoardSpace, Coordinate, GameController, Phase, StoneColor, TimerEvent,
    TurnTimer, WinReason, BOARD_SIZE, TURN_TIME_LIMIT, WIN_LENGTH,
};
