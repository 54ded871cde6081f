//! The position function: where a roll takes a piece.
//!
//! This is the exact-landing core of the game. A piece finishes only by
//! landing precisely on the terminal offset; a roll that would carry it
//! past the terminal moves it nowhere at all, not partially.

use crate::board::BoardConfig;
use crate::core::{PiecePosition, Roll};

/// Compute the position a roll would take a piece to.
///
/// Returns the position unchanged when the piece cannot move: a yard piece
/// without an entry roll, an overshoot past the terminal offset, a zero
/// roll, or a finished piece. Callers detect "cannot move" by comparing
/// the result against the input.
#[must_use]
pub fn next_position(cfg: &BoardConfig, position: PiecePosition, roll: Roll) -> PiecePosition {
    match position {
        PiecePosition::Yard => {
            if cfg.can_enter(roll) {
                PiecePosition::OnBoard(0)
            } else {
                PiecePosition::Yard
            }
        }
        PiecePosition::OnBoard(offset) => {
            let target = offset + u16::from(roll.value());
            match target.cmp(&cfg.terminal_offset()) {
                // Exact landing finishes the piece.
                std::cmp::Ordering::Equal => PiecePosition::Done,
                // Overshoot forfeits the move entirely.
                std::cmp::Ordering::Greater => PiecePosition::OnBoard(offset),
                std::cmp::Ordering::Less => PiecePosition::OnBoard(target),
            }
        }
        PiecePosition::Done => PiecePosition::Done,
    }
}
