//! Move legality: which pieces may use a pending roll.
//!
//! Legality is evaluated identically on the proposing client and the
//! validating server; both call these functions against their own snapshot
//! of the state. Rules are checked in a fixed order and the first failure
//! disqualifies the move.

use smallvec::SmallVec;

use super::movement::next_position;
use crate::board::{BoardConfig, Cell};
use crate::core::{Piece, PieceId, PiecePosition, Pieces, Player, Roll};

/// The shared board cell a piece occupies, if it is on the board.
#[must_use]
pub(crate) fn occupied_cell(cfg: &BoardConfig, player: Player, piece: &Piece) -> Option<Cell> {
    piece.position.offset().map(|o| cfg.cell_at(player, o))
}

/// May this piece use the roll?
///
/// Rules in order, first failure disqualifies:
/// 1. a finished piece never moves;
/// 2. a yard piece moves iff the roll permits entry, regardless of board
///    occupancy;
/// 3. a move that leaves the position unchanged (overshoot, zero roll) is
///    invalid;
/// 4. the target cell must not hold another of the mover's own unfinished
///    pieces;
/// 5. the target cell must not be a safe cell holding an unfinished
///    opponent piece.
#[must_use]
pub fn is_valid_move(
    cfg: &BoardConfig,
    piece: &Piece,
    roll: Roll,
    own: &Pieces,
    opponent: &Pieces,
    player: Player,
) -> bool {
    if piece.completed() {
        return false;
    }

    if piece.position.is_yard() {
        return cfg.can_enter(roll);
    }

    let next = next_position(cfg, piece.position, roll);
    if next == piece.position {
        return false;
    }

    let target = match next {
        // An exact landing leaves the board; nothing can block it.
        PiecePosition::Done => return true,
        PiecePosition::OnBoard(offset) => cfg.cell_at(player, offset),
        PiecePosition::Yard => unreachable!("on-board piece cannot move to the yard"),
    };

    let self_blocked = own.iter().any(|p| {
        p.id != piece.id
            && !p.completed()
            && occupied_cell(cfg, player, p) == Some(target)
    });
    if self_blocked {
        return false;
    }

    let safe_and_held = cfg.is_safe(target)
        && opponent.iter().any(|p| {
            !p.completed() && occupied_cell(cfg, player.opponent(), p) == Some(target)
        });
    if safe_and_held {
        return false;
    }

    true
}

/// IDs of every piece that may legally use the roll.
#[must_use]
pub fn available_moves(
    cfg: &BoardConfig,
    roll: Roll,
    own: &Pieces,
    opponent: &Pieces,
    player: Player,
) -> SmallVec<[PieceId; 4]> {
    own.iter()
        .filter(|piece| is_valid_move(cfg, piece, roll, own, opponent, player))
        .map(|piece| piece.id)
        .collect()
}

/// Does the roll admit any legal move at all?
///
/// "No" is a first-class outcome, not an error: the turn resolver still
/// evaluates the roll for a bonus turn on a forced pass.
#[must_use]
pub fn can_make_move(
    cfg: &BoardConfig,
    roll: Roll,
    own: &Pieces,
    opponent: &Pieces,
    player: Player,
) -> bool {
    !available_moves(cfg, roll, own, opponent, player).is_empty()
}
