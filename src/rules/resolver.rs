//! The move resolver: applying a legal move to the piece sets.
//!
//! Resolution is copy-on-write. The caller's piece sets are never mutated;
//! a [`MoveOutcome`] carries fresh copies plus the knockout report. That
//! keeps a stale snapshot intact while the server re-validates a proposed
//! move against the authoritative one.
//!
//! Turn order and win detection are deliberately not decided here; see
//! `crate::rules::game`. Keeping capture and movement separate from turn
//! passing makes each independently testable.

use super::legality::occupied_cell;
use super::movement::next_position;
use crate::board::{BoardConfig, Cell};
use crate::core::{PieceId, PiecePosition, Pieces, Player, Roll};

/// Result of resolving one move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The mover's pieces after the move.
    pub own: Pieces,
    /// The opponent's pieces after any knockout.
    pub opponent: Pieces,
    /// Opponent piece sent back to the yard, if any.
    pub knocked_out: Option<PieceId>,
    /// Cell the piece left, `None` when it entered from the yard.
    pub from: Option<Cell>,
    /// Cell the piece landed on, `None` when it finished.
    pub to: Option<Cell>,
    /// False when the move was illegal and nothing changed.
    pub moved: bool,
}

/// The opponent piece capturable on `cell`, if any.
///
/// Safe cells never yield a capture. `opponent_player` is the owner of
/// `opponent` and selects the path table their offsets map through.
#[must_use]
pub fn can_knock_out(
    cfg: &BoardConfig,
    cell: Cell,
    opponent: &Pieces,
    opponent_player: Player,
) -> Option<PieceId> {
    if cfg.is_safe(cell) {
        return None;
    }

    opponent
        .iter()
        .find(|p| !p.completed() && occupied_cell(cfg, opponent_player, p) == Some(cell))
        .map(|p| p.id)
}

/// Apply a move, producing updated piece sets and any knockout.
///
/// Callers must pre-check legality; an illegal move resolves to a no-op
/// outcome (`moved == false`, inputs copied unchanged) rather than a
/// panic, so a bypassed legality check cannot corrupt state.
#[must_use]
pub fn move_piece(
    cfg: &BoardConfig,
    piece_id: PieceId,
    roll: Roll,
    own: &Pieces,
    opponent: &Pieces,
    player: Player,
) -> MoveOutcome {
    let no_op = |own: &Pieces, opponent: &Pieces| MoveOutcome {
        own: own.clone(),
        opponent: opponent.clone(),
        knocked_out: None,
        from: None,
        to: None,
        moved: false,
    };

    let Some(piece) = own.get(piece_id) else {
        debug_assert!(false, "move_piece called with unknown {piece_id}");
        return no_op(own, opponent);
    };

    let next = next_position(cfg, piece.position, roll);
    if next == piece.position {
        // Blocked entry, overshoot, or a finished piece.
        return no_op(own, opponent);
    }

    let from = occupied_cell(cfg, player, piece);
    let to = match next {
        PiecePosition::OnBoard(offset) => Some(cfg.cell_at(player, offset)),
        // Exact landing: the piece leaves the board and captures nothing.
        PiecePosition::Done => None,
        PiecePosition::Yard => unreachable!("a move never returns a piece to the yard"),
    };

    let knocked_out =
        to.and_then(|cell| can_knock_out(cfg, cell, opponent, player.opponent()));

    let updated_opponent = match knocked_out {
        Some(id) => opponent.with_position(id, PiecePosition::Yard),
        None => opponent.clone(),
    };

    MoveOutcome {
        own: own.with_position(piece_id, next),
        opponent: updated_opponent,
        knocked_out,
        from,
        to,
        moved: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardConfig;

    fn cfg() -> BoardConfig {
        BoardConfig::cowrie_circuit()
    }

    fn place(pieces: &Pieces, id: u8, position: PiecePosition) -> Pieces {
        pieces.with_position(PieceId::new(id), position)
    }

    #[test]
    fn test_entry_from_yard() {
        let cfg = cfg();
        let outcome = move_piece(
            &cfg,
            PieceId::new(0),
            Roll::new(1),
            &Pieces::new(),
            &Pieces::new(),
            Player::One,
        );

        assert!(outcome.moved);
        assert_eq!(outcome.from, None);
        assert_eq!(outcome.to, Some(cfg.start_cell(Player::One)));
        assert_eq!(
            outcome.own.get(PieceId::new(0)).unwrap().position,
            PiecePosition::OnBoard(0)
        );
    }

    #[test]
    fn test_plain_move_no_knockout() {
        let cfg = cfg();
        let own = place(&Pieces::new(), 0, PiecePosition::OnBoard(3));
        let opponent = Pieces::new();

        let outcome = move_piece(&cfg, PieceId::new(0), Roll::new(2), &own, &opponent, Player::One);

        assert!(outcome.moved);
        assert_eq!(outcome.knocked_out, None);
        // Knockout idempotence: untouched opponent set is structurally equal.
        assert_eq!(outcome.opponent, opponent);
        assert_eq!(
            outcome.own.get(PieceId::new(0)).unwrap().position,
            PiecePosition::OnBoard(5)
        );
    }

    #[test]
    fn test_knockout_sends_opponent_home() {
        let cfg = cfg();
        let own = place(&Pieces::new(), 0, PiecePosition::OnBoard(5));
        // Player two at offset 22 occupies cell (14 + 22) % 28 = 8.
        let opponent = place(&Pieces::new(), 2, PiecePosition::OnBoard(22));

        let outcome = move_piece(&cfg, PieceId::new(0), Roll::new(3), &own, &opponent, Player::One);

        assert!(outcome.moved);
        assert_eq!(outcome.knocked_out, Some(PieceId::new(2)));
        assert_eq!(outcome.to, Some(Cell::new(8)));
        assert!(outcome
            .opponent
            .get(PieceId::new(2))
            .unwrap()
            .position
            .is_yard());
        // Inputs were not mutated.
        assert_eq!(
            opponent.get(PieceId::new(2)).unwrap().position,
            PiecePosition::OnBoard(22)
        );
    }

    #[test]
    fn test_no_knockout_on_safe_cell() {
        let cfg = cfg();
        // Player two at offset 21 occupies safe cell 7.
        let opponent = place(&Pieces::new(), 0, PiecePosition::OnBoard(21));
        assert_eq!(can_knock_out(&cfg, Cell::new(7), &opponent, Player::Two), None);
    }

    #[test]
    fn test_can_knock_out_ignores_finished_pieces() {
        let cfg = cfg();
        let opponent = place(&Pieces::new(), 0, PiecePosition::Done);
        assert_eq!(
            can_knock_out(&cfg, Cell::new(8), &opponent, Player::Two),
            None
        );
    }

    #[test]
    fn test_exact_landing_marks_done() {
        let cfg = cfg();
        let own = place(&Pieces::new(), 1, PiecePosition::OnBoard(25));

        let outcome = move_piece(&cfg, PieceId::new(1), Roll::new(2), &own, &Pieces::new(), Player::One);

        assert!(outcome.moved);
        assert_eq!(outcome.to, None);
        assert!(outcome.own.get(PieceId::new(1)).unwrap().completed());
    }

    #[test]
    fn test_finishing_move_captures_nothing() {
        let cfg = cfg();
        let own = place(&Pieces::new(), 0, PiecePosition::OnBoard(25));
        // Player two at offset 13 occupies cell 27, under player one's
        // terminal offset. Finishing leaves the board over it.
        let opponent = place(&Pieces::new(), 0, PiecePosition::OnBoard(13));

        let outcome = move_piece(&cfg, PieceId::new(0), Roll::new(2), &own, &opponent, Player::One);

        assert!(outcome.moved);
        assert_eq!(outcome.knocked_out, None);
        assert_eq!(outcome.opponent, opponent);
    }

    #[test]
    fn test_illegal_move_is_a_no_op() {
        let cfg = cfg();
        let own = place(&Pieces::new(), 0, PiecePosition::OnBoard(25));
        let opponent = place(&Pieces::new(), 0, PiecePosition::OnBoard(10));

        // Roll 4 overshoots from 25.
        let outcome = move_piece(&cfg, PieceId::new(0), Roll::new(4), &own, &opponent, Player::One);

        assert!(!outcome.moved);
        assert_eq!(outcome.own, own);
        assert_eq!(outcome.opponent, opponent);
        assert_eq!(outcome.knocked_out, None);
    }
}
