//! Match state: the single serializable value shared between peers.
//!
//! `GameState` is the whole observable match. It is `Clone + Serialize` so
//! the embedding layer can persist it, broadcast it, and re-validate a
//! proposed move against a fresh copy. The turn history uses a persistent
//! vector so snapshot clones stay O(1) however long the match runs.
//!
//! The state machine per player-turn:
//!
//! ```text
//! AwaitingRoll -> (roll drawn) -> AwaitingPiece
//!   -> (legal piece chosen, or forced pass) -> AwaitingRoll | GameOver
//! ```
//!
//! `GameOver` is terminal. Once `winner` is set the pieces are frozen and
//! every further driver call is rejected.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::piece::{PieceId, Pieces};
use super::player::Player;
use super::roll::Roll;
use crate::board::Cell;

/// Where a match is within one player-turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the current player to throw.
    AwaitingRoll,
    /// A roll is pending and must be consumed by a move or a pass.
    AwaitingPiece,
    /// A player has finished all four pieces; the state is frozen.
    GameOver,
}

/// One resolved turn, recorded for history and last-move display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Who threw.
    pub player: Player,
    /// The roll that was consumed.
    pub roll: Roll,
    /// The piece that moved, or `None` for a forced pass.
    pub piece: Option<PieceId>,
    /// Cell the piece left, `None` when it entered from the yard.
    pub from: Option<Cell>,
    /// Cell the piece landed on, `None` when it finished or passed.
    pub to: Option<Cell>,
    /// Opponent piece sent back to the yard, if any.
    pub knocked_out: Option<PieceId>,
    /// Turn number at resolution time.
    pub turn: u32,
}

/// Complete match state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Current position in the per-turn state machine.
    pub phase: TurnPhase,

    /// Whose turn it is. `None` until the match starts.
    pub current_player: Option<Player>,

    /// Both piece sets, indexed by `Player::index()`.
    pieces: [Pieces; 2],

    /// Pending roll awaiting a piece selection or a pass.
    pub last_roll: Option<Roll>,

    /// Set exactly when all four of that player's pieces are done.
    pub winner: Option<Player>,

    /// Current turn number, starting at 1.
    pub turn_number: u32,

    /// Every resolved turn, oldest first.
    history: Vector<TurnRecord>,
}

impl GameState {
    /// A fresh match: all pieces in the yard, nobody's turn yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: TurnPhase::AwaitingRoll,
            current_player: None,
            pieces: [Pieces::new(), Pieces::new()],
            last_roll: None,
            winner: None,
            turn_number: 1,
            history: Vector::new(),
        }
    }

    /// Start the match with the given player to throw first.
    pub fn start(&mut self, first: Player) {
        self.current_player = Some(first);
    }

    /// A player's piece set.
    #[must_use]
    pub fn pieces(&self, player: Player) -> &Pieces {
        &self.pieces[player.index()]
    }

    /// Replace a player's piece set.
    ///
    /// During play only the turn driver calls this; it is public so
    /// embeddings and tests can assemble snapshots directly.
    pub fn set_pieces(&mut self, player: Player, pieces: Pieces) {
        self.pieces[player.index()] = pieces;
    }

    /// All resolved turns, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    /// The most recently resolved turn, for last-move display.
    #[must_use]
    pub fn last_record(&self) -> Option<&TurnRecord> {
        self.history.last()
    }

    /// Append a resolved turn and advance the turn counter.
    pub(crate) fn record(&mut self, record: TurnRecord) {
        self.history.push_back(record);
        self.turn_number += 1;
    }

    /// Has a player won?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
