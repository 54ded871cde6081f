//! The turn driver: rolls, piece selections, passes, win detection.
//!
//! `Game` owns a board configuration and drives a `GameState` through the
//! per-turn state machine. It is the only writer of `GameState` and the
//! piece it exposes to the embedding layer: a server re-validating a
//! client's proposed move simply replays the same driver call against the
//! authoritative snapshot and compares outcomes.
//!
//! Illegal or out-of-phase proposals come back as [`TurnError`] values,
//! never panics, because they are expected from untrusted peers.

use smallvec::SmallVec;

use super::legality::{available_moves, can_make_move, is_valid_move};
use super::resolver::move_piece;
use crate::board::BoardConfig;
use crate::core::{GameState, PieceId, Player, Roll, RollSource, TurnPhase, TurnRecord};

/// Why a driver call was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnError {
    /// The match has no current player yet.
    NotStarted,
    /// A roll is already pending and must be consumed first.
    NotAwaitingRoll,
    /// No roll is pending to consume.
    NotAwaitingPiece,
    /// The proposed piece may not use the pending roll.
    IllegalPiece,
    /// A pass was proposed while a legal move exists.
    MovesAvailable,
    /// The match is over; the state is frozen.
    GameOver,
}

impl std::fmt::Display for TurnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            TurnError::NotStarted => "match has not started",
            TurnError::NotAwaitingRoll => "a roll is already pending",
            TurnError::NotAwaitingPiece => "no roll is pending",
            TurnError::IllegalPiece => "piece cannot use the pending roll",
            TurnError::MovesAvailable => "cannot pass while a legal move exists",
            TurnError::GameOver => "match is over",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for TurnError {}

/// Rules driver for one board variant.
#[derive(Clone, Debug)]
pub struct Game {
    config: BoardConfig,
}

impl Game {
    /// Create a driver for the given board.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self { config }
    }

    /// The board this driver plays on.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// A fresh state with the given player throwing first.
    #[must_use]
    pub fn new_state(&self, first: Player) -> GameState {
        let mut state = GameState::new();
        state.start(first);
        state
    }

    /// Draw a roll for the current player.
    ///
    /// Only legal in `AwaitingRoll`; the previous roll must have been
    /// consumed by a move or a pass.
    pub fn roll(
        &self,
        state: &mut GameState,
        source: &mut dyn RollSource,
    ) -> Result<Roll, TurnError> {
        self.expect_phase(state, TurnPhase::AwaitingRoll)?;
        if state.current_player.is_none() {
            return Err(TurnError::NotStarted);
        }

        let roll = source.roll(self.config.roll_kind());
        state.last_roll = Some(roll);
        state.phase = TurnPhase::AwaitingPiece;
        Ok(roll)
    }

    /// Pieces that may use the pending roll. Empty outside
    /// `AwaitingPiece`.
    #[must_use]
    pub fn available_moves(&self, state: &GameState) -> SmallVec<[PieceId; 4]> {
        let (Some(player), Some(roll)) = (state.current_player, state.last_roll) else {
            return SmallVec::new();
        };
        if state.phase != TurnPhase::AwaitingPiece {
            return SmallVec::new();
        }

        available_moves(
            &self.config,
            roll,
            state.pieces(player),
            state.pieces(player.opponent()),
            player,
        )
    }

    /// Consume the pending roll by moving the chosen piece.
    ///
    /// Applies the move, checks for a win, then passes or retains the
    /// turn by the bonus rule. Returns the resolved [`TurnRecord`].
    pub fn choose_piece(
        &self,
        state: &mut GameState,
        piece_id: PieceId,
    ) -> Result<TurnRecord, TurnError> {
        self.expect_phase(state, TurnPhase::AwaitingPiece)?;
        let player = state.current_player.ok_or(TurnError::NotStarted)?;
        let roll = state.last_roll.ok_or(TurnError::NotAwaitingPiece)?;

        let own = state.pieces(player);
        let opponent = state.pieces(player.opponent());

        let valid = own
            .get(piece_id)
            .is_some_and(|piece| is_valid_move(&self.config, piece, roll, own, opponent, player));
        if !valid {
            return Err(TurnError::IllegalPiece);
        }

        let outcome = move_piece(&self.config, piece_id, roll, own, opponent, player);
        debug_assert!(outcome.moved, "validated move must resolve");

        let record = TurnRecord {
            player,
            roll,
            piece: Some(piece_id),
            from: outcome.from,
            to: outcome.to,
            knocked_out: outcome.knocked_out,
            turn: state.turn_number,
        };

        let won = outcome.own.all_done();
        state.set_pieces(player, outcome.own);
        state.set_pieces(player.opponent(), outcome.opponent);
        state.last_roll = None;
        state.record(record.clone());

        if won {
            state.winner = Some(player);
            state.phase = TurnPhase::GameOver;
        } else {
            self.pass_turn(state, player, roll);
        }

        Ok(record)
    }

    /// Consume the pending roll without moving, when no legal move exists.
    ///
    /// The roll is still evaluated for a bonus turn, so a stuck player
    /// who throws a bonus value throws again.
    pub fn pass(&self, state: &mut GameState) -> Result<(), TurnError> {
        self.expect_phase(state, TurnPhase::AwaitingPiece)?;
        let player = state.current_player.ok_or(TurnError::NotStarted)?;
        let roll = state.last_roll.ok_or(TurnError::NotAwaitingPiece)?;

        if can_make_move(
            &self.config,
            roll,
            state.pieces(player),
            state.pieces(player.opponent()),
            player,
        ) {
            return Err(TurnError::MovesAvailable);
        }

        state.last_roll = None;
        state.record(TurnRecord {
            player,
            roll,
            piece: None,
            from: None,
            to: None,
            knocked_out: None,
            turn: state.turn_number,
        });
        self.pass_turn(state, player, roll);
        Ok(())
    }

    fn pass_turn(&self, state: &mut GameState, player: Player, roll: Roll) {
        if !self.config.grants_bonus_turn(roll) {
            state.current_player = Some(player.opponent());
        }
        state.phase = TurnPhase::AwaitingRoll;
    }

    fn expect_phase(&self, state: &GameState, phase: TurnPhase) -> Result<(), TurnError> {
        if state.phase == TurnPhase::GameOver {
            return Err(TurnError::GameOver);
        }
        if state.phase != phase {
            return Err(match phase {
                TurnPhase::AwaitingRoll => TurnError::NotAwaitingRoll,
                _ => TurnError::NotAwaitingPiece,
            });
        }
        Ok(())
    }
}
