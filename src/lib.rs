//! # pancha-keliya
//!
//! A deterministic rules engine for Pancha Keliya, a traditional Sri
//! Lankan race-and-capture board game for two players.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: Every rules function takes an explicit state
//!    snapshot and returns a new one. The move-proposing client and the
//!    move-validating server run the identical code, so they can never
//!    disagree about a legal move.
//!
//! 2. **Configuration over convention**: Board geometry, safe cells,
//!    bonus-roll sets and the roll distribution live in a `BoardConfig`
//!    chosen at match creation, never hardcoded in the rules.
//!
//! 3. **Copy-on-write resolution**: The resolver returns fresh piece
//!    sets rather than mutating shared ones, keeping stale snapshots
//!    intact for concurrent re-validation.
//!
//! ## Modules
//!
//! - `core`: players, pieces, rolls, match state
//! - `board`: board geometry and per-variant rule configuration
//! - `rules`: legality, movement, knockouts, the turn state machine
//! - `sync`: persistence and notification seams (versioned store,
//!   broadcaster, room codes)
//!
//! ## Example
//!
//! ```
//! use pancha_keliya::board::BoardConfig;
//! use pancha_keliya::core::{FixedRolls, Player};
//! use pancha_keliya::rules::Game;
//!
//! let game = Game::new(BoardConfig::cowrie_circuit());
//! let mut state = game.new_state(Player::One);
//! let mut rolls = FixedRolls::new(&[5]);
//!
//! game.roll(&mut state, &mut rolls)?;
//! let legal = game.available_moves(&state);
//! game.choose_piece(&mut state, legal[0])?;
//!
//! // 5 grants a bonus turn on the cowrie board.
//! assert_eq!(state.current_player, Some(Player::One));
//! # Ok::<(), pancha_keliya::rules::TurnError>(())
//! ```

pub mod board;
pub mod core;
pub mod rules;
pub mod sync;

// Re-export commonly used types
pub use crate::board::{BoardConfig, Cell};
pub use crate::core::{
    FixedRolls, GameState, Piece, PieceId, PiecePosition, Pieces, Player, Roll, RollKind, RollRng,
    RollRngState, RollSource, TurnPhase, TurnRecord, PIECES_PER_PLAYER,
};
pub use crate::rules::{
    available_moves, can_knock_out, can_make_move, is_valid_move, move_piece, next_position, Game,
    MoveOutcome, TurnError,
};
pub use crate::sync::{
    Broadcaster, ChannelBroadcaster, GameStore, MemoryStore, NullBroadcaster, RoomCode, StoreError,
    Versioned,
};
