//! Core engine types: players, pieces, rolls, match state.
//!
//! These are the building blocks the rules functions operate on. Board
//! layouts live in `crate::board`; nothing here knows about a specific
//! variant.

pub mod piece;
pub mod player;
pub mod roll;
pub mod state;

pub use piece::{Piece, PieceId, PiecePosition, Pieces, PIECES_PER_PLAYER};
pub use player::Player;
pub use roll::{FixedRolls, Roll, RollKind, RollRng, RollRngState, RollSource};
pub use state::{GameState, TurnPhase, TurnRecord};
