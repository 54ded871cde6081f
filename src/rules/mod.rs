//! The rules engine: pure transition functions plus the turn driver.
//!
//! - `movement`: the exact-landing position function
//! - `legality`: which pieces may use a pending roll
//! - `resolver`: applying a move, knockouts, completion
//! - `game`: the per-turn state machine, bonus turns, win detection
//!
//! Everything here is deterministic and side-effect free given a roll;
//! client and server run the identical code against their own snapshots.

pub mod game;
pub mod legality;
pub mod movement;
pub mod resolver;

pub use game::{Game, TurnError};
pub use legality::{available_moves, can_make_move, is_valid_move};
pub use movement::next_position;
pub use resolver::{can_knock_out, move_piece, MoveOutcome};
