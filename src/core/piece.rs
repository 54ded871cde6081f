//! Pieces and their board positions.
//!
//! Each player owns exactly [`PIECES_PER_PLAYER`] pieces for the life of a
//! match. A piece is in the yard (off board), somewhere along its owner's
//! path, or done. "Done" is only ever produced by an exact landing on the
//! terminal path offset, so the completed-iff-on-terminal invariant holds
//! by construction and needs no separate flag.

use serde::{Deserialize, Serialize};

/// Pieces per player, fixed by the game.
pub const PIECES_PER_PLAYER: usize = 4;

/// Piece identifier, unique within one player's set (0..4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u8);

impl PieceId {
    /// Create a new piece ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// Where a piece is, in its owner's logical path space.
///
/// `OnBoard` carries the 0-based path offset; the board configuration maps
/// offsets to shared board cells for collision and safe-cell tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PiecePosition {
    /// Off the board, waiting for an entry roll.
    Yard,
    /// On the board at the given path offset.
    OnBoard(u16),
    /// Finished the full path with an exact landing.
    Done,
}

impl PiecePosition {
    /// Path offset if the piece is on the board.
    #[must_use]
    pub fn offset(self) -> Option<u16> {
        match self {
            PiecePosition::OnBoard(offset) => Some(offset),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_yard(self) -> bool {
        matches!(self, PiecePosition::Yard)
    }

    #[must_use]
    pub fn is_done(self) -> bool {
        matches!(self, PiecePosition::Done)
    }
}

/// A single piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub position: PiecePosition,
}

impl Piece {
    /// A fresh piece in the yard.
    #[must_use]
    pub const fn new(id: PieceId) -> Self {
        Self {
            id,
            position: PiecePosition::Yard,
        }
    }

    /// Has this piece finished its path?
    #[must_use]
    pub fn completed(&self) -> bool {
        self.position.is_done()
    }
}

/// One player's full piece set, in ID order.
///
/// The set is a value type: resolver code builds updated copies rather
/// than mutating a shared collection, so stale snapshots stay intact for
/// concurrent re-validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pieces([Piece; PIECES_PER_PLAYER]);

impl Pieces {
    /// All four pieces in the yard.
    #[must_use]
    pub fn new() -> Self {
        Self([
            Piece::new(PieceId::new(0)),
            Piece::new(PieceId::new(1)),
            Piece::new(PieceId::new(2)),
            Piece::new(PieceId::new(3)),
        ])
    }

    /// Look up a piece by ID. Returns `None` for IDs outside 0..4.
    #[must_use]
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.0.get(id.raw() as usize)
    }

    /// Iterate over the pieces in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.0.iter()
    }

    /// Have all four pieces finished?
    #[must_use]
    pub fn all_done(&self) -> bool {
        self.0.iter().all(Piece::completed)
    }

    /// Copy of this set with one piece moved to `position`.
    #[must_use]
    pub fn with_position(&self, id: PieceId, position: PiecePosition) -> Self {
        let mut next = self.clone();
        if let Some(piece) = next.0.get_mut(id.raw() as usize) {
            piece.position = position;
        }
        next
    }
}

impl Default for Pieces {
    fn default() -> Self {
        Self::new()
    }
}
