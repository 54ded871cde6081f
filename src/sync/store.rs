//! Persistence seam: versioned load and compare-and-swap save.
//!
//! The engine assumes it always runs against the authoritative latest
//! snapshot. That assumption is enforced here: a save carries the version
//! the caller loaded, and the store rejects it if someone else saved in
//! between. A move computed against a stale snapshot surfaces as
//! [`StoreError::Conflict`] and the caller reloads, it is never silently
//! applied.
//!
//! [`MemoryStore`] is the in-process implementation used by tests and by
//! embeddings that do not need durable storage. Production embeddings
//! implement [`GameStore`] over their own database.

use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

use crate::core::GameState;

/// Room code length in characters.
const ROOM_CODE_LEN: usize = 6;

/// Alphabet for room codes. Ambiguous characters (0/O, 1/I) are omitted
/// because players read these codes aloud.
const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Shareable identifier for one match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomCode(String);

impl RoomCode {
    /// Generate a fresh random code.
    #[must_use]
    pub fn generate(rng: &mut impl Rng) -> Self {
        let code = (0..ROOM_CODE_LEN)
            .map(|_| ROOM_CODE_ALPHABET[rng.gen_range(0..ROOM_CODE_ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Parse a user-supplied code, normalizing case.
    ///
    /// Returns `None` unless the input is exactly six characters from the
    /// code alphabet.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let upper = input.trim().to_ascii_uppercase();
        if upper.len() == ROOM_CODE_LEN
            && upper.bytes().all(|b| ROOM_CODE_ALPHABET.contains(&b))
        {
            Some(Self(upper))
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored value together with its store version.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub value: T,
    pub version: u64,
}

/// Why a store operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The room does not exist.
    NotFound,
    /// A room with this code already exists.
    AlreadyExists,
    /// The stored version moved past the one the caller loaded.
    Conflict { expected: u64, actual: u64 },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound => f.write_str("room not found"),
            StoreError::AlreadyExists => f.write_str("room already exists"),
            StoreError::Conflict { expected, actual } => {
                write!(f, "version conflict: expected {expected}, stored {actual}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Persistence contract for match state.
///
/// `save_if_unchanged` must be atomic per room: at most one save per
/// loaded version succeeds, which gives the engine its
/// single-writer-per-turn guarantee.
pub trait GameStore {
    /// Create a room. Fails if the code is taken.
    fn create(&self, room: &RoomCode, state: GameState) -> Result<u64, StoreError>;

    /// Load the current snapshot and its version.
    fn load(&self, room: &RoomCode) -> Option<Versioned<GameState>>;

    /// Save a new snapshot if the stored version still equals `expected`.
    ///
    /// Returns the new version on success.
    fn save_if_unchanged(
        &self,
        room: &RoomCode,
        state: GameState,
        expected: u64,
    ) -> Result<u64, StoreError>;
}

/// In-memory `GameStore` with real compare-and-swap semantics.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rooms: Mutex<FxHashMap<RoomCode, Versioned<GameState>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FxHashMap<RoomCode, Versioned<GameState>>> {
        // State stays consistent under poisoning: every mutation happens
        // while the lock is held and completes in one step.
        self.rooms.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GameStore for MemoryStore {
    fn create(&self, room: &RoomCode, state: GameState) -> Result<u64, StoreError> {
        let mut rooms = self.lock();
        if rooms.contains_key(room) {
            return Err(StoreError::AlreadyExists);
        }
        rooms.insert(
            room.clone(),
            Versioned {
                value: state,
                version: 1,
            },
        );
        Ok(1)
    }

    fn load(&self, room: &RoomCode) -> Option<Versioned<GameState>> {
        self.lock().get(room).cloned()
    }

    fn save_if_unchanged(
        &self,
        room: &RoomCode,
        state: GameState,
        expected: u64,
    ) -> Result<u64, StoreError> {
        let mut rooms = self.lock();
        let entry = rooms.get_mut(room).ok_or(StoreError::NotFound)?;

        if entry.version != expected {
            return Err(StoreError::Conflict {
                expected,
                actual: entry.version,
            });
        }

        entry.value = state;
        entry.version += 1;
        Ok(entry.version)
    }
}
