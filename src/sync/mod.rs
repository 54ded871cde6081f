//! Boundary contracts: persistence and peer notification.
//!
//! These seams are how the pure engine meets the outside world. The store
//! enforces single-writer-per-turn with versioned compare-and-swap saves;
//! the broadcaster fans accepted snapshots out best-effort. The engine
//! itself never touches either, the embedding layer wires them together.

pub mod broadcast;
pub mod store;

pub use broadcast::{Broadcaster, ChannelBroadcaster, NullBroadcaster};
pub use store::{GameStore, MemoryStore, RoomCode, StoreError, Versioned};
