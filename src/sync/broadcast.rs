//! Notification seam: fanning a new snapshot out to the other peer.
//!
//! Delivery is at-most-once and best-effort; a peer that misses an update
//! reconciles by reloading the authoritative snapshot from the store. The
//! engine therefore never retries a broadcast.

use super::store::RoomCode;
use crate::core::GameState;

/// Fan a new snapshot out to the other participants in a room.
pub trait Broadcaster {
    fn broadcast(&self, room: &RoomCode, state: &GameState);
}

/// Broadcaster that drops every update.
///
/// For single-process embeddings and tests where peers poll the store.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBroadcaster;

impl Broadcaster for NullBroadcaster {
    fn broadcast(&self, _room: &RoomCode, _state: &GameState) {}
}

/// Broadcaster that sends snapshots over an mpsc channel.
///
/// A send to a disconnected receiver is silently dropped, matching the
/// best-effort contract.
#[derive(Clone, Debug)]
pub struct ChannelBroadcaster {
    tx: std::sync::mpsc::Sender<(RoomCode, GameState)>,
}

impl ChannelBroadcaster {
    /// Create a broadcaster and the receiving end for its updates.
    #[must_use]
    pub fn new() -> (Self, std::sync::mpsc::Receiver<(RoomCode, GameState)>) {
        let (tx, rx) = std::sync::mpsc::channel();
        (Self { tx }, rx)
    }
}

impl Broadcaster for ChannelBroadcaster {
    fn broadcast(&self, room: &RoomCode, state: &GameState) {
        let _ = self.tx.send((room.clone(), state.clone()));
    }
}
