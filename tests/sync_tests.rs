//! Embedding-layer flow: versioned persistence plus broadcast fan-out.
//!
//! These tests drive the engine the way a game server does: load the
//! authoritative snapshot, re-validate and apply a proposed action, save
//! with compare-and-swap, broadcast the accepted snapshot. Stale writers
//! must lose the race and reload.

use pancha_keliya::board::BoardConfig;
use pancha_keliya::core::{FixedRolls, GameState, Player, TurnPhase};
use pancha_keliya::rules::Game;
use pancha_keliya::sync::{
    Broadcaster, ChannelBroadcaster, GameStore, MemoryStore, RoomCode, StoreError,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn new_room(seed: u64) -> RoomCode {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    RoomCode::generate(&mut rng)
}

/// One accepted mutation per logical turn: apply an action against the
/// loaded snapshot and save it conditioned on the loaded version.
fn submit<F>(
    store: &MemoryStore,
    broadcaster: &impl Broadcaster,
    room: &RoomCode,
    action: F,
) -> Result<u64, StoreError>
where
    F: FnOnce(&mut GameState),
{
    let loaded = store.load(room).ok_or(StoreError::NotFound)?;
    let mut state = loaded.value;
    action(&mut state);
    let version = store.save_if_unchanged(room, state.clone(), loaded.version)?;
    broadcaster.broadcast(room, &state);
    Ok(version)
}

#[test]
fn full_turn_round_trips_through_the_store() {
    let game = Game::new(BoardConfig::cowrie_circuit());
    let store = MemoryStore::new();
    let (broadcaster, rx) = ChannelBroadcaster::new();
    let room = new_room(7);

    store.create(&room, game.new_state(Player::One)).unwrap();

    // Player one rolls and enters a piece; each step is one store write.
    submit(&store, &broadcaster, &room, |state| {
        let mut rolls = FixedRolls::new(&[5]);
        game.roll(state, &mut rolls).unwrap();
    })
    .unwrap();

    submit(&store, &broadcaster, &room, |state| {
        let legal = game.available_moves(state);
        game.choose_piece(state, legal[0]).unwrap();
    })
    .unwrap();

    // The other peer sees both snapshots in order.
    let (_, after_roll) = rx.recv().unwrap();
    assert_eq!(after_roll.phase, TurnPhase::AwaitingPiece);
    let (_, after_move) = rx.recv().unwrap();
    assert_eq!(after_move.phase, TurnPhase::AwaitingRoll);
    assert_eq!(after_move.current_player, Some(Player::One)); // 5 = bonus

    assert_eq!(store.load(&room).unwrap().version, 3);
}

#[test]
fn stale_writer_is_rejected_not_merged() {
    let game = Game::new(BoardConfig::cowrie_circuit());
    let store = MemoryStore::new();
    let room = new_room(8);

    store.create(&room, game.new_state(Player::One)).unwrap();

    // Both "browsers" load version 1.
    let a = store.load(&room).unwrap();
    let b = store.load(&room).unwrap();

    // Writer A resolves a roll and wins the race.
    let mut state_a = a.value;
    let mut rolls = FixedRolls::new(&[5]);
    game.roll(&mut state_a, &mut rolls).unwrap();
    store.save_if_unchanged(&room, state_a, a.version).unwrap();

    // Writer B computed against the stale snapshot; the save must fail
    // rather than silently apply.
    let mut state_b = b.value;
    let mut rolls = FixedRolls::new(&[3]);
    game.roll(&mut state_b, &mut rolls).unwrap();
    assert_eq!(
        store.save_if_unchanged(&room, state_b, b.version),
        Err(StoreError::Conflict {
            expected: 1,
            actual: 2
        })
    );

    // B reconciles by reloading the authoritative state.
    let fresh = store.load(&room).unwrap();
    assert_eq!(fresh.value.last_roll.map(|r| r.value()), Some(5));
}

#[test]
fn snapshot_survives_the_wire_format() {
    // The persisted value is plain serde data; a server written against a
    // JSON column round-trips it losslessly.
    let game = Game::new(BoardConfig::dual_path());
    let mut state = game.new_state(Player::Two);
    let mut rolls = FixedRolls::new(&[5, 1]);
    game.roll(&mut state, &mut rolls).unwrap();
    let legal = game.available_moves(&state);
    game.choose_piece(&mut state, legal[0]).unwrap();

    let json = serde_json::to_string(&state).unwrap();
    let back: GameState = serde_json::from_str(&json).unwrap();

    assert_eq!(back.current_player, state.current_player);
    assert_eq!(back.phase, state.phase);
    assert_eq!(back.history().len(), state.history().len());
    for player in Player::both() {
        assert_eq!(back.pieces(player), state.pieces(player));
    }
}

#[test]
fn room_lifecycle() {
    let store = MemoryStore::new();
    let room = new_room(9);

    assert!(store.load(&room).is_none());
    store.create(&room, GameState::new()).unwrap();
    assert_eq!(
        store.create(&room, GameState::new()),
        Err(StoreError::AlreadyExists)
    );

    // Codes parse back from user input regardless of case.
    let parsed = RoomCode::parse(&room.as_str().to_ascii_lowercase()).unwrap();
    assert_eq!(parsed, room);
    assert!(store.load(&parsed).is_some());
}
