//! Board geometry and per-variant rule configuration.
//!
//! The engine never hardcodes a board. A [`BoardConfig`] describes one
//! variant completely: how long each player's path is, which shared cell
//! each path offset maps to, which cells are safe, which roll values grant
//! bonus turns or permit entry, and which roll distribution is thrown.
//! Variants are selected at match creation, and the rules functions only
//! ever ask the config.
//!
//! Two traditional layouts ship as presets:
//!
//! - [`BoardConfig::cowrie_circuit`]: the short board. A single 28-cell
//!   circuit shared by both players, entered at opposite cells, thrown
//!   with six cowrie shells.
//! - [`BoardConfig::dual_path`]: the long board. A 144-cell shared circuit
//!   plus a private 6-cell home stretch per player (156 distinct cells),
//!   thrown with a die.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Player, Roll, RollKind};

/// A shared board cell identifier.
///
/// Cells are the coordinate space in which knockouts and safe squares are
/// tested. Both players' path tables map into the same cell space; cells
/// on a private home stretch simply never appear in the opponent's table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell(pub u16);

impl Cell {
    /// Create a new cell ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// Complete description of one board variant.
///
/// Immutable once built; the rules functions take it by reference.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Steps from entry to the terminal offset, inclusive.
    path_length: u16,
    /// Per-player path table: offset -> shared cell. Both tables have
    /// exactly `path_length` entries and each is injective.
    paths: [Vec<Cell>; 2],
    /// Cells where pieces cannot be knocked out.
    safe_cells: FxHashSet<Cell>,
    /// Roll values that grant the thrower another turn.
    bonus_rolls: Vec<u8>,
    /// Roll values that let a yard piece enter the board.
    entry_rolls: Vec<u8>,
    /// Distribution thrown each turn.
    roll_kind: RollKind,
}

impl BoardConfig {
    /// Build a custom board.
    ///
    /// ## Panics
    ///
    /// Panics if the path tables are empty or of unequal length. Board
    /// construction happens once at match creation, so a malformed layout
    /// is a programming error, not a runtime condition.
    #[must_use]
    pub fn new(
        paths: [Vec<Cell>; 2],
        safe_cells: impl IntoIterator<Item = Cell>,
        bonus_rolls: Vec<u8>,
        entry_rolls: Vec<u8>,
        roll_kind: RollKind,
    ) -> Self {
        assert!(!paths[0].is_empty(), "path table must not be empty");
        assert_eq!(
            paths[0].len(),
            paths[1].len(),
            "both players must have equal path lengths"
        );

        Self {
            path_length: paths[0].len() as u16,
            paths,
            safe_cells: safe_cells.into_iter().collect(),
            bonus_rolls,
            entry_rolls,
            roll_kind,
        }
    }

    /// The short traditional board: a 28-cell shared circuit.
    ///
    /// Players enter at opposite cells (0 and 14) and travel the full
    /// circuit; every seventh cell, including both entry cells, is safe.
    /// Thrown with six cowrie shells; 0, 1 and 5 grant another throw,
    /// 1 and 5 bring a piece out of the yard.
    #[must_use]
    pub fn cowrie_circuit() -> Self {
        const CIRCUIT: u16 = 28;

        let path_for = |start: u16| -> Vec<Cell> {
            (0..CIRCUIT).map(|o| Cell::new((start + o) % CIRCUIT)).collect()
        };

        Self::new(
            [path_for(0), path_for(14)],
            (0..CIRCUIT).step_by(7).map(Cell::new),
            vec![0, 1, 5],
            vec![1, 5],
            RollKind::Cowries { shells: 6 },
        )
    }

    /// The long board: 144 shared circuit cells plus a private 6-cell
    /// home stretch per player, 156 distinct cells in all.
    ///
    /// Shared cells are 1..=144; player one finishes through 145..=150,
    /// player two through 151..=156. Player two enters half-way around
    /// the circuit. Every sixth shared cell is safe. Thrown with a die;
    /// 1, 5 and 6 grant another throw, 1 and 5 bring a piece out.
    #[must_use]
    pub fn dual_path() -> Self {
        const CIRCUIT: u16 = 144;
        const STRETCH: u16 = 6;

        let path_for = |start: u16, stretch_base: u16| -> Vec<Cell> {
            let circuit = (0..CIRCUIT).map(move |o| Cell::new((start + o) % CIRCUIT + 1));
            let stretch = (0..STRETCH).map(move |o| Cell::new(stretch_base + o));
            circuit.chain(stretch).collect()
        };

        Self::new(
            [path_for(0, 145), path_for(72, 151)],
            (1..=CIRCUIT).filter(|c| c % 6 == 0).map(Cell::new),
            vec![1, 5, 6],
            vec![1, 5],
            RollKind::Die,
        )
    }

    /// Replace the bonus-roll set.
    ///
    /// Observed deployments disagree on the exact set, so it stays
    /// configurable rather than being reconciled silently.
    #[must_use]
    pub fn with_bonus_rolls(mut self, rolls: Vec<u8>) -> Self {
        self.bonus_rolls = rolls;
        self
    }

    /// Replace the entry-roll set.
    #[must_use]
    pub fn with_entry_rolls(mut self, rolls: Vec<u8>) -> Self {
        self.entry_rolls = rolls;
        self
    }

    /// Steps from entry to the terminal offset, inclusive.
    #[must_use]
    pub fn path_length(&self) -> u16 {
        self.path_length
    }

    /// The offset a piece must land on exactly to finish.
    #[must_use]
    pub fn terminal_offset(&self) -> u16 {
        self.path_length - 1
    }

    /// Map a player's path offset to the shared board cell.
    ///
    /// ## Panics
    ///
    /// Panics if `offset` is outside the path, which the rules functions
    /// never produce.
    #[must_use]
    pub fn cell_at(&self, player: Player, offset: u16) -> Cell {
        self.paths[player.index()][offset as usize]
    }

    /// The cell a player's pieces enter on.
    #[must_use]
    pub fn start_cell(&self, player: Player) -> Cell {
        self.cell_at(player, 0)
    }

    /// Is this cell immune to knockouts?
    #[must_use]
    pub fn is_safe(&self, cell: Cell) -> bool {
        self.safe_cells.contains(&cell)
    }

    /// Does this roll grant the thrower another turn?
    #[must_use]
    pub fn grants_bonus_turn(&self, roll: Roll) -> bool {
        self.bonus_rolls.contains(&roll.value())
    }

    /// Can this roll bring a yard piece onto the board?
    #[must_use]
    pub fn can_enter(&self, roll: Roll) -> bool {
        self.entry_rolls.contains(&roll.value())
    }

    /// Distribution thrown each turn.
    #[must_use]
    pub fn roll_kind(&self) -> RollKind {
        self.roll_kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cowrie_circuit_shape() {
        let cfg = BoardConfig::cowrie_circuit();

        assert_eq!(cfg.path_length(), 28);
        assert_eq!(cfg.terminal_offset(), 27);
        assert_eq!(cfg.start_cell(Player::One), Cell::new(0));
        assert_eq!(cfg.start_cell(Player::Two), Cell::new(14));
        assert_eq!(cfg.roll_kind(), RollKind::Cowries { shells: 6 });
    }

    #[test]
    fn test_cowrie_circuit_paths_cover_same_cells() {
        let cfg = BoardConfig::cowrie_circuit();

        // Both players traverse the identical shared circuit, offset by
        // half, so every cell of one path appears in the other.
        for offset in 0..cfg.path_length() {
            let cell = cfg.cell_at(Player::One, offset);
            assert!((0..cfg.path_length())
                .any(|o| cfg.cell_at(Player::Two, o) == cell));
        }
    }

    #[test]
    fn test_cowrie_safe_cells() {
        let cfg = BoardConfig::cowrie_circuit();

        for id in [0, 7, 14, 21] {
            assert!(cfg.is_safe(Cell::new(id)));
        }
        assert!(!cfg.is_safe(Cell::new(3)));
        // Both entry cells are safe.
        assert!(cfg.is_safe(cfg.start_cell(Player::One)));
        assert!(cfg.is_safe(cfg.start_cell(Player::Two)));
    }

    #[test]
    fn test_dual_path_shape() {
        let cfg = BoardConfig::dual_path();

        assert_eq!(cfg.path_length(), 150);
        assert_eq!(cfg.start_cell(Player::One), Cell::new(1));
        assert_eq!(cfg.start_cell(Player::Two), Cell::new(73));
        assert_eq!(cfg.roll_kind(), RollKind::Die);
    }

    #[test]
    fn test_dual_path_home_stretches_are_private() {
        let cfg = BoardConfig::dual_path();

        // The last six offsets of each path are cells the opponent's path
        // never visits.
        for offset in 144..150 {
            let p1_cell = cfg.cell_at(Player::One, offset);
            let p2_cell = cfg.cell_at(Player::Two, offset);
            assert!((0..150).all(|o| cfg.cell_at(Player::Two, o) != p1_cell));
            assert!((0..150).all(|o| cfg.cell_at(Player::One, o) != p2_cell));
        }
    }

    #[test]
    fn test_dual_path_cell_count() {
        let cfg = BoardConfig::dual_path();

        let mut cells = FxHashSet::default();
        for player in Player::both() {
            for offset in 0..cfg.path_length() {
                cells.insert(cfg.cell_at(player, offset));
            }
        }
        assert_eq!(cells.len(), 156);
    }

    #[test]
    fn test_paths_are_injective() {
        for cfg in [BoardConfig::cowrie_circuit(), BoardConfig::dual_path()] {
            for player in Player::both() {
                let cells: FxHashSet<_> =
                    (0..cfg.path_length()).map(|o| cfg.cell_at(player, o)).collect();
                assert_eq!(cells.len(), cfg.path_length() as usize);
            }
        }
    }

    #[test]
    fn test_roll_predicates() {
        let cfg = BoardConfig::cowrie_circuit();

        assert!(cfg.grants_bonus_turn(Roll::new(0)));
        assert!(cfg.grants_bonus_turn(Roll::new(1)));
        assert!(cfg.grants_bonus_turn(Roll::new(5)));
        assert!(!cfg.grants_bonus_turn(Roll::new(6)));

        assert!(cfg.can_enter(Roll::new(1)));
        assert!(cfg.can_enter(Roll::new(5)));
        assert!(!cfg.can_enter(Roll::new(0)));
        assert!(!cfg.can_enter(Roll::new(3)));
    }

    #[test]
    fn test_roll_set_overrides() {
        let cfg = BoardConfig::dual_path()
            .with_bonus_rolls(vec![6])
            .with_entry_rolls(vec![6]);

        assert!(cfg.grants_bonus_turn(Roll::new(6)));
        assert!(!cfg.grants_bonus_turn(Roll::new(1)));
        assert!(cfg.can_enter(Roll::new(6)));
        assert!(!cfg.can_enter(Roll::new(5)));
    }

    #[test]
    fn test_config_serde_round_trip() {
        let cfg = BoardConfig::cowrie_circuit();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: BoardConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.path_length(), cfg.path_length());
        assert_eq!(back.start_cell(Player::Two), cfg.start_cell(Player::Two));
        assert!(back.is_safe(Cell::new(7)));
    }

    #[test]
    #[should_panic(expected = "equal path lengths")]
    fn test_unequal_paths_rejected() {
        let _ = BoardConfig::new(
            [vec![Cell::new(0)], vec![Cell::new(0), Cell::new(1)]],
            [],
            vec![],
            vec![],
            RollKind::Die,
        );
    }
}
