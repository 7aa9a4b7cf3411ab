//! Powerup kinds and per-lobby powerup state (spec.md §4.4), including the
//! SHUFFLE x LOCK board-divergence interaction.

use crate::board::Board;
use crate::core::{BLOCKOUT_CELL_COUNT, FREEZE_BONUS_SECONDS};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerupKind {
    Freeze,
    Blockout,
    Shuffle,
    Lock,
}

impl PowerupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Freeze => "freeze",
            PowerupKind::Blockout => "blowup",
            PowerupKind::Shuffle => "shuffle",
            PowerupKind::Lock => "lock",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "freeze" => Some(PowerupKind::Freeze),
            "blowup" => Some(PowerupKind::Blockout),
            "shuffle" => Some(PowerupKind::Shuffle),
            "lock" => Some(PowerupKind::Lock),
            _ => None,
        }
    }

    /// The three kinds sampled on a long word; LOCK is never earned this
    /// way (spec design note, preserved deliberately).
    pub const EARNABLE: [PowerupKind; 3] = [
        PowerupKind::Freeze,
        PowerupKind::Blockout,
        PowerupKind::Shuffle,
    ];
}

pub struct PowerupState {
    pub freeze_deadlines: HashMap<String, Instant>,
    pub blocked_cells: HashSet<(usize, usize)>,
    pub blocked_until: Option<Instant>,
    pub armed_locks: HashMap<String, Board>,
    pub player_board_overrides: HashMap<String, Board>,
}

impl Default for PowerupState {
    fn default() -> Self {
        Self {
            freeze_deadlines: HashMap::new(),
            blocked_cells: HashSet::new(),
            blocked_until: None,
            armed_locks: HashMap::new(),
            player_board_overrides: HashMap::new(),
        }
    }
}

impl PowerupState {
    /// Records an advisory freeze deadline; the actual bonus-time credit
    /// is applied directly to the player by the caller.
    pub fn record_freeze(&mut self, player_id: &str, now: Instant) {
        self.freeze_deadlines.insert(
            player_id.to_string(),
            now + std::time::Duration::from_secs(FREEZE_BONUS_SECONDS as u64),
        );
    }

    /// Picks `BLOCKOUT_CELL_COUNT` distinct random cells and marks them
    /// blocked for `BLOCKOUT_DURATION_SECONDS`.
    pub fn apply_blockout(
        &mut self,
        board_size: usize,
        now: Instant,
        rng: &mut impl Rng,
    ) -> Vec<(usize, usize)> {
        let mut cells = HashSet::new();
        while cells.len() < BLOCKOUT_CELL_COUNT {
            cells.insert((rng.random_range(0..board_size), rng.random_range(0..board_size)));
        }
        self.blocked_cells = cells.clone();
        self.blocked_until =
            Some(now + std::time::Duration::from_secs(crate::core::BLOCKOUT_DURATION_SECONDS));
        let mut cells: Vec<(usize, usize)> = cells.into_iter().collect();
        cells.sort();
        cells
    }

    pub fn clear_expired_blockout(&mut self, now: Instant) {
        if let Some(until) = self.blocked_until {
            if now >= until {
                self.blocked_cells.clear();
                self.blocked_until = None;
            }
        }
    }

    /// Arming is idempotent: a second arm before the next shuffle just
    /// replaces the snapshot.
    pub fn arm_lock(&mut self, player_id: &str, snapshot: Board) {
        self.armed_locks.insert(player_id.to_string(), snapshot);
    }

    /// Promotes every currently armed lock to a board override and clears
    /// overrides left over from a previous shuffle, since divergence is
    /// re-decided fresh on every shuffle (spec.md §4.4 step 2-3).
    pub fn apply_shuffle(&mut self) -> (Vec<String>, HashMap<String, Board>) {
        self.player_board_overrides.clear();
        for (player_id, snapshot) in self.armed_locks.drain() {
            self.player_board_overrides.insert(player_id, snapshot);
        }
        let mut protected: Vec<String> = self.player_board_overrides.keys().cloned().collect();
        protected.sort();
        (protected, self.player_board_overrides.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::generate_board;

    #[test]
    fn shuffle_promotes_armed_lock_and_clears_stale_override() {
        let mut state = PowerupState::default();
        let stale = generate_board(4);
        state.player_board_overrides.insert("stale".to_string(), stale);

        let snapshot = generate_board(4);
        state.arm_lock("a", snapshot.clone());
        let (protected, boards) = state.apply_shuffle();

        assert_eq!(protected, vec!["a".to_string()]);
        assert_eq!(boards.get("a"), Some(&snapshot));
        assert!(!state.player_board_overrides.contains_key("stale"));
        assert!(state.armed_locks.is_empty());
    }

    #[test]
    fn blockout_picks_distinct_cells_within_bounds() {
        let mut state = PowerupState::default();
        let mut rng = rand::rng();
        let cells = state.apply_blockout(4, Instant::now(), &mut rng);
        assert_eq!(cells.len(), BLOCKOUT_CELL_COUNT);
        assert!(cells.iter().all(|&(r, c)| r < 4 && c < 4));
    }

    #[test]
    fn powerup_kind_round_trips_through_wire_strings() {
        for kind in [
            PowerupKind::Freeze,
            PowerupKind::Blockout,
            PowerupKind::Shuffle,
            PowerupKind::Lock,
        ] {
            assert_eq!(PowerupKind::parse(kind.as_str()), Some(kind));
        }
    }
}
