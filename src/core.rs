//! Shared constants and small helpers used across the game engine.

use rand::Rng;

/// Maximum players seated in a single lobby.
pub const LOBBY_CAPACITY: usize = 10;

/// Length of the pre-round countdown, in seconds.
pub const COUNTDOWN_SECONDS: u32 = 3;

/// Main timer for a size-4 board.
pub const MAIN_TIMER_SMALL_BOARD: u32 = 120;

/// Main timer for size-5 and size-6 boards.
pub const MAIN_TIMER_LARGE_BOARD: u32 = 180;

/// Minimum word length accepted anywhere in the pipeline.
pub const MIN_WORD_LENGTH: usize = 3;

/// Words at or above this length earn a random powerup.
pub const POWERUP_WORD_LENGTH: usize = 5;

/// Bonus time credited by FREEZE.
pub const FREEZE_BONUS_SECONDS: u32 = 10;

/// Cells blocked by BLOCKOUT.
pub const BLOCKOUT_CELL_COUNT: usize = 4;

/// How long BLOCKOUT cells stay blocked.
pub const BLOCKOUT_DURATION_SECONDS: u64 = 8;

/// Retry budget for board generation before falling back to the repair pass.
pub const BOARD_GENERATION_ATTEMPTS: usize = 30;

/// Attempt cap for the landlocked-consonant repair loop.
pub const LANDLOCKED_REPAIR_ATTEMPTS: usize = 50;

/// Attempt cap for the Q-without-U repair loop.
pub const Q_WITHOUT_U_REPAIR_ATTEMPTS: usize = 20;

/// Depth cap for the board solver's DFS.
pub const SOLVER_DEPTH_CAP: usize = 15;

/// Upper bound on leaderboard query size.
pub const LEADERBOARD_MAX: usize = 50;

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a short, human-shareable lobby id, e.g. `"7QK2M9XA"`.
pub fn short_lobby_id() -> String {
    let mut rng = rand::rng();
    (0..8)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lobby_id_is_eight_uppercase_alphanumerics() {
        let id = short_lobby_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}
