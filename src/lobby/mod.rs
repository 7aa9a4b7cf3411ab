mod actor;
mod engine;
mod powerups;
mod state;

pub use actor::{spawn, LobbyCommand, LobbyHandle};
pub use powerups::PowerupKind;
pub use state::{Lobby, Player, Status};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::DictionaryProvider;

    fn lobby_with_two_players() -> Lobby {
        let mut lobby = Lobby::new("TESTLOBBY".to_string());
        engine::join(&mut lobby, "a", "Ada".to_string(), "fox".to_string(), Some("1.1.1.1".to_string()));
        engine::join(&mut lobby, "b", "Bo".to_string(), "owl".to_string(), Some("2.2.2.2".to_string()));
        lobby
    }

    #[test]
    fn first_joiner_becomes_host() {
        let lobby = lobby_with_two_players();
        assert_eq!(lobby.host_id, "a");
    }

    #[test]
    fn all_ready_starts_countdown() {
        let mut lobby = lobby_with_two_players();
        engine::toggle_ready(&mut lobby, "a");
        assert!(!engine::ready_to_start(&lobby));
        engine::toggle_ready(&mut lobby, "b");
        assert!(engine::ready_to_start(&lobby));
        engine::start_countdown(&mut lobby);
        assert_eq!(lobby.status, Status::Countdown);
        assert!(lobby.board.is_some());
        assert_eq!(lobby.challenges.len(), 37);
    }

    #[test]
    fn host_departure_reassigns_to_oldest_remaining_player() {
        let mut lobby = lobby_with_two_players();
        engine::join(&mut lobby, "c", "Cy".to_string(), "cat".to_string(), None);
        assert!(!engine::leave(&mut lobby, "a"));
        assert_eq!(lobby.host_id, "b");
    }

    #[test]
    fn last_player_leaving_empties_the_lobby() {
        let mut lobby = Lobby::new("SOLO".to_string());
        engine::join(&mut lobby, "a", "Ada".to_string(), "fox".to_string(), None);
        assert!(engine::leave(&mut lobby, "a"));
    }

    #[test]
    fn submit_word_rejects_before_playing() {
        let mut lobby = lobby_with_two_players();
        let dict = DictionaryProvider::new(vec!["CAT"]);
        let mut rng = rand::rng();
        let outcome = engine::submit_word(&mut lobby, &dict, "a", "CAT", &[(0, 0), (0, 1), (1, 0)], &mut rng);
        assert!(matches!(outcome, Err(engine::SubmitRejection::NotInProgress)));
    }

    #[test]
    fn shuffle_diverges_boards_for_players_with_armed_locks() {
        let mut lobby = lobby_with_two_players();
        engine::toggle_ready(&mut lobby, "a");
        engine::toggle_ready(&mut lobby, "b");
        engine::start_countdown(&mut lobby);
        engine::start_playing(&mut lobby);

        let original_board = lobby.board.clone().unwrap();
        lobby.player_mut("a").unwrap().powerups.push(PowerupKind::Lock);
        lobby.player_mut("b").unwrap().powerups.push(PowerupKind::Shuffle);

        let mut rng = rand::rng();
        let now = std::time::Instant::now();
        let lock_outcome = engine::use_powerup(&mut lobby, "a", PowerupKind::Lock, now, &mut rng);
        assert!(matches!(lock_outcome, engine::UsePowerupOutcome::Lock));

        let shuffle_outcome = engine::use_powerup(&mut lobby, "b", PowerupKind::Shuffle, now, &mut rng);
        match shuffle_outcome {
            engine::UsePowerupOutcome::Shuffle { protected_players, protected_boards, .. } => {
                assert_eq!(protected_players, vec!["a".to_string()]);
                assert_eq!(protected_boards.get("a"), Some(&original_board));
            }
            _ => panic!("expected shuffle outcome"),
        }
        assert_eq!(lobby.effective_board("a"), Some(&original_board));
        assert_ne!(lobby.effective_board("b"), Some(&original_board));
    }
}
