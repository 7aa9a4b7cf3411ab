//! Client -> server messages, wire-shaped `{type, data}`.

use serde::Deserialize;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectMode {
    Create,
    Join,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Intent {
    ToggleReady,
    SetBoardSize { size: usize },
    SubmitWord { word: String, path: Vec<(usize, usize)> },
    UsePowerup { powerup: String },
    WantPlayAgain,
    ResetGame,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_word_decodes_from_wire_shape() {
        let json = r#"{"type":"submit_word","data":{"word":"CAT","path":[[0,0],[0,1],[1,0]]}}"#;
        let intent: Intent = serde_json::from_str(json).unwrap();
        match intent {
            Intent::SubmitWord { word, path } => {
                assert_eq!(word, "CAT");
                assert_eq!(path, vec![(0, 0), (0, 1), (1, 0)]);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn toggle_ready_has_no_data() {
        let json = r#"{"type":"toggle_ready"}"#;
        let intent: Intent = serde_json::from_str(json).unwrap();
        assert!(matches!(intent, Intent::ToggleReady));
    }
}
