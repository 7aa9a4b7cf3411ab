mod event;
mod intent;
mod snapshot;

pub use event::{BonusTimer, Event, Finder, GameEnd, LongestWordFound, PlayerResult, WordAward};
pub use intent::{ConnectMode, Intent};
pub use snapshot::{LobbySnapshot, PlayerView};
