mod dice;
mod dictionary;
mod generator;
mod scoring;
mod solver;

pub use dictionary::DictionaryProvider;
pub use generator::{generate_board, Board};
pub use scoring::score_word;
pub use solver::{find_all_words, longest_findable_word};
