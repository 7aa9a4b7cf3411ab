//! Word-set membership provider. Loading the backing word list (file
//! download, packaged asset, etc.) is an external concern; this type
//! only needs an iterator of candidate words and precomputes the prefix
//! set the solver prunes against.

use std::collections::HashSet;

/// Used only when the caller supplies no words, so the server can still
/// start and serve a playable (if sparse) dictionary.
const FALLBACK_WORDS: &[&str] = &[
    "CAT", "DOG", "RAT", "BAT", "HAT", "SAT", "MAT", "TAN", "CAN", "RAN",
    "MAN", "RAN", "TIN", "TIE", "TIP", "SIT", "SIP", "NET", "TEN", "TEA",
    "EAT", "ATE", "SEA", "SEAT", "EATS", "RATS", "CATS", "STAR", "ARTS",
    "TARS", "RATE", "TEAR", "TARE", "CARE", "RACE", "ACRE", "QUIZ", "QUIT",
    "QUID", "QUEST", "ZEST", "REST", "BEST", "TEST", "VEST", "NEST", "WEST",
];

pub struct DictionaryProvider {
    words: HashSet<String>,
    prefixes: HashSet<String>,
}

impl DictionaryProvider {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut upper: HashSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().to_uppercase())
            .filter(|w| w.len() >= 3 && w.len() <= 15 && w.chars().all(|c| c.is_ascii_alphabetic()))
            .collect();
        if upper.is_empty() {
            upper = FALLBACK_WORDS.iter().map(|w| w.to_string()).collect();
        }
        let mut prefixes = HashSet::new();
        for word in &upper {
            for i in 1..=word.len() {
                prefixes.insert(word[..i].to_string());
            }
        }
        Self { words: upper, prefixes }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn is_prefix(&self, prefix: &str) -> bool {
        self.prefixes.contains(prefix)
    }

    pub fn words(&self) -> &HashSet<String> {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_when_empty() {
        let dict = DictionaryProvider::new(Vec::<String>::new());
        assert!(dict.contains("CAT"));
    }

    #[test]
    fn filters_out_of_range_lengths() {
        let dict = DictionaryProvider::new(vec!["AT", "CAT", "A"]);
        assert!(!dict.contains("AT"));
        assert!(dict.contains("CAT"));
    }

    #[test]
    fn prefix_set_covers_every_proper_prefix() {
        let dict = DictionaryProvider::new(vec!["CATS"]);
        assert!(dict.is_prefix("C"));
        assert!(dict.is_prefix("CA"));
        assert!(dict.is_prefix("CAT"));
        assert!(dict.is_prefix("CATS"));
    }
}
