//! Challenge registry: a fixed catalog of predicates over a player's
//! `(found_words, score)`, evaluated on demand. Re-architected as a
//! tagged-variant registry rather than a class hierarchy with a virtual
//! `check_progress` (see spec design note "Dynamic dispatch over
//! challenges").

use serde::Serialize;

#[derive(Clone, Copy, Debug)]
pub enum Kind {
    WordCount,
    WordLength { min_length: usize },
    StartsWith { letter: char },
    EndsWith { suffix: &'static str },
    Contains { letter: char },
    Score,
    DoubleLetter,
    Palindrome,
    VowelHeavy { min_vowels: usize },
    ConsonantHeavy,
    RareLetter { letters: &'static str },
}

impl Kind {
    fn progress(&self, found_words: &[String], score: i64) -> i64 {
        match *self {
            Kind::WordCount => found_words.len() as i64,
            Kind::WordLength { min_length } => {
                found_words.iter().filter(|w| w.len() >= min_length).count() as i64
            }
            Kind::StartsWith { letter } => found_words
                .iter()
                .filter(|w| w.starts_with(letter))
                .count() as i64,
            Kind::EndsWith { suffix } => {
                found_words.iter().filter(|w| w.ends_with(suffix)).count() as i64
            }
            Kind::Contains { letter } => {
                found_words.iter().filter(|w| w.contains(letter)).count() as i64
            }
            Kind::Score => score,
            Kind::DoubleLetter => found_words
                .iter()
                .filter(|w| w.as_bytes().windows(2).any(|pair| pair[0] == pair[1]))
                .count() as i64,
            Kind::Palindrome => found_words
                .iter()
                .filter(|w| w.len() >= 3 && w.chars().eq(w.chars().rev()))
                .count() as i64,
            Kind::VowelHeavy { min_vowels } => found_words
                .iter()
                .filter(|w| w.chars().filter(|c| "AEIOU".contains(*c)).count() >= min_vowels)
                .count() as i64,
            Kind::ConsonantHeavy => found_words
                .iter()
                .filter(|w| max_consonant_streak(w) >= 4)
                .count() as i64,
            Kind::RareLetter { letters } => found_words
                .iter()
                .filter(|w| w.chars().any(|c| letters.contains(c)))
                .count() as i64,
        }
    }
}

fn max_consonant_streak(word: &str) -> usize {
    let mut streak = 0;
    let mut max = 0;
    for c in word.chars() {
        if "AEIOU".contains(c) {
            streak = 0;
        } else {
            streak += 1;
            max = max.max(streak);
        }
    }
    max
}

pub struct Challenge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub target: i64,
    pub category: &'static str,
    pub difficulty: &'static str,
    pub points: i64,
    pub kind: Kind,
}

/// A catalog entry's static definition, with no per-player progress —
/// what gets attached to a lobby at the LOBBY -> COUNTDOWN transition.
#[derive(Clone, Debug, Serialize)]
pub struct ChallengeInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub target: i64,
    pub category: String,
    pub difficulty: String,
    pub points: i64,
}

pub fn catalog_info() -> Vec<ChallengeInfo> {
    catalog()
        .iter()
        .map(|c| ChallengeInfo {
            id: c.id.to_string(),
            name: c.name.to_string(),
            description: c.description.to_string(),
            target: c.target,
            category: c.category.to_string(),
            difficulty: c.difficulty.to_string(),
            points: c.points,
        })
        .collect()
}

#[derive(Clone, Debug, Serialize)]
pub struct ChallengeProgress {
    pub id: String,
    pub name: String,
    pub description: String,
    pub target: i64,
    pub progress: i64,
    pub ratio: f64,
    pub completed: bool,
    pub category: String,
    pub difficulty: String,
    pub points: i64,
    pub points_earned: i64,
}

impl Challenge {
    fn ratio(&self, found_words: &[String], score: i64) -> f64 {
        if self.target <= 0 {
            return 0.0;
        }
        (self.kind.progress(found_words, score) as f64 / self.target as f64).min(1.0)
    }

    pub fn evaluate(&self, found_words: &[String], score: i64) -> ChallengeProgress {
        let progress = self.kind.progress(found_words, score);
        let ratio = self.ratio(found_words, score);
        let completed = ratio >= 1.0;
        ChallengeProgress {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            target: self.target,
            progress,
            ratio,
            completed,
            category: self.category.to_string(),
            difficulty: self.difficulty.to_string(),
            points: self.points,
            points_earned: if completed { self.points } else { 0 },
        }
    }
}

macro_rules! word_count {
    ($id:literal, $name:literal, $desc:literal, $target:literal, $diff:literal, $points:literal) => {
        Challenge {
            id: $id,
            name: $name,
            description: $desc,
            target: $target,
            category: "words",
            difficulty: $diff,
            points: $points,
            kind: Kind::WordCount,
        }
    };
}

macro_rules! word_length {
    ($id:literal, $name:literal, $desc:literal, $target:literal, $min:literal, $diff:literal, $points:literal) => {
        Challenge {
            id: $id,
            name: $name,
            description: $desc,
            target: $target,
            category: "words",
            difficulty: $diff,
            points: $points,
            kind: Kind::WordLength { min_length: $min },
        }
    };
}

macro_rules! ends_with {
    ($id:literal, $name:literal, $desc:literal, $target:literal, $suffix:literal, $diff:literal, $points:literal) => {
        Challenge {
            id: $id,
            name: $name,
            description: $desc,
            target: $target,
            category: "letters",
            difficulty: $diff,
            points: $points,
            kind: Kind::EndsWith { suffix: $suffix },
        }
    };
}

macro_rules! starts_with {
    ($id:literal, $name:literal, $desc:literal, $target:literal, $letter:literal, $diff:literal, $points:literal) => {
        Challenge {
            id: $id,
            name: $name,
            description: $desc,
            target: $target,
            category: "letters",
            difficulty: $diff,
            points: $points,
            kind: Kind::StartsWith { letter: $letter },
        }
    };
}

macro_rules! score_challenge {
    ($id:literal, $name:literal, $desc:literal, $target:literal, $diff:literal, $points:literal) => {
        Challenge {
            id: $id,
            name: $name,
            description: $desc,
            target: $target,
            category: "score",
            difficulty: $diff,
            points: $points,
            kind: Kind::Score,
        }
    };
}

macro_rules! double_letter {
    ($id:literal, $name:literal, $desc:literal, $target:literal, $diff:literal, $points:literal) => {
        Challenge {
            id: $id,
            name: $name,
            description: $desc,
            target: $target,
            category: "special",
            difficulty: $diff,
            points: $points,
            kind: Kind::DoubleLetter,
        }
    };
}

macro_rules! vowel_heavy {
    ($id:literal, $name:literal, $desc:literal, $target:literal, $min:literal, $diff:literal, $points:literal) => {
        Challenge {
            id: $id,
            name: $name,
            description: $desc,
            target: $target,
            category: "special",
            difficulty: $diff,
            points: $points,
            kind: Kind::VowelHeavy { min_vowels: $min },
        }
    };
}

macro_rules! consonant_heavy {
    ($id:literal, $name:literal, $desc:literal, $target:literal, $diff:literal, $points:literal) => {
        Challenge {
            id: $id,
            name: $name,
            description: $desc,
            target: $target,
            category: "special",
            difficulty: $diff,
            points: $points,
            kind: Kind::ConsonantHeavy,
        }
    };
}

macro_rules! rare_letter {
    ($id:literal, $name:literal, $desc:literal, $target:literal, $letters:literal, $diff:literal, $points:literal) => {
        Challenge {
            id: $id,
            name: $name,
            description: $desc,
            target: $target,
            category: "special",
            difficulty: $diff,
            points: $points,
            kind: Kind::RareLetter { letters: $letters },
        }
    };
}

macro_rules! palindrome {
    ($id:literal, $name:literal, $desc:literal, $target:literal, $diff:literal, $points:literal) => {
        Challenge {
            id: $id,
            name: $name,
            description: $desc,
            target: $target,
            category: "special",
            difficulty: $diff,
            points: $points,
            kind: Kind::Palindrome,
        }
    };
}

/// The full, fixed catalog. Every game uses all of it; there is no
/// per-game subset selection.
pub fn catalog() -> Vec<Challenge> {
    vec![
        // easy
        word_count!("words_12", "Word Seeker", "Find 12 words", 12, "easy", 20),
        word_length!("long_5_3", "Extended Words", "Find 3 words with 5+ letters", 3, 5, "easy", 25),
        score_challenge!("score_75", "Point Pursuer", "Score 75 points", 75, "easy", 20),
        ends_with!("ends_s_5", "Plural Hunter", "Find 5 words ending in S", 5, "S", "easy", 25),
        double_letter!("double_3", "Double Trouble", "Find 3 words with double letters", 3, "easy", 30),
        ends_with!("ends_ed_3", "Past Tense", "Find 3 words ending in ED", 3, "ED", "easy", 25),
        // medium
        word_count!("words_18", "Vocabulary Vault", "Find 18 words", 18, "medium", 40),
        word_length!("long_6_3", "Six Letter Pro", "Find 3 words with 6+ letters", 3, 6, "medium", 45),
        score_challenge!("score_125", "Point Prodigy", "Score 125 points", 125, "medium", 40),
        ends_with!("ends_ing_3", "ING Master", "Find 3 words ending in ING", 3, "ING", "medium", 50),
        vowel_heavy!("vowels_4", "Vowel Hunter", "Find 4 words with 3+ vowels", 4, 3, "medium", 45),
        double_letter!("double_5", "Twin Terms", "Find 5 words with double letters", 5, "medium", 50),
        ends_with!("ends_er_4", "ER Expert", "Find 4 words ending in ER", 4, "ER", "medium", 40),
        word_length!("long_7_1", "Lucky Seven", "Find 1 word with 7+ letters", 1, 7, "medium", 35),
        // hard
        word_count!("words_25", "Word Wizard", "Find 25 words", 25, "hard", 70),
        word_length!("long_6_5", "Lengthy Legend", "Find 5 words with 6+ letters", 5, 6, "hard", 75),
        word_length!("long_7_2", "Marathon Words", "Find 2 words with 7+ letters", 2, 7, "hard", 70),
        score_challenge!("score_175", "Point Powerhouse", "Score 175 points", 175, "hard", 65),
        ends_with!("ends_ly_2", "LY Master", "Find 2 words ending in LY", 2, "LY", "hard", 70),
        ends_with!("ends_tion_1", "TION Station", "Find 1 word ending in TION", 1, "TION", "hard", 75),
        vowel_heavy!("vowels_4_4", "Super Vowel", "Find 4 words with 4+ vowels", 4, 4, "hard", 80),
        consonant_heavy!("consonants_2", "Consonant Crusher", "Find 2 words with 4+ consonants in a row", 2, "hard", 75),
        rare_letter!("rare_1", "Rare Find", "Find 1 word with Q, X, Z, or J", 1, "QXZJ", "hard", 65),
        palindrome!("palindrome_1", "Mirror Mirror", "Find 1 palindrome word", 1, "hard", 80),
        double_letter!("double_7", "Double Vision", "Find 7 words with double letters", 7, "hard", 70),
        // very hard
        word_count!("words_35", "Lexicon Lord", "Find 35 words", 35, "very_hard", 95),
        word_length!("long_7_4", "Seven Samurai", "Find 4 words with 7+ letters", 4, 7, "very_hard", 100),
        word_length!("long_8_1", "Eight Wonder", "Find 1 word with 8+ letters", 1, 8, "very_hard", 90),
        score_challenge!("score_250", "Quarter King", "Score 250 points", 250, "very_hard", 95),
        starts_with!("starts_q_1", "Q-Quest", "Find 1 word starting with Q", 1, 'Q', "very_hard", 95),
        starts_with!("starts_x_1", "X-Factor", "Find 1 word starting with X", 1, 'X', "very_hard", 100),
        starts_with!("starts_z_1", "Z-Zone", "Find 1 word starting with Z", 1, 'Z', "very_hard", 95),
        vowel_heavy!("vowels_5_4", "Quad Vowel Master", "Find 5 words with 4+ vowels", 5, 4, "very_hard", 100),
        consonant_heavy!("consonants_3", "Consonant King", "Find 3 words with 4+ consonants in a row", 3, "very_hard", 95),
        rare_letter!("rare_3", "Rare Collector", "Find 3 words with Q, X, Z, or J", 3, "QXZJ", "very_hard", 100),
        palindrome!("palindrome_2", "Mirror Master", "Find 2 palindrome words", 2, "very_hard", 100),
        ends_with!("ends_ing_5", "ING King", "Find 5 words ending in ING", 5, "ING", "very_hard", 90),
    ]
}

/// Progress on every catalog entry, sorted by ratio descending (ties
/// favor completed challenges).
pub fn evaluate_all(found_words: &[String], score: i64) -> Vec<ChallengeProgress> {
    let mut results: Vec<ChallengeProgress> = catalog()
        .iter()
        .map(|c| c.evaluate(found_words, score))
        .collect();
    results.sort_by(|a, b| {
        b.ratio
            .partial_cmp(&a.ratio)
            .unwrap()
            .then_with(|| b.completed.cmp(&a.completed))
    });
    results
}

pub fn best_challenge(found_words: &[String], score: i64) -> Option<ChallengeProgress> {
    evaluate_all(found_words, score).into_iter().next()
}

pub fn total_points_earned(found_words: &[String], score: i64) -> i64 {
    catalog()
        .iter()
        .map(|c| c.evaluate(found_words, score).points_earned)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_every_entry() {
        assert_eq!(catalog().len(), 37);
    }

    #[test]
    fn word_count_challenge_completes_at_target() {
        let words: Vec<String> = (0..12).map(|i| format!("WORD{i}")).collect();
        let progress = evaluate_all(&words, 0);
        let entry = progress.iter().find(|p| p.id == "words_12").unwrap();
        assert!(entry.completed);
        assert_eq!(entry.points_earned, 20);
    }

    #[test]
    fn no_partial_credit() {
        let words = vec!["ONE".to_string()];
        let progress = evaluate_all(&words, 0);
        let entry = progress.iter().find(|p| p.id == "words_12").unwrap();
        assert!(!entry.completed);
        assert_eq!(entry.points_earned, 0);
    }
}
