//! Word scoring: per-letter weights, a length multiplier, and a
//! uniqueness bonus applied at summary time.

fn letter_weight(c: char) -> i64 {
    match c {
        'A' | 'E' | 'I' | 'O' | 'N' | 'R' | 'T' | 'L' | 'S' => 1,
        'D' | 'G' | 'U' | 'C' | 'M' | 'P' | 'B' => 2,
        'H' | 'F' | 'W' | 'Y' | 'V' | 'K' => 3,
        'J' | 'X' => 5,
        'Q' | 'Z' => 8,
        _ => 0,
    }
}

fn length_multiplier(length: usize) -> f64 {
    match length {
        0..=2 => 0.0,
        3 => 1.0,
        4 => 1.2,
        5 => 1.5,
        6 => 2.0,
        _ => 3.0,
    }
}

/// `score(word, is_unique)` per the letter-weight / length-multiplier /
/// uniqueness-bonus pipeline. `word` must already be uppercase.
pub fn score_word(word: &str, is_unique: bool) -> i64 {
    let base: i64 = word.chars().map(letter_weight).sum();
    let mut total = (base as f64 * length_multiplier(word.chars().count())) as i64;
    if is_unique && total > 0 {
        total = (total as f64 * 1.5) as i64;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cat_scores_three() {
        // C=2 A=1 T=1 -> base 4, length 3 multiplier 1.0 -> 4
        assert_eq!(score_word("CAT", false), 4);
    }

    #[test]
    fn unique_bonus_applies_after_length_multiplier() {
        let non_unique = score_word("QUIZ", false);
        let unique = score_word("QUIZ", true);
        assert_eq!(unique, (non_unique as f64 * 1.5) as i64);
    }

    #[test]
    fn short_words_score_zero() {
        assert_eq!(score_word("AT", false), 0);
    }
}
