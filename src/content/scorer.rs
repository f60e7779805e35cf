//! Heuristic SEO score.
//!
//! Pure and deterministic. Only the keyword, length and readability checks
//! contribute a factor string; the punctuation and capitalisation bonuses
//! change the number silently.

use serde::Serialize;

pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub score: u8,
    pub factors: Vec<&'static str>,
}

/// Unicode whitespace plus the ASCII information separators U+001C..=U+001F,
/// which also end a word.
fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Number of whitespace-delimited tokens.
pub fn word_count(content: &str) -> usize {
    content
        .split(is_word_separator)
        .filter(|word| !word.is_empty())
        .count()
}

/// Case-insensitive, non-overlapping occurrences of `keyword` in `content`.
///
/// An empty keyword never matches.
pub fn keyword_occurrences(content: &str, keyword: &str) -> usize {
    if keyword.is_empty() {
        return 0;
    }
    content
        .to_lowercase()
        .matches(keyword.to_lowercase().as_str())
        .count()
}

pub fn score(content: &str, keyword: &str) -> ScoreReport {
    let mut total: u32 = 0;
    let mut factors = Vec::with_capacity(3);

    match keyword_occurrences(content, keyword) {
        n if n >= 2 => {
            total += 30;
            factors.push("Good keyword density");
        }
        1 => {
            total += 15;
            factors.push("Moderate keyword use");
        }
        _ => factors.push("Keyword missing"),
    }

    let words = word_count(content);
    if (150..=300).contains(&words) {
        total += 25;
        factors.push("Optimal word count");
    } else if words >= 100 {
        total += 15;
        factors.push("Acceptable length");
    } else {
        factors.push("Too short");
    }

    // sentences are approximated by full stops
    let sentences = content.matches('.').count();
    let avg_len = if sentences > 0 {
        words as f64 / sentences as f64
    } else {
        words as f64
    };
    if (10.0..=20.0).contains(&avg_len) {
        total += 20;
        factors.push("Good readability");
    } else {
        total += 10;
        factors.push("Okay readability");
    }

    if content.contains(['.', ',', '!', '?']) {
        total += 10;
    }
    if content.chars().next().is_some_and(char::is_uppercase) {
        total += 5;
    }

    ScoreReport {
        score: total.min(MAX_SCORE as u32) as u8,
        factors,
    }
}
