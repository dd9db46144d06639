use std::collections::HashMap;

/// Characters excluded from guesses unless the caller says otherwise.
/// German umlauts and the sharp s never show up in the English-alphabet game.
pub const DEFAULT_EXCLUDED_CHARACTERS: [&str; 4] = ["ä", "ö", "ü", "ß"];

/// Build the default excluded characters as owned strings
pub fn default_excluded_characters() -> Vec<String> {
    DEFAULT_EXCLUDED_CHARACTERS
        .iter()
        .map(|c| c.to_string())
        .collect()
}

/// Split a string into one excluded character per char, skipping whitespace
/// and commas so that both `äöüß` and `ä, ö, ü, ß` are accepted.
pub fn split_characters(raw: &str) -> Vec<String> {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(String::from)
        .collect()
}

/// Count how often each character occurs in a word
pub fn letter_counts(word: &str) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for ch in word.chars() {
        *counts.entry(ch).or_insert(0) += 1;
    }
    counts
}

/// Number of characters in a word (not bytes)
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// A line counts as a word when nothing after its first character is
/// uppercase. A capitalized first letter is tolerated.
pub fn is_word_like(line: &str) -> bool {
    !line.chars().skip(1).any(char::is_uppercase)
}
