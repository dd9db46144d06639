use std::collections::{BTreeSet, HashMap};

use crate::utils::letters::letter_counts;

/// Rates the words of one length bucket by letter frequency.
///
/// Every character occurrence of every added word is counted, repeats
/// included. A word's rating is the sum of those totals over the word's
/// distinct letters, so words built from common letters score higher.
#[derive(Debug, Default, Clone)]
pub struct WordlistRater {
    words: BTreeSet<String>,
    character_counts: HashMap<char, i64>,
}

impl WordlistRater {
    /// Add a word to the bucket. A word added twice is kept once but its
    /// letters are counted every time.
    pub fn add(&mut self, word: &str) {
        for (ch, count) in letter_counts(word) {
            *self.character_counts.entry(ch).or_insert(0) += count as i64;
        }
        self.words.insert(word.to_string());
    }

    pub fn rate(&self, word: &str) -> i64 {
        letter_counts(word)
            .keys()
            .map(|ch| self.character_counts.get(ch).copied().unwrap_or(0))
            .sum()
    }

    /// Unique words in sorted order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// How often `ch` occurred across all added words
    #[cfg(test)]
    pub fn character_count(&self, ch: char) -> i64 {
        self.character_counts.get(&ch).copied().unwrap_or(0)
    }
}
