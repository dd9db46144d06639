use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::letters::default_excluded_characters;

/// Constraints gathered from previous guesses.
///
/// Values are kept as raw JSON so that input read from a file or from the
/// command line can be reported precisely when it has the wrong shape. Map
/// entries keep their insertion order, which decides which of two safe
/// characters claiming the same index is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuessConstraints {
    /// Characters that must not occur anywhere in the word
    pub excluded_characters: Vec<String>,
    /// Letter -> index the letter is known to sit at
    pub safe_characters: Map<String, Value>,
    /// Letter -> minimum number of occurrences
    pub characters_anywhere: Map<String, Value>,
    /// Letter -> list of indices the letter is known not to sit at
    pub characters_excluded_at: Map<String, Value>,
}

impl Default for GuessConstraints {
    fn default() -> Self {
        Self {
            excluded_characters: default_excluded_characters(),
            safe_characters: Map::new(),
            characters_anywhere: Map::new(),
            characters_excluded_at: Map::new(),
        }
    }
}

impl GuessConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON constraint document. Fields left out take their default,
    /// except `excluded_characters`, which falls back to `default_excludes`.
    pub fn from_json_str(raw: &str, default_excludes: &[String]) -> serde_json::Result<Self> {
        let document: Map<String, Value> = serde_json::from_str(raw)?;
        let has_excludes = document.contains_key("excluded_characters");

        let mut constraints: Self = serde_json::from_value(Value::Object(document))?;
        if !has_excludes {
            constraints.excluded_characters = default_excludes.to_vec();
        }
        Ok(constraints)
    }

    /// Replace the excluded characters, dropping the defaults
    pub fn with_excluded_characters<I, S>(mut self, characters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_characters = characters.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude(mut self, character: impl Into<String>) -> Self {
        self.excluded_characters.push(character.into());
        self
    }

    pub fn safe(mut self, character: impl Into<String>, index: impl Into<Value>) -> Self {
        self.safe_characters.insert(character.into(), index.into());
        self
    }

    pub fn anywhere(mut self, character: impl Into<String>, occurrences: impl Into<Value>) -> Self {
        self.characters_anywhere
            .insert(character.into(), occurrences.into());
        self
    }

    pub fn excluded_at(mut self, character: impl Into<String>, indices: impl Into<Value>) -> Self {
        self.characters_excluded_at
            .insert(character.into(), indices.into());
        self
    }
}

/// Checked, typed form of `GuessConstraints` for one word length
#[derive(Debug, Clone, Default)]
pub(crate) struct CandidateFilter {
    pub word_length: usize,
    pub excluded: Vec<char>,
    pub safe: Vec<(usize, char)>,
    pub anywhere: Vec<(char, usize)>,
    pub excluded_at: Vec<(char, Vec<usize>)>,
}

impl CandidateFilter {
    pub fn matches(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() != self.word_length {
            return false;
        }

        if chars.iter().any(|c| self.excluded.contains(c)) {
            return false;
        }

        if self
            .safe
            .iter()
            .any(|&(index, ch)| chars.get(index) != Some(&ch))
        {
            return false;
        }

        if self
            .anywhere
            .iter()
            .any(|&(ch, min)| chars.iter().filter(|&&c| c == ch).count() < min)
        {
            return false;
        }

        !self.excluded_at.iter().any(|(ch, indices)| {
            indices
                .iter()
                .any(|&index| chars.get(index) == Some(ch))
        })
    }
}

/// Stored words are lower case, so constraint letters are compared lower-cased
pub(crate) fn normalize(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}
