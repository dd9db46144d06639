//! Candidate filtering for a single guess session.
//!
//! A `Guesser` holds the candidate words of one length together with the
//! constraints gathered so far. `validate` checks that the constraints are
//! consistent and in bounds; `guess` returns the words that satisfy them.

pub mod constraints;
pub mod errors;

use std::collections::HashMap;

use serde_json::Value;

use constraints::{normalize, CandidateFilter};
use errors::ConstraintField;

pub use constraints::GuessConstraints;
pub use errors::GuessError;

type Result<T> = std::result::Result<T, GuessError>;

/// Selects which validation groups `Guesser::validate` runs.
/// Every group is enabled by default; disabled groups are skipped entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationChecks {
    pub wordlist_not_empty: bool,
    pub word_length: bool,
    pub excluded_characters: bool,
    pub safe_characters: bool,
    pub characters_anywhere: bool,
    pub characters_excluded_at: bool,
}

impl Default for ValidationChecks {
    fn default() -> Self {
        Self::all()
    }
}

impl ValidationChecks {
    pub fn all() -> Self {
        Self {
            wordlist_not_empty: true,
            word_length: true,
            excluded_characters: true,
            safe_characters: true,
            characters_anywhere: true,
            characters_excluded_at: true,
        }
    }

    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            wordlist_not_empty: false,
            word_length: false,
            excluded_characters: false,
            safe_characters: false,
            characters_anywhere: false,
            characters_excluded_at: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Guesser {
    wordlist: Vec<String>,
    word_length: usize,
    constraints: GuessConstraints,
}

impl Guesser {
    pub fn new(wordlist: Vec<String>, word_length: usize, constraints: GuessConstraints) -> Self {
        Self {
            wordlist,
            word_length,
            constraints,
        }
    }

    /// Run the enabled validation groups in order, stopping at the first
    /// violation.
    pub fn validate(&self, checks: ValidationChecks) -> Result<()> {
        if checks.wordlist_not_empty {
            self.validate_wordlist_not_empty()?;
        }

        if checks.word_length {
            self.validate_word_length()?;
        }

        if checks.excluded_characters {
            self.validate_excluded_characters()?;
        }

        if checks.safe_characters {
            self.validate_safe_characters()?;
        }

        if checks.characters_anywhere {
            self.validate_characters_anywhere()?;
        }

        if checks.characters_excluded_at {
            self.validate_characters_excluded_at()?;
        }

        Ok(())
    }

    /// Words consistent with every constraint, in word list order.
    ///
    /// A word survives when it has the configured length, carries every safe
    /// letter at its index, contains every anywhere letter at least as often
    /// as required, has no excluded-at letter at a listed index and contains
    /// no excluded character.
    ///
    /// # Errors
    /// The constraint structures are checked the same way `validate` checks
    /// them, whatever the caller validated before, since malformed entries
    /// cannot be applied.
    pub fn guess(&self) -> Result<Vec<&str>> {
        let filter = self.compile()?;

        let candidates: Vec<&str> = self
            .wordlist
            .iter()
            .map(String::as_str)
            .filter(|word| filter.matches(word))
            .collect();

        tracing::debug!(
            "{} of {} words match the constraints",
            candidates.len(),
            self.wordlist.len()
        );

        Ok(candidates)
    }

    fn compile(&self) -> Result<CandidateFilter> {
        Ok(CandidateFilter {
            word_length: self.word_length,
            excluded: self.validate_excluded_characters()?,
            safe: self.validate_safe_characters()?,
            anywhere: self.validate_characters_anywhere()?,
            excluded_at: self.validate_characters_excluded_at()?,
        })
    }

    fn validate_wordlist_not_empty(&self) -> Result<()> {
        if self.wordlist.is_empty() {
            return Err(GuessError::EmptyWordlist);
        }
        Ok(())
    }

    fn validate_word_length(&self) -> Result<()> {
        for word in &self.wordlist {
            let length = word.chars().count();
            if length != self.word_length {
                return Err(GuessError::UnexpectedWordLength {
                    word: word.clone(),
                    length,
                });
            }
        }
        Ok(())
    }

    fn validate_excluded_characters(&self) -> Result<Vec<char>> {
        self.constraints
            .excluded_characters
            .iter()
            .map(|entry| single_char(ConstraintField::ExcludedCharacters, entry).map(normalize))
            .collect()
    }

    fn validate_safe_characters(&self) -> Result<Vec<(usize, char)>> {
        let field = ConstraintField::SafeCharacters;
        let mut reserved: HashMap<usize, &str> = HashMap::new();
        let mut safe = Vec::with_capacity(self.constraints.safe_characters.len());

        for (character, value) in &self.constraints.safe_characters {
            let ch = single_char(field, character)?;
            let index = integer(field, character, "index", value)?;
            let index = self.index_in_bounds(field, character, index)?;

            if let Some(owner) = reserved.get(&index) {
                return Err(GuessError::IndexReserved {
                    character: character.clone(),
                    index: index as i64,
                    reserved_by: owner.to_string(),
                });
            }

            reserved.insert(index, character);
            safe.push((index, normalize(ch)));
        }

        Ok(safe)
    }

    fn validate_characters_anywhere(&self) -> Result<Vec<(char, usize)>> {
        let field = ConstraintField::CharactersAnywhere;
        let mut anywhere = Vec::with_capacity(self.constraints.characters_anywhere.len());

        for (character, value) in &self.constraints.characters_anywhere {
            let ch = single_char(field, character)?;
            let occurrences = integer(field, character, "occurrences", value)?;

            if occurrences < 1 {
                return Err(GuessError::TooFewOccurrences {
                    character: character.clone(),
                    occurrences,
                });
            }

            if occurrences > self.word_length as i64 {
                return Err(GuessError::TooManyOccurrences {
                    character: character.clone(),
                    occurrences,
                    word_length: self.word_length,
                });
            }

            anywhere.push((normalize(ch), occurrences as usize));
        }

        Ok(anywhere)
    }

    fn validate_characters_excluded_at(&self) -> Result<Vec<(char, Vec<usize>)>> {
        let field = ConstraintField::CharactersExcludedAt;
        let mut excluded_at = Vec::with_capacity(self.constraints.characters_excluded_at.len());

        for (character, value) in &self.constraints.characters_excluded_at {
            let ch = single_char(field, character)?;

            if is_blank(value) {
                return Err(GuessError::MissingValue {
                    field,
                    character: character.clone(),
                    what: "list of indices",
                });
            }

            let Value::Array(items) = value else {
                return Err(GuessError::NotAList {
                    character: character.clone(),
                });
            };

            let mut indices = Vec::with_capacity(items.len());
            for item in items {
                let index = integer(field, character, "index", item)?;
                indices.push(self.index_in_bounds(field, character, index)?);
            }

            excluded_at.push((normalize(ch), indices));
        }

        Ok(excluded_at)
    }

    fn index_in_bounds(&self, field: ConstraintField, character: &str, index: i64) -> Result<usize> {
        let max = self.word_length as i64 - 1;
        if index < 0 || index > max {
            return Err(GuessError::IndexOutOfBounds {
                field,
                character: character.to_string(),
                index,
                max,
            });
        }
        Ok(index as usize)
    }
}

/// The key must be exactly one character
fn single_char(field: ConstraintField, key: &str) -> Result<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        (None, _) => Err(GuessError::MissingCharacter { field }),
        (Some(_), Some(_)) => Err(GuessError::MultipleCharacters {
            field,
            character: key.to_string(),
        }),
    }
}

fn integer(field: ConstraintField, character: &str, what: &'static str, value: &Value) -> Result<i64> {
    if value.is_null() {
        return Err(GuessError::MissingValue {
            field,
            character: character.to_string(),
            what,
        });
    }

    match value.as_i64() {
        Some(n) => Ok(n),
        // Integers beyond i64 are still integers, just out of any range
        None if value.is_u64() => Ok(i64::MAX),
        None => Err(GuessError::NotAnInteger {
            field,
            character: character.to_string(),
            what,
        }),
    }
}

/// Null, false, zero and empty strings, lists or maps count as "nothing given"
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
