use std::fmt;

use thiserror::Error;

/// Which constraint structure an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintField {
    ExcludedCharacters,
    SafeCharacters,
    CharactersAnywhere,
    CharactersExcludedAt,
}

impl fmt::Display for ConstraintField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintField::ExcludedCharacters => "excluded_characters",
            ConstraintField::SafeCharacters => "safe_characters",
            ConstraintField::CharactersAnywhere => "characters_anywhere",
            ConstraintField::CharactersExcludedAt => "characters_excluded_at",
        };
        f.write_str(name)
    }
}

/// Broad classification of a `GuessError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    LengthMismatch,
    Malformed,
    Type,
    Range,
    Conflict,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GuessError {
    #[error("Empty wordlist")]
    EmptyWordlist,

    #[error("Unexpected length of word in wordlist: \"{word}\" with length of: {length}")]
    UnexpectedWordLength { word: String, length: usize },

    #[error("Missing character in {field}")]
    MissingCharacter { field: ConstraintField },

    #[error("Only one character per entry allowed in {field}, got \"{character}\"")]
    MultipleCharacters {
        field: ConstraintField,
        character: String,
    },

    #[error("Missing {what} in {field} for character \"{character}\"")]
    MissingValue {
        field: ConstraintField,
        character: String,
        what: &'static str,
    },

    #[error("Type of {what} is not integer in {field} for character \"{character}\"")]
    NotAnInteger {
        field: ConstraintField,
        character: String,
        what: &'static str,
    },

    #[error("Type of indices in characters_excluded_at is not list for character \"{character}\"")]
    NotAList { character: String },

    #[error("Index {index} of {field} character \"{character}\" out of bounds 0..={max}")]
    IndexOutOfBounds {
        field: ConstraintField,
        character: String,
        index: i64,
        max: i64,
    },

    #[error("Occurrences of anywhere character \"{character}\" have to be at least 1, got {occurrences}")]
    TooFewOccurrences { character: String, occurrences: i64 },

    #[error(
        "Occurrences of anywhere character \"{character}\" cannot exceed the word length {word_length}, got {occurrences}"
    )]
    TooManyOccurrences {
        character: String,
        occurrences: i64,
        word_length: usize,
    },

    #[error("Safe character \"{character}\" index {index} is already reserved by \"{reserved_by}\"")]
    IndexReserved {
        character: String,
        index: i64,
        reserved_by: String,
    },
}

impl GuessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GuessError::EmptyWordlist => ErrorKind::EmptyInput,
            GuessError::UnexpectedWordLength { .. } => ErrorKind::LengthMismatch,
            GuessError::MissingCharacter { .. }
            | GuessError::MultipleCharacters { .. }
            | GuessError::MissingValue { .. } => ErrorKind::Malformed,
            GuessError::NotAnInteger { .. } | GuessError::NotAList { .. } => ErrorKind::Type,
            GuessError::IndexOutOfBounds { .. }
            | GuessError::TooFewOccurrences { .. }
            | GuessError::TooManyOccurrences { .. } => ErrorKind::Range,
            GuessError::IndexReserved { .. } => ErrorKind::Conflict,
        }
    }
}
