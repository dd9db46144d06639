use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Wordlist {
    pub id: i64,
    /// Unique name the list was imported under
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Word {
    pub id: i64,
    pub wordlist_id: i64,
    pub word: String,
    /// Character count of `word`, stored so length queries can use the index
    pub length: i64,
    pub rating: i64,
}

/// A word that has been rated but not persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWord {
    pub word: String,
    pub rating: i64,
}

impl NewWord {
    pub fn new(word: impl Into<String>, rating: i64) -> Self {
        Self {
            word: word.into(),
            rating,
        }
    }

    pub fn length(&self) -> i64 {
        self.word.chars().count() as i64
    }
}

/// A word list together with how many words it holds
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WordlistSummary {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub word_count: i64,
}
