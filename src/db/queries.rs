use chrono::Utc;
use sqlx::{QueryBuilder, Result, Sqlite, SqlitePool};

use super::StoreError;
use crate::models::{NewWord, Word, Wordlist, WordlistSummary};

/// Rows per bulk INSERT, keeping bound parameters well under SQLite's limit
const INSERT_CHUNK_SIZE: usize = 200;

/// SQLite does not enforce `VARCHAR(100)`, so the name length is checked here
const MAX_NAME_LENGTH: usize = 100;

// Wordlist queries

/// Create a word list and all of its words in one transaction.
///
/// If the name is taken the whole batch is rolled back and
/// `StoreError::DuplicateName` is returned; the existing list is untouched.
/// Names longer than `MAX_NAME_LENGTH` characters are rejected with
/// `StoreError::NameTooLong` before anything is written.
///
/// # Returns
/// The created word list and the number of word rows written
pub async fn create_wordlist_with_words(
    pool: &SqlitePool,
    name: &str,
    words: &[NewWord],
) -> std::result::Result<(Wordlist, usize), StoreError> {
    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(StoreError::NameTooLong {
            length,
            max: MAX_NAME_LENGTH,
        });
    }

    let mut tx = pool.begin().await?;

    let inserted = sqlx::query_as::<_, Wordlist>(
        r#"
        INSERT INTO wordlists (name, created_at)
        VALUES (?, ?)
        RETURNING id, name, created_at
        "#,
    )
    .bind(name)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await;

    let wordlist = match inserted {
        Ok(wordlist) => wordlist,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            tracing::warn!("Wordlist name '{}' is already taken", name);
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut written = 0;
    for chunk in words.chunks(INSERT_CHUNK_SIZE) {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("INSERT INTO words (wordlist_id, word, length, rating) ");
        builder.push_values(chunk, |mut row, word| {
            row.push_bind(wordlist.id)
                .push_bind(word.word.as_str())
                .push_bind(word.length())
                .push_bind(word.rating);
        });
        let result = builder.build().execute(&mut *tx).await?;
        written += result.rows_affected() as usize;
    }

    tx.commit().await?;

    tracing::debug!(
        "Created wordlist '{}' (id {}) with {} words",
        wordlist.name,
        wordlist.id,
        written
    );

    Ok((wordlist, written))
}

pub async fn get_wordlist_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Wordlist>> {
    sqlx::query_as::<_, Wordlist>("SELECT id, name, created_at FROM wordlists WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await
}

pub async fn list_wordlists(pool: &SqlitePool) -> Result<Vec<WordlistSummary>> {
    sqlx::query_as::<_, WordlistSummary>(
        r#"
        SELECT wl.name, wl.created_at, COUNT(w.id) AS word_count
        FROM wordlists wl
        LEFT JOIN words w ON w.wordlist_id = wl.id
        GROUP BY wl.id, wl.name, wl.created_at
        ORDER BY wl.name
        "#,
    )
    .fetch_all(pool)
    .await
}

// Word queries

/// All words of a list with exactly `length` characters, best rated first.
/// Equal ratings fall back to alphabetical order so results are stable.
pub async fn get_words_by_length(
    pool: &SqlitePool,
    wordlist_id: i64,
    length: i64,
) -> Result<Vec<Word>> {
    sqlx::query_as::<_, Word>(
        r#"
        SELECT id, wordlist_id, word, length, rating
        FROM words
        WHERE wordlist_id = ? AND length = ?
        ORDER BY rating DESC, word ASC
        "#,
    )
    .bind(wordlist_id)
    .bind(length)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
pub async fn count_words(pool: &SqlitePool, wordlist_id: i64) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM words WHERE wordlist_id = ?")
        .bind(wordlist_id)
        .fetch_one(pool)
        .await
}
