//! Word list import.
//!
//! Raw lines are normalized, grouped into buckets by word length and rated
//! per bucket, so words of different lengths never influence each other's
//! rating. The rated words are then persisted as one named list.

pub mod rater;

use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::{
    db::{queries, StoreError},
    models::NewWord,
    utils::letters::{char_len, is_word_like},
};

pub use rater::WordlistRater;

pub struct WordlistImporter {
    raters: BTreeMap<usize, WordlistRater>,
    rejected: usize,
}

impl WordlistImporter {
    /// Read and rate a batch of raw lines.
    ///
    /// Lines are trimmed; blank lines are skipped, as are lines with an
    /// uppercase character anywhere after the first. Accepted words are
    /// lower-cased.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut importer = Self {
            raters: BTreeMap::new(),
            rejected: 0,
        };
        importer.read_lines(lines);
        importer
    }

    fn read_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            let word = line.as_ref().trim();
            if word.is_empty() {
                continue;
            }

            if !is_word_like(word) {
                tracing::trace!("Skipping line with inner uppercase: {}", word);
                self.rejected += 1;
                continue;
            }

            let word = word.to_lowercase();
            self.raters
                .entry(char_len(&word))
                .or_default()
                .add(&word);
        }
    }

    /// Every unique word with its rating, shortest bucket first
    pub fn rated_words(&self) -> Vec<NewWord> {
        self.raters
            .values()
            .flat_map(|rater| {
                rater
                    .words()
                    .map(move |word| NewWord::new(word, rater.rate(word)))
            })
            .collect()
    }

    /// Number of unique words accepted
    pub fn word_count(&self) -> usize {
        self.raters.values().map(WordlistRater::len).sum()
    }

    /// Number of non-blank lines that were not accepted as words
    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    /// The rater for words of `length` characters, if any were imported
    #[cfg(test)]
    pub fn bucket(&self, length: usize) -> Option<&WordlistRater> {
        self.raters.get(&length)
    }

    /// Persist all rated words under `name` as one batch.
    ///
    /// # Returns
    /// The number of words persisted
    ///
    /// # Errors
    /// `StoreError::DuplicateName` if a list called `name` already exists.
    /// `StoreError::NameTooLong` if `name` exceeds the stored name length.
    /// Nothing is written in either case.
    pub async fn persist(&self, pool: &SqlitePool, name: &str) -> Result<usize, StoreError> {
        for (length, rater) in &self.raters {
            tracing::debug!("Bucket of length {}: {} words", length, rater.len());
        }

        let words = self.rated_words();
        let (wordlist, written) = queries::create_wordlist_with_words(pool, name, &words).await?;

        tracing::info!(
            "Persisted {} words into wordlist '{}' ({} lines rejected)",
            written,
            wordlist.name,
            self.rejected_count()
        );

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    const LINES: [&str; 8] = [
        "abc",
        "def",
        "abcdefghi",
        "ghi",
        "feg",
        "leg",
        "jklmnopqr",
        "abcjklstu",
    ];

    fn best_of(importer: &WordlistImporter, length: usize) -> String {
        let rater = importer.bucket(length).expect("bucket should exist");
        rater
            .words()
            .max_by_key(|w| rater.rate(w))
            .expect("bucket should not be empty")
            .to_string()
    }

    #[test]
    fn test_rating_is_bucketed_by_length() {
        let importer = WordlistImporter::new(LINES);

        assert_eq!(importer.word_count(), LINES.len());
        assert_eq!(best_of(&importer, 3), "feg");
        assert_eq!(best_of(&importer, 9), "abcjklstu");

        // Letters of the nine-letter words must not leak into the three-letter bucket
        let three = importer.bucket(3).unwrap();
        assert_eq!(three.rate("abc"), 3);
        assert_eq!(three.rate("feg"), 8);
    }

    #[test]
    fn test_inner_uppercase_line_is_rejected() {
        let importer = WordlistImporter::new(["aBc", "xyz"]);

        let words: Vec<String> = importer.rated_words().into_iter().map(|w| w.word).collect();
        assert_eq!(words, vec!["xyz"]);
        assert_eq!(importer.rejected_count(), 1);
    }

    #[test]
    fn test_leading_uppercase_line_is_lowercased() {
        let importer = WordlistImporter::new(["Abc"]);

        let words: Vec<String> = importer.rated_words().into_iter().map(|w| w.word).collect();
        assert_eq!(words, vec!["abc"]);
        assert_eq!(importer.rejected_count(), 0);
    }

    #[test]
    fn test_lines_are_trimmed_and_blank_lines_skipped() {
        let importer = WordlistImporter::new(["  abc  ", "", "   ", "\tdef\r"]);

        let words: Vec<String> = importer.rated_words().into_iter().map(|w| w.word).collect();
        assert_eq!(words, vec!["abc", "def"]);
        assert!(importer.bucket(0).is_none(), "Blank lines must not form a bucket");
    }

    #[test]
    fn test_duplicates_collapse_after_lowercasing() {
        let importer = WordlistImporter::new(["Abc", "abc", "abc"]);
        assert_eq!(importer.word_count(), 1);
    }

    #[tokio::test]
    async fn test_importer_persists_rated_words() {
        let pool = test_pool().await;
        let importer = WordlistImporter::new(LINES);

        let persisted = importer.persist(&pool, "Test words").await.unwrap();
        assert_eq!(persisted, LINES.len());

        let list = queries::get_wordlist_by_name(&pool, "Test words")
            .await
            .unwrap()
            .expect("wordlist should exist after persisting");
        assert_eq!(queries::count_words(&pool, list.id).await.unwrap(), LINES.len() as i64);

        let three = queries::get_words_by_length(&pool, list.id, 3).await.unwrap();
        assert_eq!(three[0].word, "feg");
        let nine = queries::get_words_by_length(&pool, list.id, 9).await.unwrap();
        assert_eq!(nine[0].word, "abcjklstu");

        let err = importer
            .persist(&pool, "Test words")
            .await
            .expect_err("Persisting the same name twice must fail");
        assert!(matches!(err, StoreError::DuplicateName(_)));
        assert_eq!(
            queries::count_words(&pool, list.id).await.unwrap(),
            LINES.len() as i64,
            "First persisted set must be unaffected"
        );
    }
}
