use std::{collections::HashMap, io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use sqlx::SqlitePool;
use tokio::fs;

use super::{parse_list, parse_scalar, split_assignment, CliExitCode};
use crate::{
    config::Config,
    db::queries,
    guesser::{GuessConstraints, Guesser, ValidationChecks},
};

#[derive(Debug, Args)]
pub struct GuessArgs {
    /// Name of the word list to pick candidates from
    pub wordlist: String,
    /// Length of the word being guessed
    pub length: usize,
    /// Letter known to be at an index, e.g. `a=0` (repeatable)
    #[arg(long = "safe", value_name = "CHAR=INDEX")]
    pub safe: Vec<String>,
    /// Letter known to occur at least N times, e.g. `e=1` (repeatable)
    #[arg(long = "anywhere", value_name = "CHAR=COUNT")]
    pub anywhere: Vec<String>,
    /// Letter known not to be at the listed indices, e.g. `r=0,3` (repeatable)
    #[arg(long = "excluded-at", value_name = "CHAR=INDICES")]
    pub excluded_at: Vec<String>,
    /// Character that must not occur at all (repeatable)
    #[arg(long = "exclude", value_name = "CHAR")]
    pub exclude: Vec<String>,
    /// Drop the configured default excluded characters
    #[arg(long)]
    pub no_default_excludes: bool,
    /// JSON file with constraints; flags are applied on top of it
    #[arg(long, value_name = "FILE")]
    pub constraints: Option<PathBuf>,
    /// How many candidates to print
    #[arg(long)]
    pub limit: Option<usize>,
}

impl GuessArgs {
    /// Build the constraint set: file (or configured defaults), then flags.
    ///
    /// The configured excludes apply unless `--no-default-excludes` is given
    /// or the file lists its own `excluded_characters`.
    pub async fn build_constraints(&self, config: &Config) -> Result<GuessConstraints> {
        let default_excludes: &[String] = if self.no_default_excludes {
            &[]
        } else {
            &config.guess.excluded_characters
        };

        let mut constraints = match &self.constraints {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read constraints file {}", path.display()))?;
                GuessConstraints::from_json_str(&raw, default_excludes)
                    .with_context(|| format!("Invalid constraints file {}", path.display()))?
            }
            None => GuessConstraints::new().with_excluded_characters(default_excludes.iter().cloned()),
        };

        for character in &self.exclude {
            constraints = constraints.exclude(character.as_str());
        }

        for raw in &self.safe {
            let (character, index) = split_assignment(raw)?;
            constraints = constraints.safe(character, parse_scalar(index));
        }

        for raw in &self.anywhere {
            let (character, occurrences) = split_assignment(raw)?;
            constraints = constraints.anywhere(character, parse_scalar(occurrences));
        }

        for raw in &self.excluded_at {
            let (character, indices) = split_assignment(raw)?;
            constraints = constraints.excluded_at(character, parse_list(indices));
        }

        Ok(constraints)
    }
}

pub async fn run(
    args: &GuessArgs,
    pool: &SqlitePool,
    config: &Config,
    out: &mut impl Write,
) -> Result<CliExitCode> {
    let constraints = args.build_constraints(config).await?;

    let Some(wordlist) = queries::get_wordlist_by_name(pool, &args.wordlist).await? else {
        writeln!(out, "Wordlist \"{}\" does not exist", args.wordlist)?;
        return Ok(CliExitCode::Rejected);
    };

    let words = queries::get_words_by_length(pool, wordlist.id, args.length as i64).await?;
    let ratings: HashMap<&str, i64> = words.iter().map(|w| (w.word.as_str(), w.rating)).collect();

    let guesser = Guesser::new(
        words.iter().map(|w| w.word.clone()).collect(),
        args.length,
        constraints,
    );

    if let Err(e) = guesser.validate(ValidationChecks::all()) {
        tracing::warn!(kind = ?e.kind(), "Rejected guess constraints: {}", e);
        writeln!(out, "Cannot guess: {}", e)?;
        return Ok(CliExitCode::Rejected);
    }

    let candidates = guesser.guess()?;

    writeln!(
        out,
        "{} of {} words in wordlist \"{}\" match",
        candidates.len(),
        words.len(),
        wordlist.name
    )?;

    let limit = args.limit.unwrap_or(config.guess.result_limit);
    for word in candidates.into_iter().take(limit) {
        let rating = ratings.get(word).copied().unwrap_or_default();
        writeln!(out, "{}\t{}", word, rating)?;
    }

    Ok(CliExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::test_support::{config, output},
        db::test_pool,
        importer::WordlistImporter,
    };
    use serde_json::json;

    fn args(wordlist: &str, length: usize) -> GuessArgs {
        GuessArgs {
            wordlist: wordlist.to_string(),
            length,
            safe: vec![],
            anywhere: vec![],
            excluded_at: vec![],
            exclude: vec![],
            no_default_excludes: false,
            constraints: None,
            limit: None,
        }
    }

    async fn seeded_pool() -> SqlitePool {
        let pool = test_pool().await;
        WordlistImporter::new(["crane", "cabin", "trace", "crone", "grüße", "abc"])
            .persist(&pool, "Five")
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn test_build_constraints_from_flags() {
        let mut args = args("Five", 5);
        args.safe = vec!["c=0".to_string()];
        args.anywhere = vec!["a=1".to_string()];
        args.excluded_at = vec!["a=1,2".to_string()];
        args.exclude = vec!["x".to_string()];

        let constraints = args.build_constraints(&config()).await.unwrap();

        assert_eq!(constraints.excluded_characters, vec!["ä", "ö", "ü", "ß", "x"]);
        assert_eq!(constraints.safe_characters["c"], json!(0));
        assert_eq!(constraints.characters_anywhere["a"], json!(1));
        assert_eq!(constraints.characters_excluded_at["a"], json!([1, 2]));
    }

    #[tokio::test]
    async fn test_build_constraints_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        write!(file, r#"{{"excluded_characters": ["q"], "safe_characters": {{"t": 0}}}}"#).unwrap();

        let mut args = args("Five", 5);
        args.constraints = Some(file.path().to_path_buf());
        args.anywhere = vec!["e=1".to_string()];

        let constraints = args.build_constraints(&config()).await.unwrap();
        assert_eq!(constraints.excluded_characters, vec!["q"]);
        assert_eq!(constraints.safe_characters["t"], json!(0));
        assert_eq!(constraints.characters_anywhere["e"], json!(1));
    }

    fn constraints_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_no_default_excludes_keeps_file_excludes() {
        let file = constraints_file(r#"{"excluded_characters": ["q"]}"#);
        let mut args = args("Five", 5);
        args.constraints = Some(file.path().to_path_buf());
        args.no_default_excludes = true;
        args.exclude = vec!["x".to_string()];

        let constraints = args.build_constraints(&config()).await.unwrap();
        assert_eq!(constraints.excluded_characters, vec!["q", "x"]);
    }

    #[tokio::test]
    async fn test_file_without_excludes_uses_configured_excludes() {
        let file = constraints_file(r#"{"safe_characters": {"t": 0}}"#);
        let mut config = config();
        config.guess.excluded_characters = vec!["z".to_string()];

        let mut args = args("Five", 5);
        args.constraints = Some(file.path().to_path_buf());
        let constraints = args.build_constraints(&config).await.unwrap();
        assert_eq!(constraints.excluded_characters, vec!["z"]);

        args.constraints = None;
        let constraints = args.build_constraints(&config).await.unwrap();
        assert_eq!(constraints.excluded_characters, vec!["z"]);

        args.constraints = Some(file.path().to_path_buf());
        args.no_default_excludes = true;
        let constraints = args.build_constraints(&config).await.unwrap();
        assert!(constraints.excluded_characters.is_empty());
    }

    #[tokio::test]
    async fn test_build_constraints_rejects_missing_equals() {
        let mut args = args("Five", 5);
        args.safe = vec!["c0".to_string()];
        assert!(args.build_constraints(&config()).await.is_err());
    }

    #[tokio::test]
    async fn test_guess_prints_matching_words() {
        let pool = seeded_pool().await;
        let mut args = args("Five", 5);
        args.safe = vec!["c=0".to_string()];
        args.anywhere = vec!["a=1".to_string()];
        args.excluded_at = vec!["a=1".to_string()];

        let mut out = Vec::new();
        let code = run(&args, &pool, &config(), &mut out).await.unwrap();
        assert_eq!(code, CliExitCode::Success);

        let text = output(out);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "1 of 5 words in wordlist \"Five\" match");
        assert!(lines[1].starts_with("crane\t"));
        assert_eq!(lines.len(), 2);
    }

    #[tokio::test]
    async fn test_guess_without_default_excludes_keeps_umlauts() {
        let pool = seeded_pool().await;
        let mut args = args("Five", 5);
        args.safe = vec!["g=0".to_string()];

        let mut out = Vec::new();
        run(&args, &pool, &config(), &mut out).await.unwrap();
        assert!(output(out).starts_with("0 of 5 words"));

        args.no_default_excludes = true;
        let mut out = Vec::new();
        run(&args, &pool, &config(), &mut out).await.unwrap();
        assert!(output(out).contains("grüße\t"));
    }

    #[tokio::test]
    async fn test_guess_reports_invalid_constraints() {
        let pool = seeded_pool().await;
        let mut args = args("Five", 5);
        args.safe = vec!["c=x".to_string()];

        let mut out = Vec::new();
        let code = run(&args, &pool, &config(), &mut out).await.unwrap();
        assert_eq!(code, CliExitCode::Rejected);
        assert_eq!(
            output(out),
            "Cannot guess: Type of index is not integer in safe_characters for character \"c\"\n"
        );
    }

    #[tokio::test]
    async fn test_guess_empty_length_bucket() {
        let pool = seeded_pool().await;
        let mut out = Vec::new();
        let code = run(&args("Five", 7), &pool, &config(), &mut out).await.unwrap();
        assert_eq!(code, CliExitCode::Rejected);
        assert_eq!(output(out), "Cannot guess: Empty wordlist\n");
    }

    #[tokio::test]
    async fn test_guess_unknown_wordlist() {
        let pool = test_pool().await;
        let mut out = Vec::new();
        let code = run(&args("Nope", 5), &pool, &config(), &mut out).await.unwrap();
        assert_eq!(code, CliExitCode::Rejected);
        assert_eq!(output(out), "Wordlist \"Nope\" does not exist\n");
    }
}
