use std::{io::Write, path::PathBuf, time::Instant};

use anyhow::Result;
use clap::Args;
use sqlx::SqlitePool;

use super::CliExitCode;
use crate::{db::StoreError, dictionary, importer::WordlistImporter};

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Name to store the word list under (must be unused)
    pub name: String,
    /// Text file with one word per line
    pub filename: PathBuf,
}

pub async fn run(args: &ImportArgs, pool: &SqlitePool, out: &mut impl Write) -> Result<CliExitCode> {
    let lines = dictionary::read_lines(&args.filename).await?;

    let start_time = Instant::now();
    let importer = WordlistImporter::new(&lines);
    tracing::debug!(
        "Read {} unique words from {} lines of {}",
        importer.word_count(),
        lines.len(),
        args.filename.display()
    );

    match importer.persist(pool, &args.name).await {
        Ok(persisted_count) => {
            let elapsed = start_time.elapsed().as_secs_f64();
            writeln!(
                out,
                "Successfully persisted {} words in {} seconds",
                persisted_count, elapsed
            )?;
            Ok(CliExitCode::Success)
        }
        Err(StoreError::DuplicateName(name)) => {
            writeln!(out, "A wordlist with the same name already exists: {}", name)?;
            Ok(CliExitCode::Rejected)
        }
        Err(e @ StoreError::NameTooLong { .. }) => {
            writeln!(out, "{}", e)?;
            Ok(CliExitCode::Rejected)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{commands::test_support::output, db::test_pool};

    fn word_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_import_reports_count() {
        let pool = test_pool().await;
        let file = word_file("abc\ndef\naBc\nAbc\n");
        let args = ImportArgs {
            name: "Small".to_string(),
            filename: file.path().to_path_buf(),
        };

        let mut out = Vec::new();
        let code = run(&args, &pool, &mut out).await.unwrap();

        assert_eq!(code, CliExitCode::Success);
        let text = output(out);
        assert!(
            text.starts_with("Successfully persisted 2 words in "),
            "Unexpected output: {}",
            text
        );
    }

    #[tokio::test]
    async fn test_import_duplicate_name() {
        let pool = test_pool().await;
        let file = word_file("abc\n");
        let args = ImportArgs {
            name: "Twice".to_string(),
            filename: file.path().to_path_buf(),
        };

        run(&args, &pool, &mut Vec::new()).await.unwrap();

        let mut out = Vec::new();
        let code = run(&args, &pool, &mut out).await.unwrap();
        assert_eq!(code, CliExitCode::Rejected);
        assert_eq!(
            output(out),
            "A wordlist with the same name already exists: Twice\n"
        );
    }

    #[tokio::test]
    async fn test_import_rejects_long_name() {
        let pool = test_pool().await;
        let file = word_file("abc\n");
        let args = ImportArgs {
            name: "n".repeat(101),
            filename: file.path().to_path_buf(),
        };

        let mut out = Vec::new();
        let code = run(&args, &pool, &mut out).await.unwrap();
        assert_eq!(code, CliExitCode::Rejected);
        assert_eq!(
            output(out),
            "Wordlist name is longer than 100 characters: 101\n"
        );
    }

    #[tokio::test]
    async fn test_import_missing_file_is_an_error() {
        let pool = test_pool().await;
        let args = ImportArgs {
            name: "Nothing".to_string(),
            filename: PathBuf::from("/definitely/not/here.txt"),
        };

        assert!(run(&args, &pool, &mut Vec::new()).await.is_err());
    }
}
