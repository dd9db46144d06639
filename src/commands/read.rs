use std::{io::Write, time::Instant};

use anyhow::Result;
use clap::Args;
use sqlx::SqlitePool;

use super::CliExitCode;
use crate::db::queries;

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Name of the word list
    pub wordlist: String,
    /// Only words with exactly this many characters
    pub length: usize,
    /// How many of the best rated words to print
    #[arg(long)]
    pub limit: Option<usize>,
}

pub async fn run(
    args: &ReadArgs,
    pool: &SqlitePool,
    default_limit: usize,
    out: &mut impl Write,
) -> Result<CliExitCode> {
    let start_time = Instant::now();

    let Some(wordlist) = queries::get_wordlist_by_name(pool, &args.wordlist).await? else {
        writeln!(out, "Wordlist \"{}\" does not exist", args.wordlist)?;
        return Ok(CliExitCode::Rejected);
    };

    let words = queries::get_words_by_length(pool, wordlist.id, args.length as i64).await?;
    let elapsed = start_time.elapsed().as_secs_f64();

    writeln!(
        out,
        "Successfully filtered {} words in wordlist \"{}\" in {} seconds",
        words.len(),
        wordlist.name,
        elapsed
    )?;

    for word in words.iter().take(args.limit.unwrap_or(default_limit)) {
        writeln!(out, "{}\t{}", word.word, word.rating)?;
    }

    Ok(CliExitCode::Success)
}
