use std::io::Write;

use anyhow::Result;
use sqlx::SqlitePool;

use super::CliExitCode;
use crate::db::queries;

pub async fn run(pool: &SqlitePool, out: &mut impl Write) -> Result<CliExitCode> {
    let summaries = queries::list_wordlists(pool).await?;

    if summaries.is_empty() {
        writeln!(out, "No wordlists imported yet")?;
        return Ok(CliExitCode::Success);
    }

    for summary in summaries {
        writeln!(
            out,
            "{}\t{} words\timported {}",
            summary.name,
            summary.word_count,
            summary.created_at.format("%Y-%m-%d %H:%M:%S")
        )?;
    }

    Ok(CliExitCode::Success)
}
