use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Read a word list file as raw lines.
///
/// Lines are handed over untouched; trimming and filtering is the
/// importer's job.
pub async fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read word list file {}", path.display()))?;

    let lines: Vec<String> = content.lines().map(String::from).collect();

    tracing::info!("Read {} lines from {}", lines.len(), path.display());

    Ok(lines)
}
